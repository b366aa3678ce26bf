//! Implementation of the `scrip status` command.

use crate::context::{Bucket, require_initialized_store};
use crate::error::Result;
use crate::rx::RxFile;
use crate::store::RxIndex;

/// Execute the `scrip status` command.
pub fn cmd_status() -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let index = RxIndex::build(&ctx)?;

    println!("Store: {}", ctx.store_dir.display());
    println!();

    for &bucket in Bucket::all() {
        let records = index.in_bucket(bucket);
        println!("{} ({}):", bucket, records.len());
        for info in records {
            match RxFile::load(&info.path) {
                Ok(rx) => {
                    let score = rx
                        .frontmatter
                        .safety_score
                        .map(|s| format!("score {}/100", s))
                        .unwrap_or_else(|| "unvalidated".to_string());
                    println!(
                        "  {}  {}  ({})",
                        info.id, rx.frontmatter.doctor, score
                    );
                }
                Err(_) => println!("  {}  (unreadable record)", info.id),
            }
        }
        println!();
    }

    // Flag issued records below the configured score threshold.
    let flagged: Vec<String> = index
        .in_bucket(Bucket::Issued)
        .iter()
        .filter_map(|info| {
            let rx = RxFile::load(&info.path).ok()?;
            let score = rx.frontmatter.safety_score?;
            (score < config.score_flag_threshold).then(|| format!("{} ({}/100)", info.id, score))
        })
        .collect();

    if !flagged.is_empty() {
        println!(
            "Note: {} issued record(s) score below {}:",
            flagged.len(),
            config.score_flag_threshold
        );
        for entry in flagged {
            println!("  {}", entry);
        }
    }

    Ok(())
}
