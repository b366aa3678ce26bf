//! Implementation of the `scrip issue` command.
//!
//! Validates a DRAFT record, persists the issues and safety score into the
//! frontmatter, and moves the record to ISSUED. With `strict_issue` enabled
//! (the default), critical issues block issuing unless `--force` is given.

use crate::cli::IssueArgs;
use crate::context::{Bucket, require_initialized_store};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, append_event};
use crate::rx::RxFile;
use serde_json::json;

use super::validate_cmd::{count_critical, print_issue_report};

/// Execute the `scrip issue` command.
pub fn cmd_issue(args: IssueArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let engine = super::build_engine(&ctx, &config)?;

    let info = super::find_record(&ctx, &args.rx)?;
    if info.bucket != Bucket::Draft {
        return Err(ScripError::UserError(format!(
            "prescription '{}' is in {} and cannot be issued (only DRAFT records can).",
            info.id, info.bucket
        )));
    }

    let mut rx = RxFile::load(&info.path)?;
    if !rx.has_medicines() {
        return Err(ScripError::UserError(format!(
            "prescription '{}' has no medicines.\n\
             Edit the record file and add at least one medicine:\n  {}",
            info.id,
            info.path.display()
        )));
    }

    let issues = engine.validate(&rx.frontmatter.patient, &rx.frontmatter.medicines);
    let score = engine.score(&issues);

    print_issue_report(&info.id, &issues, score);

    let critical_count = count_critical(&issues);
    if critical_count > 0 && config.strict_issue && !args.force {
        return Err(ScripError::SafetyError(format!(
            "{} critical issue(s) block issuing '{}'.\n\
             Review the prescription, or re-run with --force to issue anyway.",
            critical_count, info.id
        )));
    }

    rx.mark_issued(issues.clone(), score);

    let issued_path = ctx
        .bucket_path(Bucket::Issued)
        .join(format!("{}.md", info.id));
    rx.save(&issued_path)?;
    std::fs::remove_file(&info.path).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to remove draft '{}': {}",
            info.path.display(),
            e
        ))
    })?;

    if config.log_events {
        let event = Event::new(EventAction::Issue)
            .with_rx(&info.id)
            .with_details(json!({
                "safety_score": score,
                "issues": issues.len(),
                "critical": critical_count,
                "forced": args.force
            }));
        append_event(&ctx, &event)?;
    }

    println!();
    println!("Issued {} (safety score: {}/100).", info.id, score);
    if critical_count > 0 {
        println!("Warning: issued with {} critical issue(s).", critical_count);
    }

    Ok(())
}
