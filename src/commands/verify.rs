//! Implementation of the `scrip verify` command.
//!
//! The pharmacist step: re-validates an ISSUED record, cross-checks the
//! stored safety score against a fresh computation (catching tampered
//! records and rule-table changes since issue time), records the verifier,
//! and moves the record to DISPENSED.

use crate::cli::VerifyArgs;
use crate::context::{Bucket, require_initialized_store};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, actor_string, append_event};
use crate::rx::RxFile;
use serde_json::json;

use super::validate_cmd::{count_critical, print_issue_report};

/// Execute the `scrip verify` command.
pub fn cmd_verify(args: VerifyArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let engine = super::build_engine(&ctx, &config)?;

    let info = super::find_record(&ctx, &args.rx)?;
    if info.bucket != Bucket::Issued {
        return Err(ScripError::UserError(format!(
            "prescription '{}' is in {} and cannot be verified (only ISSUED records can).",
            info.id, info.bucket
        )));
    }

    let mut rx = RxFile::load(&info.path)?;

    let issues = engine.validate(&rx.frontmatter.patient, &rx.frontmatter.medicines);
    let score = engine.score(&issues);

    print_issue_report(&info.id, &issues, score);

    let stored_score = rx.frontmatter.safety_score;
    let drift = stored_score != Some(score);
    if drift {
        println!();
        match stored_score {
            Some(stored) => println!(
                "Warning: stored safety score ({}) differs from recomputed score ({}).\n\
                 The record may have been edited after issue, or the rules have changed.",
                stored, score
            ),
            None => println!("Warning: record carries no stored safety score."),
        }
    }

    let verifier = args.by.unwrap_or_else(actor_string);
    rx.mark_dispensed(&verifier);

    let dispensed_path = ctx
        .bucket_path(Bucket::Dispensed)
        .join(format!("{}.md", info.id));
    rx.save(&dispensed_path)?;
    std::fs::remove_file(&info.path).map_err(|e| {
        ScripError::StoreError(format!(
            "failed to remove issued record '{}': {}",
            info.path.display(),
            e
        ))
    })?;

    if config.log_events {
        let event = Event::new(EventAction::Verify)
            .with_rx(&info.id)
            .with_details(json!({
                "verified_by": verifier,
                "stored_score": stored_score,
                "recomputed_score": score,
                "drift": drift,
                "critical": count_critical(&issues)
            }));
        append_event(&ctx, &event)?;
    }

    println!();
    println!("Dispensed {} (verified by {}).", info.id, verifier);

    Ok(())
}
