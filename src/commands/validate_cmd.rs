//! Implementation of the `scrip validate` command.
//!
//! Runs the safety validation engine against a record and prints the issue
//! report and safety score. State is never changed; the command exits with
//! the safety-failure code when critical issues are present so it can gate
//! scripted pipelines.

use crate::cli::ValidateArgs;
use crate::context::require_initialized_store;
use crate::engine::{SafetyRating, Severity, ValidationIssue};
use crate::error::{Result, ScripError};
use crate::events::{Event, EventAction, append_event};
use crate::rx::RxFile;
use serde_json::json;
use std::path::Path;

/// Execute the `scrip validate` command.
pub fn cmd_validate(args: ValidateArgs) -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let engine = super::build_engine(&ctx, &config)?;

    let rx = load_target(&ctx, &args.rx)?;

    let issues = engine.validate(&rx.frontmatter.patient, &rx.frontmatter.medicines);
    let score = engine.score(&issues);

    if args.json {
        print_json_report(&rx.frontmatter.id, &issues, score)?;
    } else {
        print_issue_report(&rx.frontmatter.id, &issues, score);
    }

    if config.log_events {
        let event = Event::new(EventAction::Validate)
            .with_rx(&rx.frontmatter.id)
            .with_details(json!({
                "issues": issues.len(),
                "safety_score": score
            }));
        append_event(&ctx, &event)?;
    }

    let critical_count = count_critical(&issues);
    if critical_count > 0 {
        return Err(ScripError::SafetyError(format!(
            "{} critical issue(s) detected",
            critical_count
        )));
    }

    Ok(())
}

/// Load the validation target: a prescription ID in the store, or a path to
/// a record file (useful for drafts kept outside the store).
fn load_target(ctx: &crate::context::StoreContext, target: &str) -> Result<RxFile> {
    if crate::store::is_valid_rx_id(target) {
        let info = super::find_record(ctx, target)?;
        return RxFile::load(&info.path);
    }

    let path = Path::new(target);
    if path.is_file() {
        return RxFile::load(path);
    }

    Err(ScripError::UserError(format!(
        "'{}' is neither a prescription ID (RX-NNN) nor a record file path",
        target
    )))
}

/// Number of critical issues in a list.
pub(crate) fn count_critical(issues: &[ValidationIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count()
}

/// Print the human-readable issue report.
pub(crate) fn print_issue_report(rx_id: &str, issues: &[ValidationIssue], score: u8) {
    if issues.is_empty() {
        println!("No safety issues detected for {}.", rx_id);
    } else {
        println!("Safety issues for {} ({}):", rx_id, issues.len());
        println!();

        for (i, issue) in issues.iter().enumerate() {
            println!(
                "  {}. [{}] {} - {}",
                i + 1,
                issue.severity,
                issue.kind,
                issue.message
            );
            if let Some(medicine) = &issue.medicine {
                println!("     Medicine: {}", medicine);
            }
        }
        println!();
    }

    println!(
        "Safety score: {}/100 ({})",
        score,
        SafetyRating::from_score(score)
    );
}

/// Print the machine-readable JSON report.
fn print_json_report(rx_id: &str, issues: &[ValidationIssue], score: u8) -> Result<()> {
    let report = json!({
        "rx": rx_id,
        "safety_score": score,
        "rating": SafetyRating::from_score(score).to_string(),
        "issues": issues,
    });

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| ScripError::UserError(format!("failed to render JSON report: {}", e)))?;
    println!("{}", rendered);

    Ok(())
}
