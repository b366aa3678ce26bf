//! Implementation of the `scrip audit` command.
//!
//! Diagnoses store health. Reports:
//! - Missing store directories (buckets, events/)
//! - Records whose stored safety score disagrees with a fresh computation
//! - Unreadable or malformed record files
//! - Drugs on issued records that the rule tables do not know
//! - Intake log entries referencing missing prescriptions
//! - Malformed intake log lines
//! - Stale DRAFT records (older than the configured threshold)

mod checks;

#[cfg(test)]
mod tests;

use crate::context::require_initialized_store;
use crate::error::Result;
use crate::events::{Event, EventAction, append_event};
use serde_json::json;

/// Severity level for audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingSeverity {
    /// Warning: potential problem but not critical.
    Warning,
    /// Error: something is wrong and should be fixed.
    Error,
}

impl std::fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindingSeverity::Warning => write!(f, "WARNING"),
            FindingSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// A detected store-health finding with a recommended fix.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Severity level.
    pub severity: FindingSeverity,
    /// Category of the finding.
    pub category: String,
    /// Description of the finding.
    pub description: String,
    /// Path or identifier involved.
    pub path: Option<String>,
    /// Recommended remediation command or action.
    pub remediation: Option<String>,
}

impl Finding {
    pub fn new(severity: FindingSeverity, category: &str, description: &str) -> Self {
        Self {
            severity,
            category: category.to_string(),
            description: description.to_string(),
            path: None,
            remediation: None,
        }
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }
}

/// Result of running the store audit.
#[derive(Default)]
pub struct AuditReport {
    /// List of detected findings.
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Warning)
            .count()
    }
}

/// Execute the `scrip audit` command.
pub fn cmd_audit() -> Result<()> {
    let ctx = require_initialized_store()?;
    let config = super::load_config(&ctx);
    let engine = super::build_engine(&ctx, &config)?;

    let mut report = AuditReport::new();

    checks::check_missing_directories(&ctx, &mut report);
    checks::check_record_integrity(&ctx, &engine, &mut report)?;
    checks::check_unknown_drugs(&ctx, &engine, &mut report)?;
    checks::check_orphan_intakes(&ctx, &mut report)?;
    checks::check_stale_drafts(&ctx, &config, &mut report)?;

    print_report(&report);

    if config.log_events {
        let event = Event::new(EventAction::Audit).with_details(json!({
            "findings": report.findings.len(),
            "errors": report.error_count(),
            "warnings": report.warning_count()
        }));
        append_event(&ctx, &event)?;
    }

    Ok(())
}

/// Print the audit report.
fn print_report(report: &AuditReport) {
    if !report.has_findings() {
        println!("Store is healthy. No findings.");
        return;
    }

    println!("Findings ({}):", report.findings.len());
    println!();

    for (i, finding) in report.findings.iter().enumerate() {
        println!(
            "  {}. [{}] {} - {}",
            i + 1,
            finding.severity,
            finding.category,
            finding.description
        );

        if let Some(path) = &finding.path {
            println!("     Path: {}", path);
        }

        if let Some(remediation) = &finding.remediation {
            println!("     Fix:  {}", remediation);
        }

        println!();
    }

    println!(
        "Summary: {} error(s), {} warning(s).",
        report.error_count(),
        report.warning_count()
    );
}
