//! Store-health check functions for the audit command.

use crate::config::Config;
use crate::context::{Bucket, StoreContext};
use crate::engine::ValidationEngine;
use crate::error::Result;
use crate::intake::{count_malformed_intake_lines, read_intakes};
use crate::rx::RxFile;
use crate::store::RxIndex;
use chrono::Utc;
use std::collections::BTreeSet;

use super::{AuditReport, Finding, FindingSeverity};

/// Check for missing store directories (buckets, events/).
pub fn check_missing_directories(ctx: &StoreContext, report: &mut AuditReport) {
    for &bucket in Bucket::all() {
        let path = ctx.bucket_path(bucket);
        if !path.exists() {
            report.findings.push(
                Finding::new(
                    FindingSeverity::Warning,
                    "missing_directory",
                    &format!("{} bucket directory does not exist", bucket),
                )
                .with_path(&path.display().to_string())
                .with_remediation("Directory will be recreated by the next record transition"),
            );
        }
    }

    let events_dir = ctx.events_dir();
    if !events_dir.exists() {
        report.findings.push(
            Finding::new(
                FindingSeverity::Warning,
                "missing_directory",
                "Events directory does not exist",
            )
            .with_path(&events_dir.display().to_string())
            .with_remediation("Directory will be created automatically when needed"),
        );
    }
}

/// Check record files for parse failures and safety-score drift.
///
/// A stored score that disagrees with a fresh computation means the record
/// was edited after issue, or the rule tables changed since.
pub fn check_record_integrity(
    ctx: &StoreContext,
    engine: &ValidationEngine,
    report: &mut AuditReport,
) -> Result<()> {
    let index = RxIndex::build(ctx)?;

    for info in index.iter() {
        let rx = match RxFile::load(&info.path) {
            Ok(rx) => rx,
            Err(e) => {
                report.findings.push(
                    Finding::new(
                        FindingSeverity::Error,
                        "malformed_record",
                        &format!("Record '{}' cannot be parsed: {}", info.id, e),
                    )
                    .with_path(&info.path.display().to_string())
                    .with_remediation("Fix the YAML frontmatter by hand"),
                );
                continue;
            }
        };

        // Drafts have no stored score yet.
        if info.bucket == Bucket::Draft {
            continue;
        }

        let issues = engine.validate(&rx.frontmatter.patient, &rx.frontmatter.medicines);
        let recomputed = engine.score(&issues);

        match rx.frontmatter.safety_score {
            Some(stored) if stored != recomputed => {
                report.findings.push(
                    Finding::new(
                        FindingSeverity::Error,
                        "score_drift",
                        &format!(
                            "Record '{}' stores safety score {} but recomputation gives {}",
                            info.id, stored, recomputed
                        ),
                    )
                    .with_path(&info.path.display().to_string())
                    .with_remediation(&format!("scrip validate {}", info.id)),
                );
            }
            None => {
                report.findings.push(
                    Finding::new(
                        FindingSeverity::Warning,
                        "missing_score",
                        &format!(
                            "Record '{}' is {} but carries no safety score",
                            info.id, info.bucket
                        ),
                    )
                    .with_path(&info.path.display().to_string())
                    .with_remediation(&format!("scrip validate {}", info.id)),
                );
            }
            _ => {}
        }
    }

    Ok(())
}

/// Check issued/dispensed records for drugs missing from the rule tables.
pub fn check_unknown_drugs(
    ctx: &StoreContext,
    engine: &ValidationEngine,
    report: &mut AuditReport,
) -> Result<()> {
    let index = RxIndex::build(ctx)?;

    for info in index.iter().filter(|i| i.bucket != Bucket::Draft) {
        let Ok(rx) = RxFile::load(&info.path) else {
            // Reported by check_record_integrity.
            continue;
        };

        for medicine in &rx.frontmatter.medicines {
            if medicine.name.trim().is_empty() {
                continue;
            }
            if engine.rules().drug(&medicine.name).is_none() {
                report.findings.push(
                    Finding::new(
                        FindingSeverity::Warning,
                        "unknown_drug",
                        &format!(
                            "Record '{}' prescribes '{}', which is not in the rule tables",
                            info.id, medicine.name
                        ),
                    )
                    .with_path(&info.path.display().to_string())
                    .with_remediation("Add the drug to rules.yaml or verify it manually"),
                );
            }
        }
    }

    Ok(())
}

/// Check the intake log for orphan and malformed entries.
pub fn check_orphan_intakes(ctx: &StoreContext, report: &mut AuditReport) -> Result<()> {
    let index = RxIndex::build(ctx)?;
    let intakes = read_intakes(ctx)?;

    let orphan_ids: BTreeSet<&str> = intakes
        .iter()
        .filter(|record| index.find(&record.rx).is_none())
        .map(|record| record.rx.as_str())
        .collect();

    for rx_id in orphan_ids {
        report.findings.push(
            Finding::new(
                FindingSeverity::Warning,
                "orphan_intake",
                &format!(
                    "Intake log references '{}', which does not exist in any bucket",
                    rx_id
                ),
            )
            .with_path(&ctx.intake_file().display().to_string()),
        );
    }

    let malformed = count_malformed_intake_lines(ctx)?;
    if malformed > 0 {
        report.findings.push(
            Finding::new(
                FindingSeverity::Error,
                "malformed_intake",
                &format!("Intake log contains {} unparseable line(s)", malformed),
            )
            .with_path(&ctx.intake_file().display().to_string())
            .with_remediation("Remove or fix the offending lines"),
        );
    }

    Ok(())
}

/// Check for DRAFT records older than the configured staleness threshold.
pub fn check_stale_drafts(
    ctx: &StoreContext,
    config: &Config,
    report: &mut AuditReport,
) -> Result<()> {
    let index = RxIndex::build(ctx)?;

    for info in index.in_bucket(Bucket::Draft) {
        let Ok(rx) = RxFile::load(&info.path) else {
            continue;
        };

        if let Some(created) = rx.frontmatter.created {
            let age_days = Utc::now().signed_duration_since(created).num_days();
            if age_days > config.stale_draft_days as i64 {
                report.findings.push(
                    Finding::new(
                        FindingSeverity::Warning,
                        "stale_draft",
                        &format!(
                            "Draft '{}' has been sitting for {} days (threshold: {})",
                            info.id, age_days, config.stale_draft_days
                        ),
                    )
                    .with_path(&info.path.display().to_string())
                    .with_remediation(&format!("scrip issue {} or delete the draft", info.id)),
                );
            }
        }
    }

    Ok(())
}
