//! Tests for the audit checks.

use super::checks::*;
use super::*;
use crate::config::Config;
use crate::context::Bucket;
use crate::engine::ValidationEngine;
use crate::intake::{IntakeRecord, IntakeStatus, append_intake};
use crate::rules::RuleSet;
use crate::rx::{Patient, RxFile};
use crate::test_support::{create_test_store, med, write_rx_with_medicines};
use chrono::{Duration, Utc};

fn engine() -> ValidationEngine {
    ValidationEngine::new(RuleSet::default()).unwrap()
}

#[test]
fn healthy_store_has_no_findings() {
    let (_temp, ctx) = create_test_store();
    let mut report = AuditReport::new();

    check_missing_directories(&ctx, &mut report);
    check_record_integrity(&ctx, &engine(), &mut report).unwrap();
    check_unknown_drugs(&ctx, &engine(), &mut report).unwrap();
    check_orphan_intakes(&ctx, &mut report).unwrap();
    check_stale_drafts(&ctx, &Config::default(), &mut report).unwrap();

    assert!(!report.has_findings());
}

#[test]
fn missing_bucket_directory_is_reported() {
    let (_temp, ctx) = create_test_store();
    std::fs::remove_dir_all(ctx.bucket_path(Bucket::Dispensed)).unwrap();

    let mut report = AuditReport::new();
    check_missing_directories(&ctx, &mut report);

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].category, "missing_directory");
}

#[test]
fn score_drift_is_reported_as_error() {
    let (_temp, ctx) = create_test_store();
    let path = write_rx_with_medicines(
        &ctx,
        Bucket::Issued,
        "RX-001",
        Patient {
            age: Some(30),
            ..Default::default()
        },
        vec![med("Paracetamol", "500mg")],
    );

    // Store a score that recomputation cannot reproduce.
    let mut rx = RxFile::load(&path).unwrap();
    rx.frontmatter.safety_score = Some(55);
    rx.save(&path).unwrap();

    let mut report = AuditReport::new();
    check_record_integrity(&ctx, &engine(), &mut report).unwrap();

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.findings[0].category, "score_drift");
}

#[test]
fn matching_score_is_not_reported() {
    let (_temp, ctx) = create_test_store();
    let path = write_rx_with_medicines(
        &ctx,
        Bucket::Issued,
        "RX-001",
        Patient {
            age: Some(30),
            ..Default::default()
        },
        vec![med("Paracetamol", "500mg")],
    );

    let engine = engine();
    let mut rx = RxFile::load(&path).unwrap();
    let issues = engine.validate(&rx.frontmatter.patient, &rx.frontmatter.medicines);
    let score = engine.score(&issues);
    rx.mark_issued(issues, score);
    rx.save(&path).unwrap();

    let mut report = AuditReport::new();
    check_record_integrity(&ctx, &engine, &mut report).unwrap();

    assert!(!report.has_findings());
}

#[test]
fn issued_record_without_score_is_warned() {
    let (_temp, ctx) = create_test_store();
    write_rx_with_medicines(
        &ctx,
        Bucket::Issued,
        "RX-001",
        Patient::default(),
        vec![med("Paracetamol", "500mg")],
    );

    let mut report = AuditReport::new();
    check_record_integrity(&ctx, &engine(), &mut report).unwrap();

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].category, "missing_score");
}

#[test]
fn malformed_record_is_reported() {
    let (_temp, ctx) = create_test_store();
    std::fs::write(
        ctx.bucket_path(Bucket::Issued).join("RX-001.md"),
        "---\nid: [broken\n---\n",
    )
    .unwrap();

    let mut report = AuditReport::new();
    check_record_integrity(&ctx, &engine(), &mut report).unwrap();

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.findings[0].category, "malformed_record");
}

#[test]
fn unknown_drug_on_issued_record_is_warned() {
    let (_temp, ctx) = create_test_store();
    write_rx_with_medicines(
        &ctx,
        Bucket::Issued,
        "RX-001",
        Patient::default(),
        vec![med("Obscurol", "10mg")],
    );

    let mut report = AuditReport::new();
    check_unknown_drugs(&ctx, &engine(), &mut report).unwrap();

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].category, "unknown_drug");
}

#[test]
fn drafts_are_excluded_from_unknown_drug_check() {
    let (_temp, ctx) = create_test_store();
    write_rx_with_medicines(
        &ctx,
        Bucket::Draft,
        "RX-001",
        Patient::default(),
        vec![med("Obscurol", "10mg")],
    );

    let mut report = AuditReport::new();
    check_unknown_drugs(&ctx, &engine(), &mut report).unwrap();

    assert!(!report.has_findings());
}

#[test]
fn orphan_intake_is_reported_once_per_rx() {
    let (_temp, ctx) = create_test_store();
    append_intake(
        &ctx,
        &IntakeRecord::new("RX-404", "Aspirin", IntakeStatus::Taken),
    )
    .unwrap();
    append_intake(
        &ctx,
        &IntakeRecord::new("RX-404", "Aspirin", IntakeStatus::Missed),
    )
    .unwrap();

    let mut report = AuditReport::new();
    check_orphan_intakes(&ctx, &mut report).unwrap();

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].category, "orphan_intake");
}

#[test]
fn stale_draft_is_reported() {
    let (_temp, ctx) = create_test_store();
    let path = write_rx_with_medicines(
        &ctx,
        Bucket::Draft,
        "RX-001",
        Patient::default(),
        vec![med("Paracetamol", "500mg")],
    );

    let mut rx = RxFile::load(&path).unwrap();
    rx.frontmatter.created = Some(Utc::now() - Duration::days(30));
    rx.save(&path).unwrap();

    let mut report = AuditReport::new();
    check_stale_drafts(&ctx, &Config::default(), &mut report).unwrap();

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.findings[0].category, "stale_draft");
}

#[test]
fn fresh_draft_is_not_stale() {
    let (_temp, ctx) = create_test_store();
    write_rx_with_medicines(
        &ctx,
        Bucket::Draft,
        "RX-001",
        Patient::default(),
        vec![med("Paracetamol", "500mg")],
    );

    let mut report = AuditReport::new();
    check_stale_drafts(&ctx, &Config::default(), &mut report).unwrap();

    assert!(!report.has_findings());
}
