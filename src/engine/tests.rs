//! End-to-end tests for the validation engine pipeline.

use super::*;
use crate::rules::{Deductions, RuleSet};
use crate::rx::{AgeGroup, Gender, Medicine, Patient};

fn engine() -> ValidationEngine {
    ValidationEngine::new(RuleSet::default()).unwrap()
}

fn med(name: &str, dosage: &str) -> Medicine {
    Medicine {
        name: name.to_string(),
        dosage: dosage.to_string(),
        ..Default::default()
    }
}

fn adult() -> Patient {
    Patient {
        age: Some(34),
        ..Default::default()
    }
}

#[test]
fn empty_medicine_list_yields_no_issues_and_score_100() {
    let engine = engine();
    let issues = engine.validate(&adult(), &[]);

    assert!(issues.is_empty());
    assert_eq!(engine.score(&issues), 100);
}

#[test]
fn score_is_always_within_bounds() {
    let engine = engine();

    // A pathological prescription stacking every kind of issue.
    let patient = Patient {
        age_group: Some(AgeGroup::Child),
        gender: Gender::Female,
        allergies: vec!["aspirin".to_string(), "penicillin".to_string()],
        symptoms: "fever".to_string(),
        ..Default::default()
    };
    let medicines = vec![
        med("Aspirin", "9000mg"),
        med("Warfarin", "999mg"),
        med("Finasteride", ""),
        med("Amoxicillin", "250mg"),
        med("Antacid", ""),
        med("Obscurol", "1mg"),
    ];

    let issues = engine.validate(&patient, &medicines);
    assert!(!issues.is_empty());

    let score = engine.score(&issues);
    assert!(score <= 100);
}

#[test]
fn child_aspirin_example_scores_70() {
    let engine = engine();
    let patient = Patient {
        age_group: Some(AgeGroup::Child),
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Aspirin", "100mg")]);

    let age_issues: Vec<_> = issues
        .iter()
        .filter(|i| i.kind == IssueKind::Age && i.severity == Severity::Critical)
        .collect();
    assert_eq!(age_issues.len(), 1);
    assert_eq!(age_issues[0].medicine.as_deref(), Some("Aspirin"));
    assert_eq!(engine.score(&issues), 70);
}

#[test]
fn penicillin_allergy_amoxicillin_example_scores_70() {
    let engine = engine();
    let patient = Patient {
        age: Some(40),
        allergies: vec!["Penicillin".to_string()],
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Amoxicillin", "500mg")]);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::Allergy);
    assert_eq!(issues[0].severity, Severity::Critical);
    assert_eq!(engine.score(&issues), 70);
}

#[test]
fn aspirin_warfarin_example_scores_80() {
    let engine = engine();

    let issues = engine.validate(&adult(), &[med("Aspirin", ""), med("Warfarin", "")]);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::Interaction);
    assert!(issues[0].medicine.as_deref().unwrap().contains("Aspirin"));
    assert!(issues[0].medicine.as_deref().unwrap().contains("Warfarin"));
    assert_eq!(engine.score(&issues), 80);
}

#[test]
fn interaction_issue_count_is_order_independent() {
    let engine = engine();

    let forward = engine.validate(&adult(), &[med("Aspirin", ""), med("Warfarin", "")]);
    let reverse = engine.validate(&adult(), &[med("Warfarin", ""), med("Aspirin", "")]);

    assert_eq!(forward.len(), 1);
    assert_eq!(reverse.len(), 1);
}

#[test]
fn medicine_name_equal_to_allergy_always_conflicts() {
    let engine = engine();
    let patient = Patient {
        age: Some(30),
        allergies: vec!["Obscurol".to_string()],
        ..Default::default()
    };

    // Even a drug unknown to the rule tables conflicts with an identical
    // allergy string.
    let issues = engine.validate(&patient, &[med("Obscurol", "10mg")]);

    assert!(
        issues
            .iter()
            .any(|i| i.kind == IssueKind::Allergy && i.severity == Severity::Critical)
    );
}

#[test]
fn issues_appear_in_check_order() {
    let engine = engine();
    let patient = Patient {
        age_group: Some(AgeGroup::Child),
        allergies: vec!["aspirin".to_string()],
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Aspirin", ""), med("Warfarin", "")]);

    let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![IssueKind::Age, IssueKind::Interaction, IssueKind::Allergy]
    );
}

#[test]
fn validation_is_deterministic() {
    let engine = engine();
    let patient = Patient {
        age: Some(8),
        allergies: vec!["penicillin".to_string()],
        symptoms: "fever and cough".to_string(),
        ..Default::default()
    };
    let medicines = vec![med("Aspirin", "150mg"), med("Amoxicillin", "250mg")];

    let first = engine.validate(&patient, &medicines);
    let second = engine.validate(&patient, &medicines);

    assert_eq!(first, second);
}

#[test]
fn disabled_gender_check_is_skipped() {
    let rules = RuleSet {
        check_gender: false,
        ..Default::default()
    };
    let engine = ValidationEngine::new(rules).unwrap();
    let patient = Patient {
        gender: Gender::Female,
        age: Some(40),
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Finasteride", "")]);
    assert!(issues.iter().all(|i| i.kind != IssueKind::Gender));
}

#[test]
fn disabled_mismatch_check_is_skipped() {
    let rules = RuleSet {
        check_mismatch: false,
        ..Default::default()
    };
    let engine = ValidationEngine::new(rules).unwrap();
    let patient = Patient {
        symptoms: "fever".to_string(),
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Antacid", "")]);
    assert!(issues.iter().all(|i| i.kind != IssueKind::Mismatch));
}

#[test]
fn custom_deductions_apply() {
    let rules = RuleSet {
        deductions: Deductions {
            critical: 50,
            high: 20,
            medium: 10,
            low: 5,
        },
        ..Default::default()
    };
    let engine = ValidationEngine::new(rules).unwrap();
    let patient = Patient {
        age_group: Some(AgeGroup::Child),
        ..Default::default()
    };

    let issues = engine.validate(&patient, &[med("Aspirin", "100mg")]);
    assert_eq!(engine.score(&issues), 50);
}

#[test]
fn unrecognized_medicines_never_error() {
    let engine = engine();
    let medicines = vec![
        med("Unknownium", "??mg"),
        med("", ""),
        med("   ", "weird dosage !!"),
    ];

    let issues = engine.validate(&adult(), &medicines);

    // Only the named unknown drug draws an informational issue.
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Low);
    assert_eq!(issues[0].kind, IssueKind::Dosage);
}
