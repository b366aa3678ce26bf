//! Symptom/medicine mismatch check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::{Medicine, Patient};

/// Check the recorded symptoms against the mismatch heuristics.
///
/// A heuristic fires when the symptoms contain its symptom term and a
/// medicine name contains its medicine term (both case-insensitive),
/// raising a medium issue per matching medicine. This check is optional
/// (`check_mismatch` in the rule set) and skipped entirely when disabled.
pub fn check_mismatch(
    patient: &Patient,
    medicines: &[Medicine],
    rules: &CompiledRules,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let symptoms = patient.symptoms.to_lowercase();
    if symptoms.trim().is_empty() {
        return issues;
    }

    for rule in &rules.rules().mismatches {
        if !symptoms.contains(&rule.symptom_contains.to_lowercase()) {
            continue;
        }

        for medicine in medicines {
            let name = medicine.name.to_lowercase();
            if name.contains(&rule.medicine_contains.to_lowercase()) {
                issues.push(
                    ValidationIssue::new(Severity::Medium, IssueKind::Mismatch, rule.message.as_str())
                        .with_medicine(&medicine.name),
                );
            }
        }
    }

    issues
}
