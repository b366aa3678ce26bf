//! Allergy conflict check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::{Medicine, Patient};

/// Check each medicine against the patient's allergy list.
///
/// A medicine matches an allergy by bidirectional case-insensitive substring
/// containment between the allergy string and either the medicine name or
/// one of the drug's configured `allergy_terms` (cross-sensitivity, e.g.
/// amoxicillin matching a penicillin allergy). Any match raises a critical
/// issue; at most one per medicine.
pub fn check_allergies(
    patient: &Patient,
    medicines: &[Medicine],
    rules: &CompiledRules,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for medicine in medicines {
        let name = medicine.name.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }

        let mut terms = vec![name.clone()];
        if let Some(rule) = rules.drug(&medicine.name) {
            terms.extend(rule.allergy_terms.iter().map(|t| t.to_lowercase()));
        }

        let matched = patient.allergies.iter().find(|allergy| {
            let allergy = allergy.trim().to_lowercase();
            !allergy.is_empty()
                && terms
                    .iter()
                    .any(|term| term.contains(&allergy) || allergy.contains(term))
        });

        if let Some(allergy) = matched {
            issues.push(
                ValidationIssue::new(
                    Severity::Critical,
                    IssueKind::Allergy,
                    format!(
                        "Patient is allergic to {} (recorded allergy: {})",
                        medicine.name,
                        allergy.trim()
                    ),
                )
                .with_medicine(&medicine.name),
            );
        }
    }

    issues
}
