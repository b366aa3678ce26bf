//! Age suitability check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::{Medicine, Patient};

/// Check each medicine against its age restrictions.
///
/// A restricted age group or an age below the drug's minimum raises a
/// critical issue (at most one of the two per medicine, restriction first).
/// An age above the drug's maximum raises a medium caution.
pub fn check_age(
    patient: &Patient,
    medicines: &[Medicine],
    rules: &CompiledRules,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for medicine in medicines {
        let Some(rule) = rules.drug(&medicine.name) else {
            continue;
        };

        if let Some(group) = patient.effective_age_group()
            && rule.restricted_groups.contains(&group)
        {
            issues.push(
                ValidationIssue::new(
                    Severity::Critical,
                    IssueKind::Age,
                    format!(
                        "{} is not recommended for {} patients",
                        medicine.name, group
                    ),
                )
                .with_medicine(&medicine.name),
            );
        } else if let (Some(age), Some(min_age)) = (patient.age, rule.min_age)
            && age < min_age
        {
            issues.push(
                ValidationIssue::new(
                    Severity::Critical,
                    IssueKind::Age,
                    format!(
                        "{} is not recommended for patients under {} years old (patient is {})",
                        medicine.name, min_age, age
                    ),
                )
                .with_medicine(&medicine.name),
            );
        }

        if let (Some(age), Some(max_age)) = (patient.age, rule.max_age)
            && age > max_age
        {
            issues.push(
                ValidationIssue::new(
                    Severity::Medium,
                    IssueKind::Age,
                    format!(
                        "Caution: {} is advised against for patients over {} years old (patient is {})",
                        medicine.name, max_age, age
                    ),
                )
                .with_medicine(&medicine.name),
            );
        }
    }

    issues
}
