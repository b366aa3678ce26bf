//! Gender contraindication check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::{Medicine, Patient};

/// Check each medicine against its gender contraindications.
///
/// A contraindicated gender raises a high issue. This check is optional
/// (`check_gender` in the rule set) and skipped entirely when disabled.
pub fn check_gender(
    patient: &Patient,
    medicines: &[Medicine],
    rules: &CompiledRules,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for medicine in medicines {
        let Some(rule) = rules.drug(&medicine.name) else {
            continue;
        };

        if rule.contraindicated_genders.contains(&patient.gender) {
            issues.push(
                ValidationIssue::new(
                    Severity::High,
                    IssueKind::Gender,
                    format!(
                        "{} is contraindicated for {} patients",
                        medicine.name, patient.gender
                    ),
                )
                .with_medicine(&medicine.name),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::rx::Gender;

    fn rules() -> CompiledRules {
        CompiledRules::from_rules(RuleSet::default()).unwrap()
    }

    fn med(name: &str) -> Medicine {
        Medicine {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn contraindicated_gender_raises_high() {
        let patient = Patient {
            gender: Gender::Female,
            ..Default::default()
        };

        let issues = check_gender(&patient, &[med("Finasteride")], &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].kind, IssueKind::Gender);
        assert!(issues[0].message.contains("female"));
    }

    #[test]
    fn other_gender_passes() {
        let patient = Patient {
            gender: Gender::Male,
            ..Default::default()
        };

        assert!(check_gender(&patient, &[med("Finasteride")], &rules()).is_empty());
    }

    #[test]
    fn drug_without_contraindications_passes() {
        let patient = Patient {
            gender: Gender::Female,
            ..Default::default()
        };

        assert!(check_gender(&patient, &[med("Paracetamol")], &rules()).is_empty());
    }
}
