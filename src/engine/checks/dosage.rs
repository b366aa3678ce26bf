//! Dosage validation check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::Medicine;

/// Check each medicine's free-text dosage.
///
/// - Parsed magnitude above the drug's ceiling: critical.
/// - Otherwise, dosage matching none of the drug's standard dosages
///   (by substring): medium.
/// - Drug entirely unknown to the rule tables: low informational issue
///   recommending manual verification.
///
/// Malformed dosage strings are treated as "no match", never errors.
pub fn check_dosage(medicines: &[Medicine], rules: &CompiledRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for medicine in medicines {
        if medicine.name.trim().is_empty() {
            continue;
        }

        let Some(rule) = rules.drug(&medicine.name) else {
            issues.push(
                ValidationIssue::new(
                    Severity::Low,
                    IssueKind::Dosage,
                    format!(
                        "{} is not in the rule tables; verify dosage and contraindications manually",
                        medicine.name
                    ),
                )
                .with_medicine(&medicine.name),
            );
            continue;
        };

        // A blank dosage carries no information to compare; like a
        // malformed magnitude, it raises no dosage issue.
        if medicine.dosage.trim().is_empty() {
            continue;
        }

        let magnitude = rules.parse_dose_magnitude(&medicine.dosage);

        if let (Some(max), Some(value)) = (rule.max_dose_mg, magnitude)
            && value > max
        {
            issues.push(
                ValidationIssue::new(
                    Severity::Critical,
                    IssueKind::Dosage,
                    format!(
                        "Dosage of {} ({}) exceeds maximum safe limit ({}mg)",
                        medicine.name, medicine.dosage, max
                    ),
                )
                .with_medicine(&medicine.name),
            );
        } else if !rule.standard_dosages.is_empty() {
            let dosage = medicine.dosage.to_lowercase();
            let matches_standard = rule
                .standard_dosages
                .iter()
                .any(|standard| dosage.contains(&standard.to_lowercase()));

            if !matches_standard {
                issues.push(
                    ValidationIssue::new(
                        Severity::Medium,
                        IssueKind::Dosage,
                        format!(
                            "Dosage of {} ({}) deviates from standard dosages: {}",
                            medicine.name,
                            medicine.dosage,
                            rule.standard_dosages.join(", ")
                        ),
                    )
                    .with_medicine(&medicine.name),
                );
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn rules() -> CompiledRules {
        CompiledRules::from_rules(RuleSet::default()).unwrap()
    }

    fn med(name: &str, dosage: &str) -> Medicine {
        Medicine {
            name: name.to_string(),
            dosage: dosage.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn over_ceiling_raises_critical() {
        let issues = check_dosage(&[med("Aspirin", "5000mg")], &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert!(issues[0].message.contains("4000mg"));
    }

    #[test]
    fn standard_dosage_passes() {
        assert!(check_dosage(&[med("Aspirin", "100mg")], &rules()).is_empty());
        assert!(check_dosage(&[med("Warfarin", "2.5mg")], &rules()).is_empty());
    }

    #[test]
    fn nonstandard_dosage_raises_medium() {
        let issues = check_dosage(&[med("Aspirin", "150mg")], &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert!(issues[0].message.contains("75mg"));
    }

    #[test]
    fn over_ceiling_does_not_double_report() {
        // 5000mg is also nonstandard; only the critical issue is emitted.
        let issues = check_dosage(&[med("Aspirin", "5000mg")], &rules());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn malformed_dosage_is_no_match() {
        // "two tablets" parses to no magnitude and matches no standard
        // dosage string, so only the deviation issue fires.
        let issues = check_dosage(&[med("Aspirin", "two tablets")], &rules());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn unknown_drug_raises_informational() {
        let issues = check_dosage(&[med("Obscurol", "10mg")], &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Low);
        assert!(issues[0].message.contains("manually"));
    }

    #[test]
    fn empty_medicine_name_is_skipped() {
        let issues = check_dosage(&[med("", "10mg")], &rules());
        assert!(issues.is_empty());
    }

    #[test]
    fn blank_dosage_raises_no_issue() {
        let issues = check_dosage(&[med("Aspirin", "")], &rules());
        assert!(issues.is_empty());
    }

    #[test]
    fn known_drug_without_dosage_rules_passes() {
        let issues = check_dosage(&[med("Tetracycline", "anything")], &rules());
        assert!(issues.is_empty());
    }
}
