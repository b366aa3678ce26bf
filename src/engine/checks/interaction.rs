//! Drug-drug interaction check.

use crate::engine::issue::{IssueKind, Severity, ValidationIssue};
use crate::rules::CompiledRules;
use crate::rx::Medicine;

/// Check every unordered pair of distinct medicines against the interaction
/// table.
///
/// A pair matches when either drug lists the other (the table may be
/// asymmetric); each matching pair emits exactly one high issue referencing
/// both names, regardless of list order.
pub fn check_interactions(medicines: &[Medicine], rules: &CompiledRules) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for i in 0..medicines.len() {
        for j in (i + 1)..medicines.len() {
            let first = &medicines[i];
            let second = &medicines[j];

            if interacts(first, second, rules) || interacts(second, first, rules) {
                issues.push(
                    ValidationIssue::new(
                        Severity::High,
                        IssueKind::Interaction,
                        format!(
                            "Potential interaction between {} and {}",
                            first.name, second.name
                        ),
                    )
                    .with_medicine(format!("{} + {}", first.name, second.name)),
                );
            }
        }
    }

    issues
}

/// Whether `a`'s rule lists `b` as an interacting drug.
fn interacts(a: &Medicine, b: &Medicine, rules: &CompiledRules) -> bool {
    let Some(rule) = rules.drug(&a.name) else {
        return false;
    };

    let other = b.name.trim().to_lowercase();
    if other.is_empty() {
        return false;
    }

    rule.interacts_with.iter().any(|name| name == &other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

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
    fn known_pair_emits_exactly_one_issue() {
        let issues = check_interactions(&[med("Aspirin"), med("Warfarin")], &rules());

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].kind, IssueKind::Interaction);
        assert!(issues[0].message.contains("Aspirin"));
        assert!(issues[0].message.contains("Warfarin"));
    }

    #[test]
    fn pair_order_does_not_matter() {
        let forward = check_interactions(&[med("Aspirin"), med("Warfarin")], &rules());
        let reverse = check_interactions(&[med("Warfarin"), med("Aspirin")], &rules());

        assert_eq!(forward.len(), 1);
        assert_eq!(reverse.len(), 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let issues = check_interactions(&[med("ASPIRIN"), med("warfarin")], &rules());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn asymmetric_table_entry_still_matches() {
        // Amoxicillin lists warfarin, but warfarin does not list amoxicillin.
        let issues = check_interactions(&[med("Warfarin"), med("Amoxicillin")], &rules());
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn three_way_prescription_emits_per_pair() {
        // aspirin-warfarin, aspirin-ibuprofen, warfarin-ibuprofen all interact.
        let issues = check_interactions(
            &[med("Aspirin"), med("Warfarin"), med("Ibuprofen")],
            &rules(),
        );
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn unrelated_medicines_pass() {
        let issues = check_interactions(&[med("Paracetamol"), med("Amoxicillin")], &rules());
        assert!(issues.is_empty());
    }

    #[test]
    fn unknown_drugs_never_error() {
        let issues = check_interactions(&[med("Obscurol"), med("Mysteron")], &rules());
        assert!(issues.is_empty());
    }
}
