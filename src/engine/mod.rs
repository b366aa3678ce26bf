//! Prescription safety validation engine.
//!
//! The engine is a pure function over its inputs and an immutable rule set:
//! `validate(patient, medicines)` returns an ordered list of safety issues,
//! and `score(issues)` derives the 0-100 safety score. It holds no shared
//! mutable state between invocations, never fails, and raises no errors for
//! malformed input (a dosage string that cannot be parsed simply matches no
//! dosage rule).
//!
//! Checks run in fixed order; the output ordering is the insertion order of
//! the checks, not a severity sort:
//!
//! 1. Age suitability
//! 2. Gender contraindication (optional)
//! 3. Drug-drug interaction (one issue per unordered pair)
//! 4. Dosage validation (ceiling, standard list, unknown-drug informational)
//! 5. Allergy conflict
//! 6. Symptom/medicine mismatch (optional)
//!
//! An empty medicine list yields an empty issue list and a score of 100;
//! callers must treat an empty issue list as "no concerns found", never as
//! "validation did not run".

pub mod checks;
mod issue;
mod score;
#[cfg(test)]
mod tests;

pub use issue::{IssueKind, Severity, ValidationIssue};
pub use score::{SafetyRating, safety_score};

use crate::error::Result;
use crate::rules::{CompiledRules, RuleSet};
use crate::rx::{Medicine, Patient};

/// The validation engine: a compiled rule set plus the check pipeline.
#[derive(Debug)]
pub struct ValidationEngine {
    rules: CompiledRules,
}

impl ValidationEngine {
    /// Build an engine from a rule set.
    ///
    /// Fails only on rule-set compilation errors (an invalid dose pattern);
    /// validation itself never fails.
    pub fn new(rules: RuleSet) -> Result<Self> {
        Ok(Self {
            rules: CompiledRules::from_rules(rules)?,
        })
    }

    /// The compiled rules this engine consults.
    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Run the check pipeline and return the detected issues in check order.
    pub fn validate(&self, patient: &Patient, medicines: &[Medicine]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        issues.extend(checks::check_age(patient, medicines, &self.rules));

        if self.rules.rules().check_gender {
            issues.extend(checks::check_gender(patient, medicines, &self.rules));
        }

        issues.extend(checks::check_interactions(medicines, &self.rules));
        issues.extend(checks::check_dosage(medicines, &self.rules));
        issues.extend(checks::check_allergies(patient, medicines, &self.rules));

        if self.rules.rules().check_mismatch {
            issues.extend(checks::check_mismatch(patient, medicines, &self.rules));
        }

        issues
    }

    /// Derive the safety score for a list of issues under this rule set's
    /// deductions.
    pub fn score(&self, issues: &[ValidationIssue]) -> u8 {
        safety_score(issues, &self.rules.rules().deductions)
    }
}
