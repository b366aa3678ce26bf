//! Rule set model: per-drug rules, mismatch heuristics, and score deductions.

use crate::engine::Severity;
use crate::error::{Result, ScripError};
use crate::rx::{AgeGroup, Gender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::defaults;

/// Safety rules for a single drug, keyed by lowercase name in [`RuleSet::drugs`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugRule {
    /// Minimum patient age in years. Below this: critical issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,

    /// Maximum patient age in years. Above this: medium (caution) issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,

    /// Age groups this drug must not be prescribed to. Match: critical issue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub restricted_groups: Vec<AgeGroup>,

    /// Genders this drug is contraindicated for. Match: high issue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contraindicated_genders: Vec<Gender>,

    /// Lowercase names of drugs this one interacts with.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interacts_with: Vec<String>,

    /// Standard dosage strings; a prescribed dosage matching none of these
    /// (by substring) raises a medium issue.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub standard_dosages: Vec<String>,

    /// Maximum safe dose in milligrams; a parsed magnitude above this
    /// raises a critical issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dose_mg: Option<f64>,

    /// Extra allergy terms matched against patient allergies in addition to
    /// the drug name (e.g. "penicillin" for amoxicillin).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allergy_terms: Vec<String>,
}

/// A symptom/medicine mismatch heuristic.
///
/// Fires when the patient's recorded symptoms contain `symptom_contains`
/// and a medicine name contains `medicine_contains` (both case-insensitive).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MismatchRule {
    pub symptom_contains: String,
    pub medicine_contains: String,
    pub message: String,
}

/// Fixed score deductions per issue severity.
///
/// The safety score starts at 100, subtracts one deduction per issue, and
/// floors at 0. No issue affects another's deduction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Deductions {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for Deductions {
    fn default() -> Self {
        Self {
            critical: 30,
            high: 20,
            medium: 10,
            low: 5,
        }
    }
}

impl Deductions {
    /// The deduction applied for one issue of the given severity.
    pub fn for_severity(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// The complete rule set consulted by the validation engine.
///
/// Unknown fields in the YAML are silently ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Per-drug rules keyed by lowercase drug name.
    pub drugs: BTreeMap<String, DrugRule>,

    /// Symptom/medicine mismatch heuristics.
    pub mismatches: Vec<MismatchRule>,

    /// Score deductions per severity.
    pub deductions: Deductions,

    /// Whether the gender contraindication check runs.
    pub check_gender: bool,

    /// Whether the symptom/medicine mismatch check runs.
    pub check_mismatch: bool,

    /// Regex extracting the leading numeric magnitude from a dosage string.
    /// The first capture group must be the magnitude.
    pub dose_pattern: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            drugs: defaults::default_drugs(),
            mismatches: defaults::default_mismatches(),
            deductions: Deductions::default(),
            check_gender: true,
            check_mismatch: true,
            dose_pattern: defaults::default_dose_pattern(),
        }
    }
}

impl RuleSet {
    /// Load a rule set from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScripError::UserError(format!(
                "failed to read rules file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a rule set from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let rules: RuleSet = serde_yaml::from_str(yaml)
            .map_err(|e| ScripError::UserError(format!("failed to parse rules YAML: {}", e)))?;

        rules.validate()?;
        Ok(rules)
    }

    /// Serialize the rule set to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ScripError::UserError(format!("failed to serialize rules to YAML: {}", e)))
    }

    /// Validate rule values and return an error on invalid entries.
    ///
    /// Validation rules:
    /// - drug keys must be lowercase and non-empty (lookups are by lowercase name)
    /// - `interacts_with` and `allergy_terms` entries must be non-empty
    /// - mismatch rules must have non-empty match fields
    pub fn validate(&self) -> Result<()> {
        for (name, rule) in &self.drugs {
            if name.trim().is_empty() {
                return Err(ScripError::UserError(
                    "rules validation failed: drug names must be non-empty".to_string(),
                ));
            }
            if name != &name.to_lowercase() {
                return Err(ScripError::UserError(format!(
                    "rules validation failed: drug names must be lowercase (found '{}'). Use '{}' instead.",
                    name,
                    name.to_lowercase()
                )));
            }
            for other in rule.interacts_with.iter().chain(rule.allergy_terms.iter()) {
                if other.trim().is_empty() {
                    return Err(ScripError::UserError(format!(
                        "rules validation failed: drug '{}' has an empty interaction or allergy entry",
                        name
                    )));
                }
            }
        }

        for mismatch in &self.mismatches {
            if mismatch.symptom_contains.trim().is_empty()
                || mismatch.medicine_contains.trim().is_empty()
            {
                return Err(ScripError::UserError(
                    "rules validation failed: mismatch rules must set both symptom_contains and medicine_contains"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}
