//! Compiled rule set for efficient lookups.

use crate::error::{Result, ScripError};
use regex::Regex;

use super::model::{DrugRule, RuleSet};

/// A rule set with its dose-magnitude regex compiled.
///
/// Create once per engine construction and reuse across validations.
pub struct CompiledRules {
    rules: RuleSet,
    dose_regex: Regex,
}

impl std::fmt::Debug for CompiledRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledRules")
            .field("drugs", &self.rules.drugs.len())
            .field("dose_pattern", &self.rules.dose_pattern)
            .finish()
    }
}

impl CompiledRules {
    /// Compile a rule set.
    ///
    /// Fails if `dose_pattern` is not a valid regex (a rules-file error).
    pub fn from_rules(rules: RuleSet) -> Result<Self> {
        let dose_regex = Regex::new(&rules.dose_pattern).map_err(|e| {
            ScripError::UserError(format!(
                "invalid dose_pattern regex in rules: '{}' - {}\n\
                 Fix: edit rules.yaml and correct the pattern.",
                rules.dose_pattern, e
            ))
        })?;

        Ok(Self { rules, dose_regex })
    }

    /// The underlying rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Look up the rule for a drug by name (case-insensitive exact match).
    pub fn drug(&self, name: &str) -> Option<&DrugRule> {
        self.rules.drugs.get(&name.trim().to_lowercase())
    }

    /// Parse the leading numeric magnitude from a free-text dosage string.
    ///
    /// Returns `None` for malformed dosage strings; malformed input is
    /// treated as "no match", never an error.
    pub fn parse_dose_magnitude(&self, dosage: &str) -> Option<f64> {
        let captures = self.dose_regex.captures(dosage)?;
        captures.get(1)?.as_str().parse().ok()
    }
}
