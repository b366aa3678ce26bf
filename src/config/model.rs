//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the scrip store.
///
/// This struct represents the contents of `.scrip/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Rules settings
    // =========================================================================
    /// Path to the rules file, relative to the store directory.
    /// When the file does not exist, the built-in default rules apply.
    #[serde(default = "default_rules_file")]
    pub rules_file: String,

    // =========================================================================
    // Issue settings
    // =========================================================================
    /// Whether `issue` refuses prescriptions with critical issues
    /// (override per invocation with `--force`).
    #[serde(default = "default_true")]
    pub strict_issue: bool,

    // =========================================================================
    // Reporting settings
    // =========================================================================
    /// Issued records scoring below this threshold are flagged by `status`.
    #[serde(default = "default_score_flag_threshold")]
    pub score_flag_threshold: u8,

    /// Days after which `audit` reports a DRAFT record as stale.
    #[serde(default = "default_stale_draft_days")]
    pub stale_draft_days: u32,

    // =========================================================================
    // Event settings
    // =========================================================================
    /// Whether state-changing commands append audit events.
    #[serde(default = "default_true")]
    pub log_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_file: default_rules_file(),
            strict_issue: default_true(),
            score_flag_threshold: default_score_flag_threshold(),
            stale_draft_days: default_stale_draft_days(),
            log_events: default_true(),
        }
    }
}
