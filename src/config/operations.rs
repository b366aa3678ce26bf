//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::context::StoreContext;
use crate::error::{Result, ScripError};
use crate::rules::RuleSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScripError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ScripError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ScripError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `score_flag_threshold` must be at most 100
    /// - `stale_draft_days` must be positive
    /// - `rules_file` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.score_flag_threshold > 100 {
            return Err(ScripError::UserError(
                "config validation failed: score_flag_threshold must be at most 100".to_string(),
            ));
        }

        if self.stale_draft_days == 0 {
            return Err(ScripError::UserError(
                "config validation failed: stale_draft_days must be greater than 0".to_string(),
            ));
        }

        if self.rules_file.trim().is_empty() {
            return Err(ScripError::UserError(
                "config validation failed: rules_file must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Load the active rule set for a store.
    ///
    /// Reads the configured rules file when present; falls back to the
    /// built-in defaults when it does not exist.
    pub fn load_rules(&self, ctx: &StoreContext) -> Result<RuleSet> {
        let path = ctx.store_dir.join(&self.rules_file);
        if path.exists() {
            RuleSet::load(&path)
        } else {
            Ok(RuleSet::default())
        }
    }
}
