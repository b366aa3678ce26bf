//! Default value functions for the config.

// Default value functions for serde
pub(crate) fn default_rules_file() -> String {
    "rules.yaml".to_string()
}
pub(crate) fn default_score_flag_threshold() -> u8 {
    60
}
pub(crate) fn default_stale_draft_days() -> u32 {
    14
}
pub(crate) fn default_true() -> bool {
    true
}
