//! Tests for config loading and validation.

use super::*;
use crate::test_support::create_test_store;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert!(config.strict_issue);
    assert!(config.log_events);
    assert_eq!(config.rules_file, "rules.yaml");
    assert_eq!(config.score_flag_threshold, 60);
    assert_eq!(config.stale_draft_days, 14);
}

#[test]
fn yaml_roundtrip() {
    let config = Config::default();
    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();

    assert_eq!(parsed.score_flag_threshold, config.score_flag_threshold);
    assert_eq!(parsed.stale_draft_days, config.stale_draft_days);
}

#[test]
fn partial_yaml_fills_defaults() {
    let config = Config::from_yaml("strict_issue: false\n").unwrap();

    assert!(!config.strict_issue);
    assert_eq!(config.score_flag_threshold, 60);
}

#[test]
fn unknown_fields_are_ignored() {
    let config = Config::from_yaml("future_feature: true\n").unwrap();
    assert!(config.strict_issue);
}

#[test]
fn threshold_over_100_is_rejected() {
    let err = Config::from_yaml("score_flag_threshold: 101\n").unwrap_err();
    assert!(err.to_string().contains("score_flag_threshold"));
}

#[test]
fn zero_stale_draft_days_is_rejected() {
    let err = Config::from_yaml("stale_draft_days: 0\n").unwrap_err();
    assert!(err.to_string().contains("stale_draft_days"));
}

#[test]
fn empty_rules_file_is_rejected() {
    let err = Config::from_yaml("rules_file: \"\"\n").unwrap_err();
    assert!(err.to_string().contains("rules_file"));
}

#[test]
fn load_rules_falls_back_to_defaults_when_file_missing() {
    let (_temp, ctx) = create_test_store();
    let config = Config::default();

    let rules = config.load_rules(&ctx).unwrap();
    assert!(rules.drugs.contains_key("aspirin"));
}

#[test]
fn load_rules_reads_store_rules_file() {
    let (_temp, ctx) = create_test_store();
    std::fs::write(
        ctx.rules_path(),
        "drugs:\n  customol:\n    min_age: 21\n",
    )
    .unwrap();

    let config = Config::default();
    let rules = config.load_rules(&ctx).unwrap();

    assert_eq!(rules.drugs.len(), 1);
    assert!(rules.drugs.contains_key("customol"));
}
