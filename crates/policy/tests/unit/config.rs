//! # Configuration Tests
//!
//! Defaults, set-count tiers, JSON deserialization and validation.

use adaptive_llc::build_policy;
use adaptive_llc::common::PolicyError;
use adaptive_llc::config::{PolicyConfig, PolicyKind};
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = PolicyConfig::default();
    assert_eq!(config.policy, PolicyKind::Adaptive);
    assert_eq!(config.num_cores, 4);
    assert_eq!(config.ways, 16);
    assert_eq!(config.config_number, 1);
    assert_eq!(config.sets, None);
    assert_eq!(config.leader_sets, 64);
    assert!(config.validate().is_ok());
}

#[rstest]
#[case(1, 2048)]
#[case(2, 2048)]
#[case(3, 8192)]
#[case(6, 8192)]
fn test_set_count_follows_config_tier(#[case] config_number: u32, #[case] sets: usize) {
    let config = PolicyConfig {
        config_number,
        ..PolicyConfig::default()
    };
    assert_eq!(config.llc_sets(), sets);
}

#[test]
fn test_explicit_sets_override_tier() {
    let config = PolicyConfig {
        config_number: 5,
        sets: Some(128),
        ..PolicyConfig::default()
    };
    assert_eq!(config.llc_sets(), 128);
}

#[test]
fn test_json_deserialization_fills_defaults() {
    let config = PolicyConfig::from_json(r#"{ "num_cores": 1, "sets": 256 }"#).unwrap();
    assert_eq!(config.num_cores, 1);
    assert_eq!(config.llc_sets(), 256);
    assert_eq!(config.ways, 16);
    assert_eq!(config.leader_sets, 64);
    assert_eq!(config.policy, PolicyKind::Adaptive);
}

#[rstest]
#[case(r#"{ "policy": "Lru" }"#)]
#[case(r#"{ "policy": "LRU" }"#)]
fn test_json_selects_lru(#[case] json: &str) {
    let config = PolicyConfig::from_json(json).unwrap();
    assert_eq!(config.policy, PolicyKind::Lru);
}

#[test]
fn test_malformed_json_is_reported() {
    let err = PolicyConfig::from_json(r#"{ "ways": "many" }"#).unwrap_err();
    assert!(matches!(err, PolicyError::Json(_)));
}

#[test]
fn test_zero_cores_rejected() {
    let config = PolicyConfig {
        num_cores: 0,
        ..PolicyConfig::default()
    };
    assert!(matches!(config.validate(), Err(PolicyError::InvalidConfig(_))));
}

#[test]
fn test_zero_ways_rejected() {
    let err = PolicyConfig::from_json(r#"{ "ways": 0 }"#).unwrap_err();
    assert!(matches!(err, PolicyError::InvalidConfig(_)));
}

#[test]
fn test_too_many_leader_sets_rejected() {
    let config = PolicyConfig {
        sets: Some(32),
        leader_sets: 33,
        ..PolicyConfig::default()
    };
    match config.validate() {
        Err(PolicyError::TooManyLeaderSets { requested, sets }) => {
            assert_eq!(requested, 33);
            assert_eq!(sets, 32);
        }
        other => panic!("unexpected validation result: {other:?}"),
    }
}

#[rstest]
#[case(PolicyKind::Adaptive)]
#[case(PolicyKind::Lru)]
fn test_build_policy_for_each_kind(#[case] policy: PolicyKind) {
    let config = PolicyConfig {
        policy,
        sets: Some(64),
        leader_sets: 4,
        ..PolicyConfig::default()
    };
    assert!(build_policy(&config).is_ok());
}

#[test]
fn test_build_policy_validates() {
    let config = PolicyConfig {
        sets: Some(0),
        ..PolicyConfig::default()
    };
    assert!(build_policy(&config).is_err());
}
