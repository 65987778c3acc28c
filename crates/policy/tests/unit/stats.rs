//! PolicyStats unit tests.
//!
//! Verifies histogram bookkeeping, the printed report and JSON output.

use adaptive_llc::PolicyStats;
use adaptive_llc::common::AccessType;
use pretty_assertions::assert_eq;

#[test]
fn default_stats_all_zero() {
    let stats = PolicyStats::default();
    for kind in AccessType::ALL {
        assert_eq!(stats.total_insertions(kind), 0);
    }
    assert_eq!(stats.prefetch_downgrades, 0);
    assert_eq!(stats.bypasses, 0);
}

#[test]
fn insertions_are_keyed_by_type_and_rank() {
    let mut stats = PolicyStats::default();
    stats.record_insertion(AccessType::Load, 2);
    stats.record_insertion(AccessType::Load, 2);
    stats.record_insertion(AccessType::Load, 0);
    stats.record_insertion(AccessType::Writeback, 3);

    assert_eq!(stats.insertions(AccessType::Load, 2), 2);
    assert_eq!(stats.insertions(AccessType::Load, 0), 1);
    assert_eq!(stats.total_insertions(AccessType::Load), 3);
    assert_eq!(stats.insertions(AccessType::Writeback, 3), 1);
    assert_eq!(stats.total_insertions(AccessType::Rfo), 0);
    assert_eq!(
        stats.insertion_distribution,
        [[1, 0, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 1]]
    );
}

#[test]
fn rank_beyond_histogram_reads_as_zero() {
    let stats = PolicyStats::default();
    assert_eq!(stats.insertions(AccessType::Load, 9), 0);
}

#[test]
fn report_lists_every_type_and_counter() {
    let mut stats = PolicyStats::default();
    stats.prefetch_downgrades = 7;
    stats.bypasses = 11;
    let report = stats.to_string();

    for label in ["LOAD", "RFO", "PREFETCH", "WRITEBACK"] {
        assert!(report.contains(label), "missing {label} row in:\n{report}");
    }
    assert!(report.contains("prefetch.downgrades    7"));
    assert!(report.contains("red.bypasses           11"));
}

#[test]
fn json_snapshot() {
    let mut stats = PolicyStats::default();
    stats.record_insertion(AccessType::Prefetch, 1);
    stats.bypasses = 2;

    let json = stats.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["insertion_distribution"][2][1], 1);
    assert_eq!(value["bypasses"], 2);
    assert_eq!(value["prefetch_downgrades"], 0);
}
