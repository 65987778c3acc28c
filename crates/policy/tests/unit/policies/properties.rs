//! Property tests over random access streams.

use adaptive_llc::common::constants::{MAX_RANK, REUSE_COUNTER_LIMIT};
use adaptive_llc::common::{Access, AccessType, BlockAddr};
use adaptive_llc::config::PolicyConfig;
use adaptive_llc::policies::{AdaptivePolicy, LruPolicy, ReuseDetector, ReuseStats};
use adaptive_llc::{ReplacementPolicy, Victim};
use proptest::prelude::*;

use crate::common::harness::{LlcHarness, Outcome};

const SETS: usize = 8;
const WAYS: usize = 4;

fn config(seed: u64) -> PolicyConfig {
    PolicyConfig {
        num_cores: 2,
        ways: WAYS,
        sets: Some(SETS),
        leader_sets: 2,
        seed,
        ..PolicyConfig::default()
    }
}

fn kind() -> impl Strategy<Value = AccessType> {
    prop_oneof![
        4 => Just(AccessType::Load),
        2 => Just(AccessType::Rfo),
        2 => Just(AccessType::Prefetch),
        1 => Just(AccessType::Writeback),
    ]
}

/// (core, block, pc, kind). Few PCs and blocks so reuse and bypass both occur.
fn ops() -> impl Strategy<Value = Vec<(usize, u64, u64, AccessType)>> {
    prop::collection::vec(
        (
            0_usize..2,
            0_u64..512,
            prop::sample::select(vec![0x400_u64, 0x4a0, 0x7f4]),
            kind(),
        ),
        1..400,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Bookkeeping stays consistent with what the tag store observed.
    #[test]
    fn adaptive_counters_match_harness(seed in any::<u64>(), ops in ops()) {
        let policy = AdaptivePolicy::new(&config(seed)).unwrap();
        let mut harness = LlcHarness::new(policy, SETS, WAYS);
        let mut fills = 0_u64;
        let mut detector_misses = [0_u64; 2];

        for &(core, block, pc, kind) in &ops {
            let outcome = harness.access(core, pc, BlockAddr::new(block).to_phys(), kind);
            match outcome {
                Outcome::Hit(_) => {}
                Outcome::Filled(_) => fills += 1,
                Outcome::Bypassed => prop_assert_ne!(kind, AccessType::Writeback),
            }
            if !matches!(outcome, Outcome::Hit(_)) && kind.seeks_reuse() {
                detector_misses[core] += 1;
            }
        }

        let stats = harness.policy.report_statistics();
        let inserted: u64 = AccessType::ALL.iter().map(|&k| stats.total_insertions(k)).sum();
        prop_assert_eq!(inserted, fills);
        prop_assert_eq!(stats.bypasses, harness.bypasses);
        prop_assert_eq!(harness.misses, fills + harness.bypasses);
        for core in 0..2 {
            prop_assert_eq!(harness.policy.detector().misses(core), detector_misses[core]);
        }
        for set in 0..SETS {
            for way in 0..WAYS {
                prop_assert!(harness.policy.rank(set, way) <= MAX_RANK);
            }
        }
    }

    /// A chosen victim always sits at the distant rank.
    #[test]
    fn adaptive_victim_is_distant(seed in any::<u64>(), ops in ops()) {
        let mut policy = AdaptivePolicy::new(&config(seed)).unwrap();

        for &(core, block, pc, kind) in &ops {
            let paddr = BlockAddr::new(block).to_phys();
            let access = Access::new(core, block as usize % SETS, paddr, pc, kind);
            let victim = policy.select_victim(&access);
            if let Victim::Way(way) = victim {
                prop_assert!(way < WAYS);
                prop_assert_eq!(policy.rank(access.set, way), MAX_RANK);
            }
            policy.update_state(&access, victim.to_way_index(WAYS), false);
        }
    }

    /// The most recently touched way is never the LRU victim.
    #[test]
    fn lru_never_evicts_mru(touches in prop::collection::vec((0_usize..SETS, 0_usize..WAYS), 1..200)) {
        let mut lru = LruPolicy::new(SETS, WAYS);
        for (set, way) in touches {
            let access = Access::new(0, set, BlockAddr::new(0).to_phys(), 0, AccessType::Load);
            lru.update_state(&access, way, false);
            prop_assert_ne!(lru.select_victim(&access), Victim::Way(way));
        }
    }

    /// Halving keeps both counters within their limit.
    #[test]
    fn reuse_counters_stay_bounded(events in prop::collection::vec(any::<bool>(), 0..5000)) {
        let mut stats = ReuseStats::default();
        for reused in events {
            if reused {
                stats.record_reuse();
            } else {
                stats.record_no_reuse();
            }
            prop_assert!(stats.reuse <= REUSE_COUNTER_LIMIT);
            prop_assert!(stats.no_reuse <= REUSE_COUNTER_LIMIT);
        }
    }

    /// A remembered block proves reuse at most once.
    #[test]
    fn recorded_block_found_once(blocks in prop::collection::vec(any::<u64>(), 1..64)) {
        let mut detector = ReuseDetector::new(1);
        for &block in &blocks {
            detector.record_candidate(0, 0x400, BlockAddr::new(block));
        }
        let last = BlockAddr::new(blocks[blocks.len() - 1]);
        prop_assert!(detector.lookup_and_consume(0, last));
        prop_assert!(!detector.lookup_and_consume(0, last));
    }
}
