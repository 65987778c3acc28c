//! LRU Replacement Policy Tests.

use adaptive_llc::common::{Access, AccessType, PhysAddr};
use adaptive_llc::policies::LruPolicy;
use adaptive_llc::{ReplacementPolicy, Victim};

fn access(set: usize) -> Access {
    Access::new(0, set, PhysAddr(0x1000), 0x400, AccessType::Load)
}

#[test]
fn test_lru_initial_victim_is_last_way() {
    let mut lru = LruPolicy::new(4, 4);
    assert_eq!(lru.select_victim(&access(0)), Victim::Way(3));
}

#[test]
fn test_lru_eviction_order() {
    let mut lru = LruPolicy::new(1, 4);
    let a = access(0);

    // Access 0, 1, 2, 3 in order; 0 becomes LRU.
    for way in 0..4 {
        lru.update_state(&a, way, false);
    }
    assert_eq!(lru.select_victim(&a), Victim::Way(0));

    // Touch 0 again; 1 is now LRU.
    lru.update_state(&a, 0, true);
    assert_eq!(lru.select_victim(&a), Victim::Way(1));
}

#[test]
fn test_lru_sets_are_independent() {
    let mut lru = LruPolicy::new(2, 2);
    lru.update_state(&access(0), 1, false);

    assert_eq!(lru.select_victim(&access(0)), Victim::Way(0));
    assert_eq!(lru.select_victim(&access(1)), Victim::Way(1));
}

#[test]
fn test_lru_ignores_bypass_sentinel() {
    let mut lru = LruPolicy::new(1, 4);
    lru.update_state(&access(0), 4, false);
    assert_eq!(lru.select_victim(&access(0)), Victim::Way(3));
}

#[test]
fn test_lru_never_bypasses_writebacks() {
    let mut lru = LruPolicy::new(1, 2);
    let wb = Access::new(1, 0, PhysAddr(0x40), 0, AccessType::Writeback);
    assert!(!lru.select_victim(&wb).is_bypass());
}
