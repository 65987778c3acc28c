//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! Each set keeps its ways ordered by recency; a touched way rotates to the
//! front (Most Recently Used) and the back of the order is the victim. Serves as
//! the baseline the adaptive policy is measured against, and never bypasses.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update_state()`: O(W) where W is the number of ways (associativity)
//!   - `select_victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads whose reuse distance fits in the associativity
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{ReplacementPolicy, Victim};
use crate::common::Access;

/// LRU Policy state.
#[derive(Clone, Debug)]
pub struct LruPolicy {
    /// A vector of usage stacks (one per set).
    /// Index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
            ways,
        }
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Returns the way at the bottom of the usage stack (LRU position).
    fn select_victim(&mut self, access: &Access) -> Victim {
        Victim::Way(self.usage[access.set].last().copied().unwrap_or(0))
    }

    /// Rotates the accessed `way` to the MRU position. The bypass sentinel
    /// (`way == ways`) names no line and is ignored.
    fn update_state(&mut self, access: &Access, way: usize, _hit: bool) {
        if way >= self.ways {
            return;
        }
        let stack = &mut self.usage[access.set];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack[..=pos].rotate_right(1);
        }
    }
}
