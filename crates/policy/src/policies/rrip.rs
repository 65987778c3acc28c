//! Re-Reference Interval Prediction (RRIP) rank table.
//!
//! Every line carries a 2-bit re-reference prediction value ("rank"): 0 means the
//! line is expected to be reused soon, `MAX_RANK` that it is the next eviction
//! candidate. Victim selection scans a set for a `MAX_RANK` line and ages the whole
//! set until one appears. Hits promote to 0; the fill rank is chosen by
//! [`insertion_rank`] from the SHiP prediction for the filling signature.
//!
//! The table also stores the remaining per-line metadata the engine needs
//! (prefetch flag, reuse flag, signature and fill core), laid out set-major like
//! the tag store it shadows.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `select_victim()`: O(W × R) where W is the associativity and R = `MAX_RANK + 1`
//!   - `promote()`, `demote_prefetch()`: O(1)
//! - **Space Complexity:** O(S × W)

use super::random::RandomSource;
use super::ship::{ShipCounter, Signature};
use crate::common::AccessType;
use crate::common::constants::{DISTANT_INSERT_PERCENT, MAX_RANK, NEUTRAL_RANK};

/// Replacement metadata of one cache line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineState {
    /// Re-reference prediction value in `0..=MAX_RANK`.
    pub rank: u8,
    /// Line was filled by a prefetch and has not been demand-hit since.
    pub is_prefetch: bool,
    /// Line has been hit at least once since its fill (leader sets only).
    pub reused: bool,
    /// SHiP signature of the fill.
    pub signature: Signature,
    /// Core that filled the line.
    pub fill_core: usize,
}

impl Default for LineState {
    fn default() -> Self {
        Self {
            rank: MAX_RANK,
            is_prefetch: false,
            reused: false,
            signature: Signature::default(),
            fill_core: 0,
        }
    }
}

/// Per-line RRIP state for the whole cache.
#[derive(Clone, Debug)]
pub struct RankTable {
    lines: Vec<LineState>,
    sets: usize,
    ways: usize,
}

impl RankTable {
    /// Creates a table with every line at `MAX_RANK` and all flags cleared.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            lines: vec![LineState::default(); sets * ways],
            sets,
            ways,
        }
    }

    /// Number of sets covered.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Flat index of `(set, way)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    #[inline(always)]
    fn index(&self, set: usize, way: usize) -> usize {
        assert!(set < self.sets, "set {set} out of range (sets = {})", self.sets);
        assert!(way < self.ways, "way {way} out of range (ways = {})", self.ways);
        set * self.ways + way
    }

    /// Metadata of one line.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn line(&self, set: usize, way: usize) -> &LineState {
        &self.lines[self.index(set, way)]
    }

    /// Mutable metadata of one line.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn line_mut(&mut self, set: usize, way: usize) -> &mut LineState {
        let idx = self.index(set, way);
        &mut self.lines[idx]
    }

    /// Rank of one line.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn rank(&self, set: usize, way: usize) -> u8 {
        self.line(set, way).rank
    }

    /// Picks the eviction candidate of `set`.
    ///
    /// Returns the lowest way holding `MAX_RANK`. If none does, every line in the
    /// set is aged by one and the scan repeats.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range. Aging reaches `MAX_RANK` within
    /// `MAX_RANK` passes, so exhausting the pass bound indicates corrupted ranks.
    pub fn select_victim(&mut self, set: usize) -> usize {
        let base = self.index(set, 0);
        let lines = &mut self.lines[base..base + self.ways];

        for _ in 0..=MAX_RANK {
            if let Some(way) = lines.iter().position(|line| line.rank == MAX_RANK) {
                return way;
            }
            for line in lines.iter_mut() {
                line.rank += 1;
            }
        }
        unreachable!("rank aging produced no victim in set {set}");
    }

    /// Marks a demand hit: the line is expected to be reused soon.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn promote(&mut self, set: usize, way: usize) {
        self.line_mut(set, way).rank = 0;
    }

    /// Demotes a prefetched line on its first hit.
    ///
    /// A prefetch that has not yet proven useful goes back to `MAX_RANK` and loses
    /// its prefetch flag. Returns whether a demotion happened.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the table.
    pub fn demote_prefetch(&mut self, set: usize, way: usize) -> bool {
        let line = self.line_mut(set, way);
        if !line.is_prefetch {
            return false;
        }
        line.rank = MAX_RANK;
        line.is_prefetch = false;
        true
    }
}

/// Chooses the rank of a newly filled line.
///
/// - Writebacks always go to `MAX_RANK`.
/// - A signature whose counter is at zero goes to `MAX_RANK` with 95% probability,
///   otherwise `NEUTRAL_RANK`, so cold signatures still get occasional chances.
/// - A saturated signature goes to 0 (1 for prefetches).
/// - Everything else goes to `NEUTRAL_RANK`.
///
/// The random source is only consulted for zero-counter fills.
pub fn insertion_rank<R: RandomSource + ?Sized>(
    kind: AccessType,
    counter: ShipCounter,
    rng: &mut R,
) -> u8 {
    if kind == AccessType::Writeback {
        MAX_RANK
    } else if counter.is_min() {
        if rng.next_u32() % 100 >= 100 - DISTANT_INSERT_PERCENT {
            MAX_RANK
        } else {
            NEUTRAL_RANK
        }
    } else if counter.is_max() {
        if kind == AccessType::Prefetch { 1 } else { 0 }
    } else {
        NEUTRAL_RANK
    }
}
