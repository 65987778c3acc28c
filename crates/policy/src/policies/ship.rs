//! Signature-based Hit Predictor (SHiP).
//!
//! Each fill is tagged with a signature hashed from the filling PC and whether
//! the fill was a prefetch. A per-core Signature History Counter Table (SHCT)
//! learns, per signature, whether lines inserted under it get reused.
//!
//! Only a sample of "leader" sets trains the table: a leader-set line whose
//! first hit arrives increments its signature, and a leader-set line evicted
//! without any hit decrements it. Predictions are then applied to fills in
//! every set.

use super::random::RandomSource;
use crate::common::constants::{MAX_SHCT, SHCT_INIT, SHCT_SIZE};
use crate::common::{PolicyError, SatCounter};

/// 3-bit saturating SHCT counter.
pub type ShipCounter = SatCounter<MAX_SHCT>;

/// Mask reducing a raw signature to the SHCT domain.
const SIGNATURE_MASK: u64 = (SHCT_SIZE as u64) - 1;

/// Hashed fill signature in `0..SHCT_SIZE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(u16);

impl Signature {
    /// Derives the signature of a fill: `((pc << 1) | prefetch) mod SHCT_SIZE`.
    #[inline(always)]
    pub const fn new(pc: u64, is_prefetch: bool) -> Self {
        Self((((pc << 1) | is_prefetch as u64) & SIGNATURE_MASK) as u16)
    }

    /// Wraps a raw SHCT index, reducing it into range.
    pub const fn from_index(index: usize) -> Self {
        Self(((index as u64) & SIGNATURE_MASK) as u16)
    }

    /// SHCT index of this signature.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-core signature history counter tables.
#[derive(Clone, Debug)]
pub struct SignatureTable {
    /// Core-major flat table of `num_cores * SHCT_SIZE` counters.
    counters: Vec<ShipCounter>,
    num_cores: usize,
}

impl SignatureTable {
    /// Creates tables for `num_cores` cores with every counter at `SHCT_INIT`.
    pub fn new(num_cores: usize) -> Self {
        Self {
            counters: vec![ShipCounter::new(SHCT_INIT); num_cores * SHCT_SIZE],
            num_cores,
        }
    }

    #[inline(always)]
    fn index(&self, core: usize, sig: Signature) -> usize {
        assert!(
            core < self.num_cores,
            "core {core} out of range (cores = {})",
            self.num_cores
        );
        core * SHCT_SIZE + sig.index()
    }

    /// Counter for `sig` in `core`'s table.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn counter(&self, core: usize, sig: Signature) -> ShipCounter {
        self.counters[self.index(core, sig)]
    }

    /// Records that a line filled under `sig` was reused.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn reward(&mut self, core: usize, sig: Signature) {
        let idx = self.index(core, sig);
        self.counters[idx].increment();
    }

    /// Records that a line filled under `sig` died without reuse.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn penalize(&mut self, core: usize, sig: Signature) {
        let idx = self.index(core, sig);
        self.counters[idx].decrement();
    }
}

/// Sets sampled for SHiP training.
#[derive(Clone, Debug)]
pub struct LeaderSets {
    mask: Vec<bool>,
    count: usize,
}

impl LeaderSets {
    /// Samples `count` distinct sets out of `sets`, without replacement.
    ///
    /// Draws random set indices until `count` unmarked sets have been marked.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::TooManyLeaderSets`] if `count > sets`.
    pub fn sample<R: RandomSource + ?Sized>(
        sets: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, PolicyError> {
        if count > sets {
            return Err(PolicyError::TooManyLeaderSets {
                requested: count,
                sets,
            });
        }

        let mut mask = vec![false; sets];
        let mut leaders = 0;
        while leaders < count {
            let set = rng.next_u32() as usize % sets;
            if !mask[set] {
                mask[set] = true;
                leaders += 1;
            }
        }

        Ok(Self { mask, count })
    }

    /// Whether `set` trains the predictor.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range.
    #[inline(always)]
    pub fn contains(&self, set: usize) -> bool {
        self.mask[set]
    }

    /// Number of leader sets.
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no set is sampled.
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Leader set indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(set, &leader)| leader.then_some(set))
    }
}
