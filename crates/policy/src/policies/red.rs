//! Reuse Detector (ReD).
//!
//! An admission filter in front of the LLC. Missed blocks are remembered in a
//! small set-associative Address Reuse Table (ART); a later miss to a remembered
//! block proves reuse. Per-PC statistics (PCRT) count how often blocks missed by
//! each PC bucket came back (`reuse`) versus aged out of the ART unreferenced
//! (`no_reuse`). PCs with strong evidence of no reuse have their misses bypass
//! the cache.
//!
//! The ART is organized by regions: each entry covers `RED_SECTOR_SIZE`
//! consecutive blocks with one valid bit per block. Only one region in
//! `RED_PC_FRACTION` keeps the PC bucket of each insertion; those sampled
//! regions are the sole source of PCRT training.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup_and_consume()`, `record_candidate()`: O(`RED_WAYS`)
//!   - `should_record()`, `should_bypass()`: O(1)
//! - **Space Complexity:** O(C × (`RED_SETS` × `RED_WAYS` + `PC_BUCKETS`)) for C cores

use tracing::debug;

use crate::common::BlockAddr;
use crate::common::constants::{
    AMBIGUITY_FACTOR, BYPASS_FACTOR, FORCED_SAMPLE_INTERVAL, INITIAL_REUSE, PC_BUCKET_SHIFT,
    PC_BUCKETS, RED_PC_FRACTION, RED_SECTOR_SIZE, RED_SETS, RED_WAYS, REUSE_COUNTER_LIMIT,
};

/// Mask reducing a shifted PC to a bucket index.
const PC_BUCKET_MASK: u64 = (PC_BUCKETS as u64) - 1;

/// Bucket grouping the PCs that share reuse statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PcBucket(u8);

impl PcBucket {
    /// Buckets a program counter: `(pc >> 2) mod PC_BUCKETS`.
    #[inline(always)]
    pub const fn from_pc(pc: u64) -> Self {
        Self(((pc >> PC_BUCKET_SHIFT) & PC_BUCKET_MASK) as u8)
    }

    /// PCRT index of this bucket.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reuse evidence gathered for one PC bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReuseStats {
    /// Remembered misses that were later missed on again.
    pub reuse: u32,
    /// Remembered misses that aged out of the ART unreferenced.
    pub no_reuse: u32,
}

impl Default for ReuseStats {
    fn default() -> Self {
        Self {
            reuse: INITIAL_REUSE,
            no_reuse: 0,
        }
    }
}

impl ReuseStats {
    /// Counts a confirmed reuse.
    pub const fn record_reuse(&mut self) {
        self.reuse += 1;
        if self.reuse > REUSE_COUNTER_LIMIT {
            self.halve();
        }
    }

    /// Counts a remembered block that was never reused.
    pub const fn record_no_reuse(&mut self) {
        self.no_reuse += 1;
        if self.no_reuse > REUSE_COUNTER_LIMIT {
            self.halve();
        }
    }

    const fn halve(&mut self) {
        self.reuse >>= 1;
        self.no_reuse >>= 1;
    }

    /// Evidence leans to no reuse without being overwhelming.
    pub const fn is_ambiguous(self) -> bool {
        self.reuse * AMBIGUITY_FACTOR > self.no_reuse && self.predicts_no_reuse()
    }

    /// No-reuse evidence outweighs reuse by more than `BYPASS_FACTOR`.
    pub const fn predicts_no_reuse(self) -> bool {
        self.reuse * BYPASS_FACTOR < self.no_reuse
    }
}

/// One ART entry: a region tag plus a valid bit per subsector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ArtEntry {
    tag: u16,
    valid: u8,
}

impl ArtEntry {
    #[inline(always)]
    const fn is_valid(self, subsector: usize) -> bool {
        self.valid & (1 << subsector) != 0
    }
}

/// One ART region: `RED_WAYS` entries and a round-robin insertion pointer.
#[derive(Clone, Copy, Debug, Default)]
struct ArtSet {
    entries: [ArtEntry; RED_WAYS],
    insert: usize,
}

/// Reuse-detector state private to one core.
#[derive(Clone, Debug)]
struct CoreDetector {
    art: Vec<ArtSet>,
    /// PC buckets of sampled regions, indexed by `(region / RED_PC_FRACTION, way)`.
    art_pc: Vec<[PcBucket; RED_SECTOR_SIZE]>,
    pcrt: Vec<ReuseStats>,
    misses: u64,
}

impl CoreDetector {
    fn new() -> Self {
        Self {
            art: vec![ArtSet::default(); RED_SETS],
            art_pc: vec![
                [PcBucket::default(); RED_SECTOR_SIZE];
                (RED_SETS / RED_PC_FRACTION) * RED_WAYS
            ],
            pcrt: vec![ReuseStats::default(); PC_BUCKETS],
            misses: 0,
        }
    }

    /// Slot of `(region, way)` in the PC side table, if the region is sampled.
    #[inline(always)]
    const fn pc_slot(region: usize, way: usize) -> Option<usize> {
        if region % RED_PC_FRACTION == 0 {
            Some((region / RED_PC_FRACTION) * RED_WAYS + way)
        } else {
            None
        }
    }
}

/// Reuse detectors for every core.
#[derive(Clone, Debug)]
pub struct ReuseDetector {
    cores: Vec<CoreDetector>,
}

impl ReuseDetector {
    /// Creates zeroed ARTs and optimistic PC statistics for `num_cores` cores.
    pub fn new(num_cores: usize) -> Self {
        Self {
            cores: (0..num_cores).map(|_| CoreDetector::new()).collect(),
        }
    }

    #[inline(always)]
    fn core(&self, core: usize) -> &CoreDetector {
        assert!(
            core < self.cores.len(),
            "core {core} out of range (cores = {})",
            self.cores.len()
        );
        &self.cores[core]
    }

    #[inline(always)]
    fn core_mut(&mut self, core: usize) -> &mut CoreDetector {
        assert!(
            core < self.cores.len(),
            "core {core} out of range (cores = {})",
            self.cores.len()
        );
        &mut self.cores[core]
    }

    /// Checks whether `block` was remembered and not yet reused.
    ///
    /// Called once per LLC miss; bumps the core's miss counter. A match clears the
    /// block's valid bit, so each remembered miss confirms reuse at most once, and
    /// credits the recorded PC bucket in sampled regions.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn lookup_and_consume(&mut self, core: usize, block: BlockAddr) -> bool {
        let subsector = block.subsector();
        let region = block.region();
        let tag = block.region_tag();
        let state = self.core_mut(core);

        state.misses += 1;

        let Some(way) = state.art[region]
            .entries
            .iter()
            .position(|entry| entry.tag == tag && entry.is_valid(subsector))
        else {
            return false;
        };

        if let Some(slot) = CoreDetector::pc_slot(region, way) {
            let bucket = state.art_pc[slot][subsector];
            state.pcrt[bucket.index()].record_reuse();
        }
        state.art[region].entries[way].valid &= !(1 << subsector);
        true
    }

    /// Whether a miss by `bucket` should be remembered.
    ///
    /// True while the bucket's evidence is ambiguous, and on every
    /// `FORCED_SAMPLE_INTERVAL`-th miss so drifting PCs keep getting sampled.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn should_record(&self, core: usize, bucket: PcBucket) -> bool {
        let state = self.core(core);
        state.pcrt[bucket.index()].is_ambiguous() || state.misses % FORCED_SAMPLE_INTERVAL == 0
    }

    /// Remembers a missed block so a future miss to it can prove reuse.
    ///
    /// If the region already holds the block's tag, the subsector is marked valid
    /// in place. Otherwise the entry under the insertion pointer is replaced; in
    /// sampled regions every subsector it still held unreferenced charges a
    /// no-reuse to the bucket that inserted it.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn record_candidate(&mut self, core: usize, pc: u64, block: BlockAddr) {
        let subsector = block.subsector();
        let region = block.region();
        let tag = block.region_tag();
        let bucket = PcBucket::from_pc(pc);
        let state = self.core_mut(core);

        if let Some(way) = state.art[region].entries.iter().position(|e| e.tag == tag) {
            state.art[region].entries[way].valid |= 1 << subsector;
            if let Some(slot) = CoreDetector::pc_slot(region, way) {
                state.art_pc[slot][subsector] = bucket;
            }
            return;
        }

        let way = state.art[region].insert;
        let evicted = state.art[region].entries[way];

        if let Some(slot) = CoreDetector::pc_slot(region, way) {
            for s in (0..RED_SECTOR_SIZE).filter(|&s| evicted.is_valid(s)) {
                let charged = state.art_pc[slot][s];
                state.pcrt[charged.index()].record_no_reuse();
                debug!(
                    core,
                    region,
                    bucket = charged.index(),
                    "unreferenced ART block charged as no-reuse"
                );
            }
            state.art_pc[slot][subsector] = bucket;
        }

        state.art[region].entries[way] = ArtEntry {
            tag,
            valid: 1 << subsector,
        };
        state.art[region].insert = (way + 1) % RED_WAYS;
    }

    /// Whether a miss by `bucket` should skip LLC insertion.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn should_bypass(&self, core: usize, bucket: PcBucket) -> bool {
        self.core(core).pcrt[bucket.index()].predicts_no_reuse()
    }

    /// Reuse statistics of one PC bucket.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn pc_stats(&self, core: usize, bucket: PcBucket) -> ReuseStats {
        self.core(core).pcrt[bucket.index()]
    }

    /// Misses observed by `core`'s detector.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn misses(&self, core: usize) -> u64 {
        self.core(core).misses
    }

    /// Number of cores tracked.
    pub const fn num_cores(&self) -> usize {
        self.cores.len()
    }
}
