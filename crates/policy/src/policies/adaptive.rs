//! Adaptive LLC replacement engine.
//!
//! Combines three mechanisms:
//! 1. **ReD admission:** on a demand or prefetch miss, the reuse detector may
//!    answer [`Victim::Bypass`] for PCs whose misses are rarely reused.
//! 2. **RRIP eviction:** otherwise the victim is the first line at `MAX_RANK`,
//!    aging the set as needed.
//! 3. **SHiP insertion:** fills are ranked from their signature's counter; leader
//!    sets train those counters on first hits and on evictions.
//!
//! Every access reaches [`ReplacementPolicy::update_state`]; only misses reach
//! [`ReplacementPolicy::select_victim`]. Writebacks never consult the detector.

use tracing::{info, trace};

use super::random::{RandomSource, XorShiftRng};
use super::red::{PcBucket, ReuseDetector};
use super::rrip::{LineState, RankTable, insertion_rank};
use super::ship::{LeaderSets, ShipCounter, Signature, SignatureTable};
use super::{ReplacementPolicy, Victim};
use crate::common::{Access, AccessType, PolicyError};
use crate::config::PolicyConfig;
use crate::stats::PolicyStats;

/// Hybrid RRIP/SHiP/ReD policy state.
#[derive(Debug)]
pub struct AdaptivePolicy<R = XorShiftRng> {
    ranks: RankTable,
    shct: SignatureTable,
    leaders: LeaderSets,
    detector: ReuseDetector,
    stats: PolicyStats,
    num_cores: usize,
    rng: R,
}

impl AdaptivePolicy<XorShiftRng> {
    /// Initializes the policy using the seeded default random source.
    ///
    /// # Errors
    ///
    /// Returns any validation error of `config`.
    pub fn new(config: &PolicyConfig) -> Result<Self, PolicyError> {
        Self::with_rng(config, XorShiftRng::new(config.seed))
    }
}

impl<R: RandomSource> AdaptivePolicy<R> {
    /// Initializes the policy drawing randomness from `rng`.
    ///
    /// All lines start at `MAX_RANK` with clear flags, signature counters at their
    /// initial value, reuse tables empty with optimistic PC statistics, and the
    /// leader sets sampled from `rng`.
    ///
    /// # Errors
    ///
    /// Returns any validation error of `config`.
    pub fn with_rng(config: &PolicyConfig, mut rng: R) -> Result<Self, PolicyError> {
        config.validate()?;
        let sets = config.llc_sets();
        let leaders = LeaderSets::sample(sets, config.leader_sets, &mut rng)?;

        info!(
            sets,
            ways = config.ways,
            cores = config.num_cores,
            leaders = leaders.len(),
            "initialized adaptive LLC replacement state"
        );

        Ok(Self {
            ranks: RankTable::new(sets, config.ways),
            shct: SignatureTable::new(config.num_cores),
            leaders,
            detector: ReuseDetector::new(config.num_cores),
            stats: PolicyStats::default(),
            num_cores: config.num_cores,
            rng,
        })
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.ranks.sets()
    }

    /// Associativity; also the bypass sentinel way.
    pub const fn ways(&self) -> usize {
        self.ranks.ways()
    }

    /// Number of cores.
    pub const fn num_cores(&self) -> usize {
        self.num_cores
    }

    /// Rank of one line.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn rank(&self, set: usize, way: usize) -> u8 {
        self.ranks.rank(set, way)
    }

    /// Replacement metadata of one line.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn line(&self, set: usize, way: usize) -> &LineState {
        self.ranks.line(set, way)
    }

    /// SHiP counter for `sig` in `core`'s table.
    ///
    /// # Panics
    ///
    /// Panics if `core` is out of range.
    pub fn signature_counter(&self, core: usize, sig: Signature) -> ShipCounter {
        self.shct.counter(core, sig)
    }

    /// Whether `set` trains the signature predictor.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range.
    pub fn is_leader_set(&self, set: usize) -> bool {
        self.leaders.contains(set)
    }

    /// The sampled leader sets.
    pub const fn leader_sets(&self) -> &LeaderSets {
        &self.leaders
    }

    /// Read access to the reuse detector.
    pub const fn detector(&self) -> &ReuseDetector {
        &self.detector
    }

    /// Snapshot of the insertion histogram and downgrade/bypass counters.
    pub fn report_statistics(&self) -> PolicyStats {
        self.stats.clone()
    }

    fn check_access(&self, access: &Access) {
        assert!(
            access.core < self.num_cores,
            "core {} out of range (cores = {})",
            access.core,
            self.num_cores
        );
        assert!(
            access.set < self.sets(),
            "set {} out of range (sets = {})",
            access.set,
            self.sets()
        );
    }

    /// Demand/prefetch hit: promote and demote unconsumed prefetches.
    fn on_hit(&mut self, set: usize, way: usize) {
        self.ranks.promote(set, way);
        if self.ranks.demote_prefetch(set, way) {
            self.stats.prefetch_downgrades += 1;
        }
        if self.leaders.contains(set) {
            self.confirm_on_hit(set, way);
        }
    }

    /// Rewards the line's signature on its first hit since the fill.
    fn confirm_on_hit(&mut self, set: usize, way: usize) {
        let line = self.ranks.line_mut(set, way);
        if !line.reused {
            line.reused = true;
            self.shct.reward(line.fill_core, line.signature);
        }
    }

    /// Trains the outgoing line's signature: reused lines reward it, dead ones
    /// penalize it.
    fn train_on_eviction(&mut self, set: usize, way: usize) {
        let line = self.ranks.line(set, way);
        if line.reused {
            self.shct.reward(line.fill_core, line.signature);
        } else {
            self.shct.penalize(line.fill_core, line.signature);
        }
    }

    /// Fill after a miss: train on the outgoing line, then install the new one.
    fn on_fill(&mut self, access: &Access, way: usize) {
        let set = access.set;
        if self.leaders.contains(set) {
            self.train_on_eviction(set, way);
        }

        let is_prefetch = access.kind == AccessType::Prefetch;
        let signature = Signature::new(access.pc, is_prefetch);
        let rank = insertion_rank(
            access.kind,
            self.shct.counter(access.core, signature),
            &mut self.rng,
        );

        *self.ranks.line_mut(set, way) = LineState {
            rank,
            is_prefetch,
            reused: false,
            signature,
            fill_core: access.core,
        };
        self.stats.record_insertion(access.kind, rank);
    }
}

impl<R: RandomSource> ReplacementPolicy for AdaptivePolicy<R> {
    /// Asks the reuse detector for admission, then falls back to RRIP.
    ///
    /// # Panics
    ///
    /// Panics if the core or set index is out of range.
    fn select_victim(&mut self, access: &Access) -> Victim {
        self.check_access(access);

        if access.kind.seeks_reuse() {
            let block = access.paddr.block();
            if !self.detector.lookup_and_consume(access.core, block) {
                let bucket = PcBucket::from_pc(access.pc);
                if self.detector.should_record(access.core, bucket) {
                    self.detector.record_candidate(access.core, access.pc, block);
                }
                if self.detector.should_bypass(access.core, bucket) {
                    self.stats.bypasses += 1;
                    trace!(
                        core = access.core,
                        set = access.set,
                        pc = access.pc,
                        bucket = bucket.index(),
                        "bypassing LLC fill"
                    );
                    return Victim::Bypass;
                }
            }
        }

        Victim::Way(self.ranks.select_victim(access.set))
    }

    /// Applies hit promotion or fill insertion for one resolved access.
    ///
    /// # Panics
    ///
    /// Panics if the core, set or way index is out of range. `way == ways` is
    /// accepted on a miss and means the fill was bypassed.
    fn update_state(&mut self, access: &Access, way: usize, hit: bool) {
        self.check_access(access);

        if !hit && way == self.ways() {
            trace!(core = access.core, set = access.set, "bypassed fill, no state change");
            return;
        }
        assert!(
            way < self.ways(),
            "way {way} out of range (ways = {})",
            self.ways()
        );

        if hit {
            if access.kind != AccessType::Writeback {
                self.on_hit(access.set, way);
            }
        } else {
            self.on_fill(access, way);
        }
    }
}
