//! Cache Replacement Policies.
//!
//! Implements algorithms for choosing LLC victims and maintaining per-line state.
//!
//! # Policies
//!
//! - `Adaptive`: RRIP ranks, SHiP insertion prediction and ReD bypass combined.
//! - `Lru`: Least Recently Used baseline.
//!
//! # Components
//!
//! - `rrip`: per-line rank table and insertion rank choice.
//! - `ship`: signature counters and leader-set sampling.
//! - `red`: address reuse table and per-PC reuse statistics.
//! - `random`: injectable random sources.

/// Hybrid RRIP/SHiP/ReD replacement engine.
pub mod adaptive;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random sources for sampling and probabilistic insertion.
pub mod random;

/// Reuse detector (ART + per-PC reuse statistics).
pub mod red;

/// Re-reference interval prediction rank table.
pub mod rrip;

/// Signature-based hit predictor.
pub mod ship;

pub use adaptive::AdaptivePolicy;
pub use lru::LruPolicy;
pub use random::{RandomSource, XorShiftRng};
pub use red::{PcBucket, ReuseDetector, ReuseStats};
pub use rrip::{LineState, RankTable, insertion_rank};
pub use ship::{LeaderSets, ShipCounter, Signature, SignatureTable};

use crate::common::{Access, PolicyError};
use crate::config::{PolicyConfig, PolicyKind};

/// Outcome of victim selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victim {
    /// Evict this way and fill it.
    Way(usize),
    /// Do not allocate a line for this miss.
    Bypass,
}

impl Victim {
    /// Encodes the decision as a way index, with `ways` standing for bypass.
    #[inline(always)]
    pub const fn to_way_index(self, ways: usize) -> usize {
        match self {
            Self::Way(way) => way,
            Self::Bypass => ways,
        }
    }

    /// Whether the miss should skip insertion.
    #[inline(always)]
    pub const fn is_bypass(self) -> bool {
        matches!(self, Self::Bypass)
    }
}

/// Trait for LLC replacement policies.
///
/// The driver calls [`select_victim`](Self::select_victim) on every miss before
/// touching the tag store, then [`update_state`](Self::update_state) for every
/// access once the hit or fill is resolved. Calls are serialized.
pub trait ReplacementPolicy: Send {
    /// Selects the line to replace for a missing access.
    ///
    /// # Arguments
    ///
    /// * `access` - The missing access.
    ///
    /// # Returns
    ///
    /// The way to evict, or [`Victim::Bypass`] to skip insertion.
    fn select_victim(&mut self, access: &Access) -> Victim;

    /// Updates the policy state after an access has been resolved.
    ///
    /// # Arguments
    ///
    /// * `access` - The access.
    /// * `way` - The hit way or the filled way; `ways` if the fill was bypassed.
    /// * `hit` - Whether the access hit.
    fn update_state(&mut self, access: &Access, way: usize, hit: bool);
}

/// Builds the policy selected by `config`.
///
/// # Errors
///
/// Returns any validation error of `config`.
pub fn build_policy(config: &PolicyConfig) -> Result<Box<dyn ReplacementPolicy>, PolicyError> {
    config.validate()?;
    let policy: Box<dyn ReplacementPolicy> = match config.policy {
        PolicyKind::Adaptive => Box::new(AdaptivePolicy::new(config)?),
        PolicyKind::Lru => Box::new(LruPolicy::new(config.llc_sets(), config.ways)),
    };
    Ok(policy)
}
