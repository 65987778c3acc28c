//! Adaptive last-level-cache replacement library.
//!
//! This crate implements the replacement-decision engine of a trace-driven cache simulator:
//! 1. **Policies:** A hybrid RRIP/SHiP/ReD policy with insertion bypass, and an LRU baseline.
//! 2. **Components:** Rank table, signature predictor, reuse detector, random sources.
//! 3. **Common:** Addresses, request types, saturating counters, errors.
//! 4. **Configuration:** LLC geometry and sampling parameters.
//! 5. **Statistics:** Insertion histogram, prefetch downgrades and bypass counts.
//!
//! The simulator owns the tag store and calls into a [`ReplacementPolicy`] once per
//! miss for victim selection and once per access for state update.

/// Common types and constants (addresses, request types, counters, errors).
pub mod common;
/// Policy configuration (defaults, policy selection).
pub mod config;
/// Replacement policies and their components.
pub mod policies;
/// Replacement statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `PolicyConfig::default()` or deserialize from JSON.
pub use crate::config::PolicyConfig;
/// The hybrid replacement engine.
pub use crate::policies::AdaptivePolicy;
/// Interface every policy implements.
pub use crate::policies::{ReplacementPolicy, Victim, build_policy};
/// Statistics snapshot returned by the engine.
pub use crate::stats::PolicyStats;
