//! Unit tests for the replacement policies.



/// LRU baseline.
pub mod lru;

/// Randomized invariants.
pub mod properties;
