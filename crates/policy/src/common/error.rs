//! Policy error definitions.
//!
//! The replacement engine itself cannot fail at run time: index violations are
//! programming errors and panic, counters saturate. Errors only surface at the
//! boundary where configuration and request codes enter the crate.

use thiserror::Error;

/// Errors raised while configuring or feeding a replacement policy.
#[derive(Error, Debug)]
pub enum PolicyError {
    /// A configuration field holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// More leader sets were requested than the cache has sets.
    #[error("cannot sample {requested} leader sets from {sets} sets")]
    TooManyLeaderSets {
        /// Requested number of leader sets.
        requested: usize,
        /// Sets available in the cache.
        sets: usize,
    },

    /// A numeric request code outside LOAD/RFO/PREFETCH/WRITEBACK.
    #[error("unknown access type code {0}")]
    UnknownAccessType(u32),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
