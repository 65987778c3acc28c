//! Configuration for the replacement engine.
//!
//! This module defines the configuration structure used to parameterize a policy instance.
//! It provides:
//! 1. **Defaults:** Baseline LLC geometry and sampling parameters.
//! 2. **Structures:** `PolicyConfig`, deserializable from JSON with per-field defaults.
//! 3. **Enums:** Replacement policy selection.
//!
//! The simulator driver resolves its configuration tier to a number; the engine only
//! consumes the resulting set count (`PolicyConfig::llc_sets`).

use serde::Deserialize;

use crate::common::PolicyError;

/// Default configuration constants for the engine.
mod defaults {
    /// Cores sharing the LLC.
    pub const NUM_CORES: usize = 4;

    /// LLC associativity.
    pub const LLC_WAYS: usize = 16;

    /// Driver configuration tier.
    pub const CONFIG_NUMBER: u32 = 1;

    /// Highest configuration tier that uses the small LLC.
    pub const SMALL_CONFIG_MAX: u32 = 2;

    /// Sets in the small (single-core tier) LLC.
    pub const SMALL_LLC_SETS: usize = 2048;

    /// Sets in the large (multi-core tier) LLC.
    pub const LARGE_LLC_SETS: usize = 8192;

    /// Sets sampled for SHiP training.
    pub const LEADER_SETS: usize = 64;

    /// Seed for the default random source.
    pub const SEED: u64 = 0x2545_F491_4F6C_DD1D;
}

/// Replacement policy algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PolicyKind {
    /// Hybrid RRIP + SHiP + ReD policy with bypass.
    #[default]
    Adaptive,
    /// Least Recently Used baseline.
    #[serde(alias = "LRU")]
    Lru,
}

/// Root configuration of a replacement policy instance.
///
/// # Examples
///
/// ```
/// use adaptive_llc::config::{PolicyConfig, PolicyKind};
///
/// let json = r#"{ "policy": "Adaptive", "config_number": 3, "leader_sets": 32 }"#;
/// let config = PolicyConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, PolicyKind::Adaptive);
/// assert_eq!(config.llc_sets(), 8192);
/// assert_eq!(config.ways, 16);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Which policy to build.
    #[serde(default)]
    pub policy: PolicyKind,

    /// Number of cores sharing the LLC.
    #[serde(default = "PolicyConfig::default_num_cores")]
    pub num_cores: usize,

    /// LLC associativity.
    #[serde(default = "PolicyConfig::default_ways")]
    pub ways: usize,

    /// Driver configuration tier; tiers up to 2 use the small LLC.
    #[serde(default = "PolicyConfig::default_config_number")]
    pub config_number: u32,

    /// Explicit set count overriding the tier-derived one.
    #[serde(default)]
    pub sets: Option<usize>,

    /// Number of SHiP leader sets.
    #[serde(default = "PolicyConfig::default_leader_sets")]
    pub leader_sets: usize,

    /// Seed for the default random source.
    #[serde(default = "PolicyConfig::default_seed")]
    pub seed: u64,
}

impl PolicyConfig {
    /// Returns the default core count.
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::LLC_WAYS
    }

    /// Returns the default configuration tier.
    fn default_config_number() -> u32 {
        defaults::CONFIG_NUMBER
    }

    /// Returns the default leader set count.
    fn default_leader_sets() -> usize {
        defaults::LEADER_SETS
    }

    /// Returns the default random seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Resolves the number of LLC sets.
    ///
    /// An explicit `sets` wins; otherwise tiers up to 2 get 2048 sets and
    /// larger tiers 8192.
    pub fn llc_sets(&self) -> usize {
        self.sets.unwrap_or(if self.config_number <= defaults::SMALL_CONFIG_MAX {
            defaults::SMALL_LLC_SETS
        } else {
            defaults::LARGE_LLC_SETS
        })
    }

    /// Checks that the geometry can back the engine's tables.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidConfig`] for zero cores, ways or sets, and
    /// [`PolicyError::TooManyLeaderSets`] when more leader sets are requested than exist.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.num_cores == 0 {
            return Err(PolicyError::InvalidConfig("num_cores must be at least 1".into()));
        }
        if self.ways == 0 {
            return Err(PolicyError::InvalidConfig("ways must be at least 1".into()));
        }
        let sets = self.llc_sets();
        if sets == 0 {
            return Err(PolicyError::InvalidConfig("sets must be at least 1".into()));
        }
        if self.leader_sets > sets {
            return Err(PolicyError::TooManyLeaderSets {
                requested: self.leader_sets,
                sets,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Json`] on malformed input and any error from [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for PolicyConfig {
    /// Creates the default configuration: adaptive policy, 4 cores, 16 ways,
    /// tier 1 (2048 sets), 64 leader sets.
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            num_cores: defaults::NUM_CORES,
            ways: defaults::LLC_WAYS,
            config_number: defaults::CONFIG_NUMBER,
            sets: None,
            leader_sets: defaults::LEADER_SETS,
            seed: defaults::SEED,
        }
    }
}
