//! Replacement statistics collection and reporting.
//!
//! This module tracks what the adaptive policy decided over a run. It provides:
//! 1. **Insertion distribution:** Fills per request type and assigned rank.
//! 2. **Prefetch downgrades:** Prefetched lines demoted on their first hit.
//! 3. **Bypasses:** Misses the reuse detector kept out of the cache.
//!
//! A `PolicyStats` is a snapshot; it prints in the simulator's report layout and
//! serializes to JSON for scripted post-processing.

use std::fmt;

use serde::Serialize;

use crate::common::constants::MAX_RANK;
use crate::common::{AccessType, PolicyError};

/// Number of distinct rank values.
pub const RANK_LEVELS: usize = MAX_RANK as usize + 1;

/// Snapshot of the adaptive policy's decision counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyStats {
    /// Fills by request type (row, in [`AccessType::index`] order) and assigned rank (column).
    pub insertion_distribution: [[u64; RANK_LEVELS]; AccessType::COUNT],
    /// Prefetched lines demoted to `MAX_RANK` on their first hit.
    pub prefetch_downgrades: u64,
    /// Misses answered with a bypass instead of a victim.
    pub bypasses: u64,
}

impl PolicyStats {
    /// Counts one fill of type `kind` at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank > MAX_RANK`.
    pub fn record_insertion(&mut self, kind: AccessType, rank: u8) {
        self.insertion_distribution[kind.index()][rank as usize] += 1;
    }

    /// Fills of type `kind` at `rank`.
    pub fn insertions(&self, kind: AccessType, rank: u8) -> u64 {
        self.insertion_distribution[kind.index()]
            .get(rank as usize)
            .copied()
            .unwrap_or(0)
    }

    /// All fills of type `kind`, over every rank.
    pub fn total_insertions(&self, kind: AccessType) -> u64 {
        self.insertion_distribution[kind.index()].iter().sum()
    }

    /// Serializes the snapshot as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for PolicyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "LLC REPLACEMENT STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "INSERTION DISTRIBUTION (rank 0..{MAX_RANK})")?;
        for kind in AccessType::ALL {
            write!(f, "  {:<10}", kind.label())?;
            for count in &self.insertion_distribution[kind.index()] {
                write!(f, " {count:>10}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "  prefetch.downgrades    {}", self.prefetch_downgrades)?;
        writeln!(f, "  red.bypasses           {}", self.bypasses)?;
        writeln!(f, "==========================================================")
    }
}
