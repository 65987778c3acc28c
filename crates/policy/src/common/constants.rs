//! Global Policy Constants.
//!
//! This module defines the fixed geometry shared by every table the engine owns. It includes:
//! 1. **Address Constants:** Block size and the bit widths used to slice a block address.
//! 2. **RRIP Constants:** Width and bounds of the per-line re-reference value.
//! 3. **SHiP Constants:** Signature table size and counter bounds.
//! 4. **ReD Constants:** Address Reuse Table geometry, PC bucketing and counter limits.

/// Number of bits to shift a physical address to obtain its block address (64-byte lines).
pub const BLOCK_OFFSET_BITS: u32 = 6;

/// Largest re-reference prediction value (2-bit RRPV).
pub const MAX_RANK: u8 = 3;

/// Rank given to fills with no strong prediction ("distant but not immediate").
pub const NEUTRAL_RANK: u8 = MAX_RANK - 1;

/// Percentage of cold-signature fills inserted at `MAX_RANK`; the rest get `NEUTRAL_RANK`.
pub const DISTANT_INSERT_PERCENT: u32 = 95;

/// Upper bound of a SHiP signature counter (3-bit).
pub const MAX_SHCT: u8 = 7;

/// Initial value of every SHiP signature counter.
pub const SHCT_INIT: u8 = 1;

/// Number of bits in a SHiP signature.
pub const SHCT_BITS: u32 = 14;

/// Entries in each per-core signature history counter table.
pub const SHCT_SIZE: usize = 1 << SHCT_BITS;

/// Number of bits selecting an ART region.
pub const RED_SETS_BITS: u32 = 9;

/// Number of regions in each per-core Address Reuse Table.
pub const RED_SETS: usize = 1 << RED_SETS_BITS;

/// Associativity of each ART region.
pub const RED_WAYS: usize = 16;

/// Number of bits stored in an ART tag.
pub const RED_TAG_BITS: u32 = 11;

/// Number of bits selecting a subsector (block) within a region entry.
pub const RED_SECTOR_BITS: u32 = 2;

/// Blocks covered by one ART entry.
pub const RED_SECTOR_SIZE: usize = 1 << RED_SECTOR_BITS;

/// One in every `RED_PC_FRACTION` regions records the PC bucket of its insertions.
pub const RED_PC_FRACTION: usize = 4;

/// Number of low PC bits dropped before bucketing (instruction alignment).
pub const PC_BUCKET_SHIFT: u32 = 2;

/// Number of bits selecting a PC bucket.
pub const PC_BUCKET_BITS: u32 = 8;

/// Number of PC buckets in each per-core reuse table.
pub const PC_BUCKETS: usize = 1 << PC_BUCKET_BITS;

/// Reuse/no-reuse counters are halved together once either exceeds this value.
pub const REUSE_COUNTER_LIMIT: u32 = 1023;

/// Initial reuse count of every PC bucket (optimistic start).
pub const INITIAL_REUSE: u32 = 3;

/// Every `FORCED_SAMPLE_INTERVAL`-th miss is recorded regardless of confidence.
pub const FORCED_SAMPLE_INTERVAL: u64 = 8;

/// A bucket is "ambiguous" while `reuse * AMBIGUITY_FACTOR > no_reuse`.
pub const AMBIGUITY_FACTOR: u32 = 64;

/// A bucket predicts no reuse when `reuse * BYPASS_FACTOR < no_reuse`.
pub const BYPASS_FACTOR: u32 = 3;
