//! Physical and Block Address types.
//!
//! This module defines strong types for the two address granularities the engine sees. It provides the following:
//! 1. **Type Safety:** Distinguishes byte-granular physical addresses from cache-block addresses.
//! 2. **Bit Extraction:** Named accessors for the ReD subsector, region and tag fields.
//! 3. **Construction:** Rebuilding a block address from its fields, used by drivers and tests.

use super::constants::{
    BLOCK_OFFSET_BITS, RED_SECTOR_BITS, RED_SECTOR_SIZE, RED_SETS, RED_SETS_BITS, RED_TAG_BITS,
};

/// Mask for the subsector field of a block address.
const SUBSECTOR_MASK: u64 = (RED_SECTOR_SIZE as u64) - 1;

/// Mask for the region field after shifting out the subsector.
const REGION_MASK: u64 = (RED_SETS as u64) - 1;

/// Mask for the tag field after shifting out region and subsector.
const TAG_MASK: u64 = (1 << RED_TAG_BITS) - 1;

/// Bit position where the ART tag starts.
const TAG_SHIFT: u32 = RED_SETS_BITS + RED_SECTOR_BITS;

/// A physical byte address as delivered by the simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

/// A cache-block address (physical address with the line offset removed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockAddr(pub u64);

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Drops the line offset, yielding the block this address falls in.
    #[inline(always)]
    pub const fn block(self) -> BlockAddr {
        BlockAddr(self.0 >> BLOCK_OFFSET_BITS)
    }
}

impl BlockAddr {
    /// Creates a block address from its raw value.
    #[inline(always)]
    pub const fn new(block: u64) -> Self {
        Self(block)
    }

    /// Builds a block address from ART fields.
    ///
    /// Each field is masked to its width, so out-of-range inputs alias
    /// exactly the way the hardware tables would.
    ///
    /// # Arguments
    ///
    /// * `tag` - ART tag (low `RED_TAG_BITS` bits are used).
    /// * `region` - ART region index (low `RED_SETS_BITS` bits are used).
    /// * `subsector` - Block within the region entry (low `RED_SECTOR_BITS` bits are used).
    pub const fn from_parts(tag: u64, region: usize, subsector: usize) -> Self {
        Self(
            ((tag & TAG_MASK) << TAG_SHIFT)
                | (((region as u64) & REGION_MASK) << RED_SECTOR_BITS)
                | ((subsector as u64) & SUBSECTOR_MASK),
        )
    }

    /// Returns the raw block number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the first byte address of this block.
    #[inline(always)]
    pub const fn to_phys(self) -> PhysAddr {
        PhysAddr(self.0 << BLOCK_OFFSET_BITS)
    }

    /// Index of this block within its ART entry.
    #[inline(always)]
    pub const fn subsector(self) -> usize {
        (self.0 & SUBSECTOR_MASK) as usize
    }

    /// ART region (set) this block maps to.
    #[inline(always)]
    pub const fn region(self) -> usize {
        ((self.0 >> RED_SECTOR_BITS) & REGION_MASK) as usize
    }

    /// Tag stored in the ART for this block's region entry.
    #[inline(always)]
    pub const fn region_tag(self) -> u16 {
        ((self.0 >> TAG_SHIFT) & TAG_MASK) as u16
    }
}
