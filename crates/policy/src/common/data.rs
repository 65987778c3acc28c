//! Memory Access Types.
//!
//! This module defines the classification of LLC requests and the access record handed
//! to a replacement policy. These types are used for the following:
//! 1. **Reuse Detection:** Only demand and prefetch requests consult the reuse detector.
//! 2. **Insertion Policy:** Writebacks and prefetches receive dedicated insertion ranks.
//! 3. **Statistics Tracking:** The insertion histogram is keyed by request type.

use super::addr::PhysAddr;
use super::error::PolicyError;

/// Type of LLC request.
///
/// Discriminants match the simulator's numeric request codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Demand load.
    Load = 0,

    /// Read-for-ownership (store miss in an upper level).
    Rfo = 1,

    /// Hardware prefetch request.
    Prefetch = 2,

    /// Dirty eviction from an upper level.
    ///
    /// Writebacks never carry reuse information and never query the reuse detector.
    Writeback = 3,
}

impl AccessType {
    /// Number of request types.
    pub const COUNT: usize = 4;

    /// All request types in code order.
    pub const ALL: [Self; Self::COUNT] = [Self::Load, Self::Rfo, Self::Prefetch, Self::Writeback];

    /// Row index used by per-type statistics tables.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this request asks the reuse detector for admission.
    #[inline(always)]
    pub const fn seeks_reuse(self) -> bool {
        matches!(self, Self::Load | Self::Rfo | Self::Prefetch)
    }

    /// Short upper-case label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Load => "LOAD",
            Self::Rfo => "RFO",
            Self::Prefetch => "PREFETCH",
            Self::Writeback => "WRITEBACK",
        }
    }
}

impl TryFrom<u32> for AccessType {
    type Error = PolicyError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Load),
            1 => Ok(Self::Rfo),
            2 => Ok(Self::Prefetch),
            3 => Ok(Self::Writeback),
            other => Err(PolicyError::UnknownAccessType(other)),
        }
    }
}

/// A single LLC access as seen by the replacement policy.
///
/// The way and hit flag are passed separately to the update call because they are
/// only known after the tag store has resolved the access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Core that issued the request.
    pub core: usize,
    /// LLC set index.
    pub set: usize,
    /// Physical address of the requested line.
    pub paddr: PhysAddr,
    /// Program counter of the instruction responsible for the request.
    pub pc: u64,
    /// Address of the line being evicted (zero when none).
    pub victim_addr: PhysAddr,
    /// Request type.
    pub kind: AccessType,
}

impl Access {
    /// Creates an access record with no victim address.
    pub const fn new(core: usize, set: usize, paddr: PhysAddr, pc: u64, kind: AccessType) -> Self {
        Self {
            core,
            set,
            paddr,
            pc,
            victim_addr: PhysAddr(0),
            kind,
        }
    }

    /// Returns a copy carrying the given victim address.
    #[must_use]
    pub const fn with_victim(mut self, victim_addr: PhysAddr) -> Self {
        self.victim_addr = victim_addr;
        self
    }
}
