//! Saturating counters.
//!
//! Small unsigned counters clamped to `[0, MAX]`. Increment and decrement never
//! wrap; they stop at the bounds.

/// Increments `value`, stopping at `max`.
#[inline(always)]
pub const fn sat_inc(value: u8, max: u8) -> u8 {
    if value < max { value + 1 } else { value }
}

/// Decrements `value`, stopping at zero.
#[inline(always)]
pub const fn sat_dec(value: u8) -> u8 {
    if value > 0 { value - 1 } else { value }
}

/// An unsigned counter saturating at `0` and `MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SatCounter<const MAX: u8>(u8);

impl<const MAX: u8> SatCounter<MAX> {
    /// Creates a counter, clamping `value` to `MAX`.
    #[inline(always)]
    pub const fn new(value: u8) -> Self {
        Self(if value > MAX { MAX } else { value })
    }

    /// Current value.
    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Adds one unless already at `MAX`.
    #[inline(always)]
    pub const fn increment(&mut self) {
        self.0 = sat_inc(self.0, MAX);
    }

    /// Subtracts one unless already at zero.
    #[inline(always)]
    pub const fn decrement(&mut self) {
        self.0 = sat_dec(self.0);
    }

    /// Whether the counter sits at zero.
    #[inline(always)]
    pub const fn is_min(self) -> bool {
        self.0 == 0
    }

    /// Whether the counter sits at `MAX`.
    #[inline(always)]
    pub const fn is_max(self) -> bool {
        self.0 == MAX
    }
}
