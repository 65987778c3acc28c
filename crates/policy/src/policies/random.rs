//! Random sources for policy decisions.
//!
//! Leader-set sampling and the probabilistic distant insertion draw from a
//! `RandomSource` owned by the policy, so runs are reproducible from a seed and
//! tests can substitute a scripted source. The default generator is a 64-bit
//! xorshift, cheap enough for the per-fill path.

/// Source of uniformly distributed 32-bit values.
pub trait RandomSource: Send {
    /// Returns the next value.
    fn next_u32(&mut self) -> u32;
}

/// Xorshift64 pseudo-random generator.
#[derive(Clone, Debug)]
pub struct XorShiftRng {
    /// Internal state; never zero.
    state: u64,
}

impl XorShiftRng {
    /// Creates a generator from `seed`.
    ///
    /// A zero seed would lock xorshift at zero forever, so it is replaced by a
    /// fixed non-zero constant.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 123_456_789 } else { seed },
        }
    }
}

impl RandomSource for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        (x >> 32) as u32
    }
}
