use adaptive_llc::policies::RandomSource;
use mockall::mock;

mock! {
    pub Rng {}
    impl RandomSource for Rng {
        fn next_u32(&mut self) -> u32;
    }
}

/// A random source that returns 1, 2, 3, ... on successive draws.
///
/// With `n` leader sets sampled from more than `n` sets, the leaders are
/// exactly sets `1..=n`, and later zero-counter fills draw values whose
/// `% 100` stays at or above 5 until the hundredth draw.
pub fn counting_rng() -> MockRng {
    let mut rng = MockRng::new();
    let mut next = 0_u32;
    let _ = rng.expect_next_u32().returning(move || {
        next += 1;
        next
    });
    rng
}

/// A random source that always returns `value`.
pub fn constant_rng(value: u32) -> MockRng {
    let mut rng = MockRng::new();
    let _ = rng.expect_next_u32().return_const(value);
    rng
}
