/// Seed drawn from JavaScript's Math.random, one byte at a time.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    (0..8).fold(0, |seed, _| (seed << 8) | (256. * random()) as u64 & 0xff)
}
