use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Draws the number of requests issued in one simulated second.
pub trait CountSource {
    /// Returns a value in `[0, max]`.
    fn draw(&mut self, max: u32) -> u32;
}

/// Uniform draws backed by any `rand` generator.
pub struct RngCountSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngCountSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngCountSource<XorShiftRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(XorShiftRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(XorShiftRng::from_entropy())
    }
}

impl<R: Rng> CountSource for RngCountSource<R> {
    fn draw(&mut self, max: u32) -> u32 {
        self.rng.gen_range(0..=max)
    }
}

/// Always returns the same count, clamped to the requested maximum.
#[derive(Debug, Clone, Copy)]
pub struct ConstantCount(pub u32);

impl CountSource for ConstantCount {
    fn draw(&mut self, max: u32) -> u32 {
        self.0.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut source = RngCountSource::seeded(244);
        for max in [0, 1, 5, 20] {
            for _ in 0..500 {
                assert!(source.draw(max) <= max);
            }
        }
    }

    #[test]
    fn test_rng_hits_both_bounds() {
        let mut source = RngCountSource::seeded(7);
        let draws: Vec<u32> = (0..1000).map(|_| source.draw(3)).collect();
        assert!(draws.contains(&0));
        assert!(draws.contains(&3));
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RngCountSource::seeded(42);
        let mut b = RngCountSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.draw(10), b.draw(10));
        }
    }

    #[test]
    fn test_constant_count_clamps() {
        let mut source = ConstantCount(20);
        assert_eq!(source.draw(20), 20);
        assert_eq!(source.draw(5), 5);
        assert_eq!(source.draw(0), 0);
    }
}
