//! Deterministic pseudo-random number generation for angle propagation.
//!
//! The random walk over tile orientations must replay exactly from a seed,
//! both for tests and for reproducing a generated field. A small linear
//! congruential generator keeps that property without any ambient state:
//! callers construct one, pass it in explicitly, and the same seed always
//! yields the same walk.

/// A seeded linear congruential generator over `u64`.
///
/// Multiplier and increment are the Numerical Recipes constants; the high
/// 53 bits feed the float conversions.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Seeded constructor; equal seeds produce equal sequences.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Next raw value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [min, max).
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform in [-span/2, span/2) — the perturbation shape of the angle
    /// walk. A span of zero yields exactly zero.
    #[inline]
    pub fn next_centered(&mut self, span: f64) -> f64 {
        (self.next_f64() - 0.5) * span
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}
