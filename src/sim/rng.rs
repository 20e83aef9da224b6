//! Injected randomness for serve and reset directions
//!
//! The simulation never calls a global RNG. Everything random about ball
//! direction goes through a `DirectionSource`, so tests can script it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Produces the random sign used to pick a diagonal direction
pub trait DirectionSource {
    /// Either `1.0` or `-1.0`
    fn random_sign(&mut self) -> f32;
}

/// Seeded PCG source used in play
#[derive(Debug, Clone)]
pub struct SeededDirections {
    seed: u64,
    rng: Pcg32,
}

impl SeededDirections {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DirectionSource for SeededDirections {
    fn random_sign(&mut self) -> f32 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }
}

/// Scripted source that cycles through a fixed list of signs
#[derive(Debug, Clone)]
pub struct FixedSigns {
    signs: Vec<f32>,
    next: usize,
}

impl FixedSigns {
    pub fn new(signs: impl Into<Vec<f32>>) -> Self {
        Self {
            signs: signs.into(),
            next: 0,
        }
    }

    /// Every draw returns `sign`
    pub fn always(sign: f32) -> Self {
        Self::new(vec![sign])
    }
}

impl DirectionSource for FixedSigns {
    fn random_sign(&mut self) -> f32 {
        if self.signs.is_empty() {
            return 1.0;
        }
        let sign = self.signs[self.next % self.signs.len()];
        self.next = self.next.wrapping_add(1);
        if sign < 0.0 { -1.0 } else { 1.0 }
    }
}

/// RNG for layout-time choices such as target colors
pub fn layout_rng(seed: u64) -> Pcg32 {
    // Offset keeps layout draws independent of the serve stream
    Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15)
}
