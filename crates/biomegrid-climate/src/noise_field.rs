//! Coherent 2D noise behind a small trait so the climate and blob code does
//! not depend on a particular noise implementation.

use noise::{NoiseFn, Simplex};

/// A smooth 2D noise field.
pub trait CoherentNoise: Send + Sync {
    /// Samples the field at `(x, z)`. Returns a value in `[-1, 1]`.
    fn sample_2d(&self, x: f64, z: f64) -> f64;
}

/// Simplex noise from the `noise` crate.
pub struct SimplexField {
    noise: Simplex,
}

impl SimplexField {
    /// Creates a field with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
        }
    }
}

impl CoherentNoise for SimplexField {
    fn sample_2d(&self, x: f64, z: f64) -> f64 {
        self.noise.get([x, z]).clamp(-1.0, 1.0)
    }
}

/// A field that returns the same value everywhere.
#[derive(Clone, Copy, Debug)]
pub struct ConstantNoise(pub f64);

impl CoherentNoise for ConstantNoise {
    fn sample_2d(&self, _x: f64, _z: f64) -> f64 {
        self.0.clamp(-1.0, 1.0)
    }
}
