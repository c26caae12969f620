//! Climate field: maps integer world coordinates to a (temperature, moisture) vector.
//!
//! Temperature follows a linear gradient along Z (north cold, south warm by
//! default) and moisture along X, both anchored at the spawn origin. Past the
//! boundary radius the distance is either clamped or folded back on itself so
//! the climate oscillates instead of saturating. Two coherent-noise fields add
//! a small perturbation on top.

use biomegrid_config::{ClimateGridConfig, ConfigError};

use crate::noise_field::{CoherentNoise, SimplexField};
use crate::seed::derive_noise_seed;

/// Fixed weight of the noise perturbation before `noise_amplitude` is applied.
pub const NOISE_WEIGHT: f64 = 0.1;

const TEMPERATURE_SALT: u64 = 0x7E3A_0001;
const MOISTURE_SALT: u64 = 0x3015_7002;

// ---------------------------------------------------------------------------
// ClimateVector
// ---------------------------------------------------------------------------

/// A point in climate space. Both components always lie in `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateVector {
    temperature: f64,
    moisture: f64,
}

impl ClimateVector {
    /// Creates a vector, clamping both components into `[-1, 1]`.
    ///
    /// NaN components become 0.
    pub fn new(temperature: f64, moisture: f64) -> Self {
        Self {
            temperature: clamp_unit(temperature),
            moisture: clamp_unit(moisture),
        }
    }

    /// Temperature in `[-1, 1]`.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Moisture in `[-1, 1]`.
    pub fn moisture(&self) -> f64 {
        self.moisture
    }

    /// Euclidean distance in climate space.
    pub fn distance(&self, other: &ClimateVector) -> f64 {
        let dt = self.temperature - other.temperature;
        let dm = self.moisture - other.moisture;
        libm::sqrt(dt * dt + dm * dm)
    }
}

#[inline]
fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(-1.0, 1.0) }
}

#[inline]
fn lerp(t: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * t
}

/// Folds a signed distance from spawn into `[-boundary, boundary]`.
///
/// Without reversal the distance saturates at the boundary. With reversal it
/// follows a triangle wave of period `4 * boundary`: unchanged inside the
/// boundary, then mirrored back towards and through the origin, so the result
/// is continuous for every input.
///
/// `boundary` must be positive.
pub fn fold_distance(dist: i64, boundary: i64, reversal: bool) -> i64 {
    if !reversal {
        return dist.clamp(-boundary, boundary);
    }

    let b = i128::from(boundary);
    let phase = (i128::from(dist) + b).rem_euclid(4 * b);
    let folded = if phase <= 2 * b {
        phase - b
    } else {
        3 * b - phase
    };
    folded as i64
}

// ---------------------------------------------------------------------------
// ClimateField
// ---------------------------------------------------------------------------

/// Pure coordinate → climate function over an immutable configuration.
pub struct ClimateField {
    config: ClimateGridConfig,
    temperature_noise: Box<dyn CoherentNoise>,
    moisture_noise: Box<dyn CoherentNoise>,
}

impl ClimateField {
    /// Creates a field with simplex perturbation seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails validation.
    pub fn new(config: ClimateGridConfig, seed: u64) -> Result<Self, ConfigError> {
        let temperature = SimplexField::new(derive_noise_seed(seed, TEMPERATURE_SALT));
        let moisture = SimplexField::new(derive_noise_seed(seed, MOISTURE_SALT));
        Self::with_noise(config, Box::new(temperature), Box::new(moisture))
    }

    /// Creates a field with caller-supplied noise sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails validation.
    pub fn with_noise(
        config: ClimateGridConfig,
        temperature_noise: Box<dyn CoherentNoise>,
        moisture_noise: Box<dyn CoherentNoise>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            temperature_noise,
            moisture_noise,
        })
    }

    /// The configuration this field was built from.
    pub fn config(&self) -> &ClimateGridConfig {
        &self.config
    }

    /// Climate from the gradients alone, before noise.
    pub fn gradient(&self, x: i64, z: i64) -> ClimateVector {
        let cfg = &self.config;
        let dist_x = fold_distance(x.saturating_sub(cfg.spawn_x), cfg.boundary, cfg.reversal);
        let dist_z = fold_distance(z.saturating_sub(cfg.spawn_z), cfg.boundary, cfg.reversal);

        let boundary = cfg.boundary as f64;
        let ratio_x = (dist_x.unsigned_abs() as f64 / boundary).clamp(0.0, 1.0);
        let ratio_z = (dist_z.unsigned_abs() as f64 / boundary).clamp(0.0, 1.0);

        let temperature = if dist_z < 0 {
            lerp(ratio_z, cfg.temp_spawn, cfg.temp_north)
        } else {
            lerp(ratio_z, cfg.temp_spawn, cfg.temp_south)
        };
        let moisture = if dist_x < 0 {
            lerp(ratio_x, cfg.moist_spawn, cfg.moist_west)
        } else {
            lerp(ratio_x, cfg.moist_spawn, cfg.moist_east)
        };

        ClimateVector::new(temperature, moisture)
    }

    /// Samples the climate at `(x, z)`, including noise perturbation.
    pub fn sample(&self, x: i64, z: i64) -> ClimateVector {
        let base = self.gradient(x, z);
        let amplitude = self.config.noise_amplitude;
        if amplitude == 0.0 {
            return base;
        }

        let scale = self.config.noise_scale * 100.0;
        let nx = x as f64 / scale;
        let nz = z as f64 / scale;
        let weight = NOISE_WEIGHT * amplitude;

        ClimateVector::new(
            base.temperature + self.temperature_noise.sample_2d(nx, nz) * weight,
            base.moisture + self.moisture_noise.sample_2d(nx, nz) * weight,
        )
    }
}
