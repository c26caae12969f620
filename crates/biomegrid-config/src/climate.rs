//! Climate grid parameters for a single dimension.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Resolved climate-grid settings for one dimension context.
///
/// Gradients run from the spawn origin towards the boundary radius: temperature
/// along Z (north is negative Z), moisture along X (west is negative X).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClimateGridConfig {
    /// Distance from spawn at which the gradient endpoints are reached.
    pub boundary: i64,
    /// X coordinate of the gradient origin.
    pub spawn_x: i64,
    /// Z coordinate of the gradient origin.
    pub spawn_z: i64,
    /// Temperature at `spawn_z - boundary`.
    pub temp_north: f64,
    /// Temperature at `spawn_z + boundary`.
    pub temp_south: f64,
    /// Temperature at the origin.
    pub temp_spawn: f64,
    /// Moisture at `spawn_x - boundary`.
    pub moist_west: f64,
    /// Moisture at `spawn_x + boundary`.
    pub moist_east: f64,
    /// Moisture at the origin.
    pub moist_spawn: f64,
    /// Mirror the gradients past the boundary instead of saturating.
    pub reversal: bool,
    /// Multiplier on the climate noise perturbation. 0 disables it.
    pub noise_amplitude: f64,
    /// Spatial scale of the climate noise; sampled at `coord / (noise_scale * 100)`.
    pub noise_scale: f64,
    /// Target minimum area of a contiguous biome region, in coordinate units squared.
    pub min_blob_size: u32,
    /// How far blob centres and edges stray from the regular cell grid, in `[0, 1]`.
    pub blob_irregularity: f64,
    /// How strongly blob edges follow their cell, in `[0, 1]`.
    pub blob_coherence: f64,
    /// Frequency multiplier of the blob edge noise, in `[0, 1]`.
    pub blob_noise_scale: f64,
    /// Maximum climate distance between a location and a candidate biome.
    pub tolerance: f64,
}

impl Default for ClimateGridConfig {
    fn default() -> Self {
        Self {
            boundary: 10_000,
            spawn_x: 0,
            spawn_z: 0,
            temp_north: -1.0,
            temp_south: 1.0,
            temp_spawn: 0.0,
            moist_west: 1.0,
            moist_east: -1.0,
            moist_spawn: 0.0,
            reversal: true,
            noise_amplitude: 1.0,
            noise_scale: 1.0,
            min_blob_size: 64,
            blob_irregularity: 0.5,
            blob_coherence: 0.5,
            blob_noise_scale: 0.5,
            tolerance: 0.5,
        }
    }
}

impl ClimateGridConfig {
    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boundary <= 0 {
            return Err(ConfigError::invalid(
                "boundary",
                format!("must be positive, got {}", self.boundary),
            ));
        }

        let endpoints = [
            ("temp_north", self.temp_north),
            ("temp_south", self.temp_south),
            ("temp_spawn", self.temp_spawn),
            ("moist_west", self.moist_west),
            ("moist_east", self.moist_east),
            ("moist_spawn", self.moist_spawn),
        ];
        for (field, value) in endpoints {
            if !(-1.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("gradient endpoint must lie in [-1, 1], got {value}"),
                ));
            }
        }

        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ConfigError::invalid(
                "noise_amplitude",
                format!("must be a non-negative number, got {}", self.noise_amplitude),
            ));
        }
        if !self.noise_scale.is_finite() || self.noise_scale <= 0.0 {
            return Err(ConfigError::invalid(
                "noise_scale",
                format!("must be positive, got {}", self.noise_scale),
            ));
        }
        if self.min_blob_size == 0 {
            return Err(ConfigError::invalid("min_blob_size", "must be at least 1"));
        }

        let coefficients = [
            ("blob_irregularity", self.blob_irregularity),
            ("blob_coherence", self.blob_coherence),
            ("blob_noise_scale", self.blob_noise_scale),
        ];
        for (field, value) in coefficients {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must lie in [0, 1], got {value}"),
                ));
            }
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::invalid(
                "tolerance",
                format!("must be a non-negative number, got {}", self.tolerance),
            ));
        }

        Ok(())
    }
}
