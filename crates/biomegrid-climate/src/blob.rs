//! Organic blob enforcer: snaps raw coordinates to a jittered, noise-warped
//! cell grid before climate sampling.
//!
//! Every raw coordinate in a cell resolves to the same effective sampling
//! point, so the whole cell receives one biome. Two things keep the grid from
//! showing:
//!
//! - each cell centre is displaced by a deterministic per-cell offset;
//! - the raw coordinate is warped by continuous noise before the cell lookup,
//!   so cell borders wander like coastlines instead of running along grid lines.
//!
//! The edge noise deliberately moves the raw coordinate rather than the
//! returned centre. Adding a term that varies with the raw coordinate to the
//! centre would split a cell into many sampling points and break the one
//! biome per cell guarantee.
//!
//! # Limitations
//!
//! `min_blob_size` is a tuning target, not a guarantee. The cell area equals
//! the target, but warping can shave slivers off a cell's border and nothing
//! flood-fills the result to verify the area of each contiguous region.
//! Neighbouring cells that draw the same biome merge into larger regions.

use biomegrid_config::ClimateGridConfig;
use rand::Rng;

use crate::noise_field::{CoherentNoise, SimplexField};
use crate::seed::{cell_rng, derive_noise_seed};

/// Per-cell centre offset bound, as a fraction of the cell size at full irregularity.
pub const CENTRE_JITTER: f64 = 0.3;

/// Edge warp amplitude, as a fraction of the cell size at full irregularity.
pub const EDGE_WARP: f64 = 0.5;

const WARP_X_SALT: u64 = 0xB10B_0001;
const WARP_Z_SALT: u64 = 0xB10B_0002;

/// Remaps coordinates so nearby columns share a sampling point.
pub struct BlobEnforcer {
    cell_size: i64,
    jitter_bound: f64,
    edge_frequency: f64,
    edge_amplitude: f64,
    warp_x: Box<dyn CoherentNoise>,
    warp_z: Box<dyn CoherentNoise>,
}

impl BlobEnforcer {
    /// Creates an enforcer with simplex edge noise seeded from `seed`.
    pub fn new(config: &ClimateGridConfig, seed: u64) -> Self {
        let warp_x = SimplexField::new(derive_noise_seed(seed, WARP_X_SALT));
        let warp_z = SimplexField::new(derive_noise_seed(seed, WARP_Z_SALT));
        Self::with_noise(config, Box::new(warp_x), Box::new(warp_z))
    }

    /// Creates an enforcer with caller-supplied edge noise.
    pub fn with_noise(
        config: &ClimateGridConfig,
        warp_x: Box<dyn CoherentNoise>,
        warp_z: Box<dyn CoherentNoise>,
    ) -> Self {
        let cell_size = cell_size_for(config.min_blob_size);
        let cell = cell_size as f64;
        let irregularity = config.blob_irregularity.clamp(0.0, 1.0);
        let coherence = config.blob_coherence.clamp(0.0, 1.0);
        let noise_scale = config.blob_noise_scale.clamp(0.0, 1.0);

        Self {
            cell_size,
            jitter_bound: irregularity * cell * CENTRE_JITTER,
            edge_frequency: (1.0 + noise_scale) / (cell * (1.0 + coherence)),
            edge_amplitude: irregularity * (1.0 - coherence * 0.5) * cell * EDGE_WARP,
            warp_x,
            warp_z,
        }
    }

    /// Side length of a cell in coordinate units.
    pub fn cell_size(&self) -> i64 {
        self.cell_size
    }

    /// Index of the warped cell containing `(x, z)`.
    pub fn cell_of(&self, x: i64, z: i64) -> (i64, i64) {
        let (wx, wz) = self.warp(x, z);
        let cell = self.cell_size as f64;
        ((wx / cell).floor() as i64, (wz / cell).floor() as i64)
    }

    /// The effective sampling point for `(x, z)`.
    ///
    /// With a cell size of 1 this is the identity.
    pub fn remap(&self, x: i64, z: i64) -> (i64, i64) {
        if self.cell_size == 1 {
            return (x, z);
        }
        let (cell_x, cell_z) = self.cell_of(x, z);
        self.cell_centre(cell_x, cell_z)
    }

    /// Jittered centre of a cell, rounded down to integer coordinates.
    pub fn cell_centre(&self, cell_x: i64, cell_z: i64) -> (i64, i64) {
        let cell = self.cell_size as f64;
        let half = cell * 0.5;
        let (offset_x, offset_z) = if self.jitter_bound > 0.0 {
            (
                cell_jitter(cell_x, cell_z, 0) * self.jitter_bound,
                cell_jitter(cell_x, cell_z, 1) * self.jitter_bound,
            )
        } else {
            (0.0, 0.0)
        };

        let centre_x = cell_x as f64 * cell + half + offset_x;
        let centre_z = cell_z as f64 * cell + half + offset_z;
        (centre_x.floor() as i64, centre_z.floor() as i64)
    }

    fn warp(&self, x: i64, z: i64) -> (f64, f64) {
        let (fx, fz) = (x as f64, z as f64);
        if self.edge_amplitude == 0.0 {
            return (fx, fz);
        }
        let nx = fx * self.edge_frequency;
        let nz = fz * self.edge_frequency;
        (
            fx + self.warp_x.sample_2d(nx, nz) * self.edge_amplitude,
            fz + self.warp_z.sample_2d(nx, nz) * self.edge_amplitude,
        )
    }
}

/// `floor(sqrt(min_blob_size))`, at least 1.
pub fn cell_size_for(min_blob_size: u32) -> i64 {
    (libm::sqrt(f64::from(min_blob_size)).floor() as i64).max(1)
}

/// Deterministic offset in `[-1, 1)` for one axis of a cell.
fn cell_jitter(cell_x: i64, cell_z: i64, axis: u8) -> f64 {
    cell_rng(cell_x, cell_z, axis).random_range(-1.0..1.0)
}
