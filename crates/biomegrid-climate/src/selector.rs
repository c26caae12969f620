//! Climate-matching selector: picks one biome from a pool for a climate vector.
//!
//! Candidates within the tolerance radius are weighted by inverse climate
//! distance and drawn with an RNG seeded from the coordinate, so the result is
//! a pure function of `(climate, pool, x, z)`.

use rand::Rng;

use crate::biome::{BiomeId, CandidatePool};
use crate::climate::ClimateVector;
use crate::seed::coordinate_rng;

/// Added to the distance before inversion; caps the weight of an exact match at 10.
pub const WEIGHT_EPSILON: f64 = 0.1;

/// Weight of a candidate at climate distance `distance`.
#[inline]
pub fn candidate_weight(distance: f64) -> f64 {
    1.0 / (distance + WEIGHT_EPSILON)
}

/// Outcome of one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// The chosen biome.
    pub biome: BiomeId,
    /// `true` if nothing matched within tolerance and the pool's first biome was used.
    pub fallback: bool,
}

/// Selects biomes by climate proximity.
#[derive(Clone, Copy, Debug)]
pub struct ClimateSelector {
    tolerance: f64,
}

impl ClimateSelector {
    /// Creates a selector. Negative or NaN tolerances are treated as 0.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    /// Maximum climate distance accepted.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Picks a biome for `climate` at `(x, z)`.
    ///
    /// Never fails: with no candidate in tolerance the pool's first biome is
    /// returned with [`Selection::fallback`] set.
    pub fn select(
        &self,
        climate: ClimateVector,
        pool: &CandidatePool,
        x: i64,
        z: i64,
    ) -> Selection {
        // Two passes over the pool instead of collecting candidates keeps the
        // per-column path allocation-free.
        let mut total = 0.0;
        let mut last = None;
        for (id, record) in pool.entries() {
            let distance = climate.distance(&record.climate());
            if distance <= self.tolerance {
                total += candidate_weight(distance);
                last = Some(id);
            }
        }

        let Some(last) = last else {
            tracing::debug!(
                x,
                z,
                temperature = climate.temperature(),
                moisture = climate.moisture(),
                "No biome within climate tolerance, using fallback"
            );
            return Selection {
                biome: pool.first(),
                fallback: true,
            };
        };

        let mut rng = coordinate_rng(x, z);
        let target = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        for (id, record) in pool.entries() {
            let distance = climate.distance(&record.climate());
            if distance <= self.tolerance {
                cumulative += candidate_weight(distance);
                if target < cumulative {
                    return Selection {
                        biome: id,
                        fallback: false,
                    };
                }
            }
        }

        // Rounding left `target` at or past the final cumulative weight.
        Selection {
            biome: last,
            fallback: false,
        }
    }

    /// Candidates within tolerance with their normalized selection probability.
    pub fn candidates(&self, climate: ClimateVector, pool: &CandidatePool) -> Vec<(BiomeId, f64)> {
        let weighted: Vec<(BiomeId, f64)> = pool
            .entries()
            .filter_map(|(id, record)| {
                let distance = climate.distance(&record.climate());
                (distance <= self.tolerance).then(|| (id, candidate_weight(distance)))
            })
            .collect();

        let total: f64 = weighted.iter().map(|(_, w)| w).sum();
        weighted
            .into_iter()
            .map(|(id, weight)| (id, weight / total))
            .collect()
    }
}
