//! Per-dimension query pipeline.
//!
//! A [`DimensionContext`] bundles everything one dimension needs to answer
//! `biome_at`: the climate field, the blob enforcer, the selector, and the
//! candidate pool with the catalog snapshot it indexes. Contexts are immutable
//! once built and are shared across query threads behind an `Arc`; a reload
//! builds a replacement context instead of mutating this one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use biomegrid_config::{ConfigError, DimensionSettings};

use crate::biome::{BiomeCatalog, BiomeId, CandidatePool, CatalogError, PoolError};
use crate::blob::BlobEnforcer;
use crate::cache::BiomeCache;
use crate::climate::{ClimateField, ClimateVector};
use crate::selector::{ClimateSelector, Selection};

/// Errors raised while building a dimension context.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("invalid dimension configuration")]
    Config(#[from] ConfigError),
    #[error("failed to build candidate pool")]
    Pool(#[from] PoolError),
    #[error("biome catalog unavailable")]
    Catalog(#[from] CatalogError),
}

/// Full breakdown of one query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeQuery {
    /// Sampling point after blob remapping.
    pub remapped: (i64, i64),
    /// Climate at the remapped point.
    pub climate: ClimateVector,
    /// Selected biome and whether it was the fallback.
    pub selection: Selection,
}

/// Immutable, thread-safe biome resolver for one dimension.
pub struct DimensionContext {
    name: String,
    settings: DimensionSettings,
    field: ClimateField,
    blob: BlobEnforcer,
    selector: ClimateSelector,
    pool: CandidatePool,
    cache: Option<BiomeCache>,
    fallbacks: AtomicU64,
}

impl DimensionContext {
    /// Builds a context from resolved settings against a catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Config`] if the climate settings are invalid and
    /// [`ContextError::Pool`] if the pool ends up empty.
    pub fn new(
        name: impl Into<String>,
        settings: &DimensionSettings,
        catalog: &Arc<BiomeCatalog>,
    ) -> Result<Self, ContextError> {
        let name = name.into();
        let field = ClimateField::new(settings.climate.clone(), settings.seed)?;
        let blob = BlobEnforcer::new(&settings.climate, settings.seed);
        let selector = ClimateSelector::new(settings.climate.tolerance);
        let pool = CandidatePool::build(catalog, &settings.pool)?;

        tracing::info!(
            dimension = %name,
            seed = settings.seed,
            biomes = pool.len(),
            blob_cell = blob.cell_size(),
            "Dimension context ready"
        );

        Ok(Self {
            name,
            settings: settings.clone(),
            field,
            blob,
            selector,
            pool,
            cache: None,
            fallbacks: AtomicU64::new(0),
        })
    }

    /// Enables memoization of up to `capacity` resolved coordinates.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(BiomeCache::new(capacity));
        self
    }

    /// Resolves the biome at `(x, z)`.
    pub fn biome_at(&self, x: i64, z: i64) -> BiomeId {
        match &self.cache {
            Some(cache) => cache.get_or_insert_with(x, z, || self.resolve(x, z).selection.biome),
            None => self.resolve(x, z).selection.biome,
        }
    }

    /// Resolves `(x, z)` and reports every intermediate value. Bypasses the cache.
    pub fn select_detailed(&self, x: i64, z: i64) -> BiomeQuery {
        self.resolve(x, z)
    }

    /// Climate at the blob-remapped sampling point for `(x, z)`.
    pub fn climate_at(&self, x: i64, z: i64) -> ClimateVector {
        let (sx, sz) = self.blob.remap(x, z);
        self.field.sample(sx, sz)
    }

    fn resolve(&self, x: i64, z: i64) -> BiomeQuery {
        let remapped = self.blob.remap(x, z);
        let climate = self.field.sample(remapped.0, remapped.1);
        let selection = self
            .selector
            .select(climate, &self.pool, remapped.0, remapped.1);
        if selection.fallback && self.fallbacks.fetch_add(1, Ordering::Relaxed) == 0 {
            tracing::warn!(
                dimension = %self.name,
                x,
                z,
                tolerance = self.selector.tolerance(),
                "No biome within climate tolerance, using fallback (repeats logged at debug)"
            );
        }
        BiomeQuery {
            remapped,
            climate,
            selection,
        }
    }

    /// Dimension name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings the context was built from.
    pub fn settings(&self) -> &DimensionSettings {
        &self.settings
    }

    /// The candidate pool.
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    /// The catalog snapshot the pool indexes.
    pub fn catalog(&self) -> &Arc<BiomeCatalog> {
        self.pool.catalog()
    }

    /// The climate field.
    pub fn field(&self) -> &ClimateField {
        &self.field
    }

    /// The blob enforcer.
    pub fn blob(&self) -> &BlobEnforcer {
        &self.blob
    }

    /// Number of resolutions that fell back to the pool's first biome.
    ///
    /// Cache hits are not resolutions and are not counted.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// The memo cache, if enabled.
    pub fn cache(&self) -> Option<&BiomeCache> {
        self.cache.as_ref()
    }
}

impl std::fmt::Debug for DimensionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionContext")
            .field("name", &self.name)
            .field("seed", &self.settings.seed)
            .field("pool", &self.pool.len())
            .field("blob_cell", &self.blob.cell_size())
            .field("cached", &self.cache.is_some())
            .field("fallbacks", &self.fallback_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
