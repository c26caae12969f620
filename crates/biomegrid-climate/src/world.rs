//! Host-facing facade: one catalog slot plus a context per dimension.

use std::sync::Arc;

use biomegrid_config::{ConfigError, DimensionSettings, GridConfig};
use dashmap::DashMap;

use crate::biome::{BiomeCatalog, BiomeId, CatalogSlot};
use crate::context::{ContextError, DimensionContext};

/// Every dimension's biome resolver, keyed by dimension name.
///
/// Queries clone an `Arc<DimensionContext>` out of the map and never block on
/// catalog reloads; a reload swaps contexts one at a time.
#[derive(Debug, Default)]
pub struct BiomeWorld {
    catalog: CatalogSlot,
    dimensions: DashMap<String, Arc<DimensionContext>>,
    cache_capacity: Option<usize>,
}

/// Result of [`BiomeWorld::from_config`].
#[derive(Debug)]
pub struct WorldSetup {
    pub world: BiomeWorld,
    /// Dimensions that failed to build, with the reason.
    pub skipped: Vec<(String, ContextError)>,
}

impl BiomeWorld {
    /// Creates a world with no catalog and no dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a per-dimension memo cache for contexts built from now on.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Installs `catalog` and registers every dimension in `config`.
    ///
    /// Dimensions that fail to build are skipped and reported in
    /// [`WorldSetup::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration itself is invalid.
    pub fn from_config(
        config: &GridConfig,
        catalog: BiomeCatalog,
    ) -> Result<WorldSetup, ConfigError> {
        config.validate()?;

        let mut world = Self::new();
        if config.cache.enabled {
            world = world.with_cache(config.cache.capacity);
        }
        world.install_catalog(catalog);

        let mut skipped = Vec::new();
        for (name, settings) in &config.dimensions {
            if let Err(err) = world.register_dimension(name, settings) {
                tracing::error!(dimension = %name, error = %err, "Skipping dimension");
                skipped.push((name.clone(), err));
            }
        }

        Ok(WorldSetup { world, skipped })
    }

    /// Installs a catalog without touching existing dimensions.
    ///
    /// Use [`reload_catalog`](Self::reload_catalog) to rebuild dimensions
    /// against the new catalog.
    pub fn install_catalog(&self, catalog: BiomeCatalog) -> Arc<BiomeCatalog> {
        self.catalog.install(catalog)
    }

    /// The catalog slot.
    pub fn catalog(&self) -> &CatalogSlot {
        &self.catalog
    }

    /// Builds a context for `name` against the current catalog, replacing any
    /// existing one.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Catalog`] before a catalog is installed, or the
    /// context's own construction error.
    pub fn register_dimension(
        &self,
        name: &str,
        settings: &DimensionSettings,
    ) -> Result<Arc<DimensionContext>, ContextError> {
        let catalog = self.catalog.snapshot()?;
        let context = Arc::new(self.build_context(name, settings, &catalog)?);
        self.dimensions
            .insert(name.to_string(), Arc::clone(&context));
        Ok(context)
    }

    /// Removes a dimension. Queries already holding its context are unaffected.
    pub fn remove_dimension(&self, name: &str) -> Option<Arc<DimensionContext>> {
        self.dimensions.remove(name).map(|(_, context)| context)
    }

    /// The context for `name`.
    pub fn dimension(&self, name: &str) -> Option<Arc<DimensionContext>> {
        self.dimensions
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Registered dimension names, sorted.
    pub fn dimension_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .dimensions
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Resolves the biome at `(x, z)` in `dimension`, or `None` if unknown.
    pub fn biome_at(&self, dimension: &str, x: i64, z: i64) -> Option<BiomeId> {
        self.dimension(dimension)
            .map(|context| context.biome_at(x, z))
    }

    /// Installs `catalog` and rebuilds every dimension against it.
    ///
    /// Dimensions whose rebuild fails are removed and returned with the reason.
    pub fn reload_catalog(&self, catalog: BiomeCatalog) -> Vec<(String, ContextError)> {
        let current: Vec<(String, DimensionSettings)> = self
            .dimensions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().settings().clone()))
            .collect();

        let snapshot = self.catalog.install(catalog);

        let mut failed = Vec::new();
        for (name, settings) in current {
            match self.build_context(&name, &settings, &snapshot) {
                Ok(context) => {
                    self.dimensions.insert(name, Arc::new(context));
                }
                Err(err) => {
                    tracing::error!(
                        dimension = %name,
                        error = %err,
                        "Dropping dimension after catalog reload"
                    );
                    self.dimensions.remove(&name);
                    failed.push((name, err));
                }
            }
        }
        failed
    }

    fn build_context(
        &self,
        name: &str,
        settings: &DimensionSettings,
        catalog: &Arc<BiomeCatalog>,
    ) -> Result<DimensionContext, ContextError> {
        let context = DimensionContext::new(name, settings, catalog)?;
        Ok(match self.cache_capacity {
            Some(capacity) => context.with_cache(capacity),
            None => context,
        })
    }
}
