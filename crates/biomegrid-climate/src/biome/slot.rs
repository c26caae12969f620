//! Session-wide catalog slot with explicit readiness.
//!
//! Queries never touch the slot: dimension contexts take an `Arc` snapshot at
//! construction time. Installing a catalog swaps the whole snapshot, so a
//! context built earlier keeps reading the catalog it was built from.

use std::sync::{Arc, PoisonError, RwLock};

use super::{BiomeCatalog, CatalogError};

/// Whether the host has populated the catalog yet.
#[derive(Clone, Debug, Default)]
pub enum CatalogState {
    /// No catalog installed; dimension contexts cannot be built.
    #[default]
    Uninitialized,
    /// A frozen catalog snapshot.
    Ready(Arc<BiomeCatalog>),
}

impl CatalogState {
    /// The snapshot, if ready.
    pub fn ready(&self) -> Option<&Arc<BiomeCatalog>> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            Self::Uninitialized => None,
        }
    }
}

/// Holds the current [`CatalogState`] and swaps it atomically.
#[derive(Debug, Default)]
pub struct CatalogSlot {
    state: RwLock<CatalogState>,
}

impl CatalogSlot {
    /// Creates an uninitialized slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot with `catalog` and returns the new snapshot.
    pub fn install(&self, catalog: BiomeCatalog) -> Arc<BiomeCatalog> {
        let snapshot = Arc::new(catalog);
        let previous = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *state, CatalogState::Ready(Arc::clone(&snapshot)))
        };

        match previous.ready() {
            Some(old) => tracing::info!(
                biomes = snapshot.len(),
                previous = old.len(),
                "Biome catalog reloaded"
            ),
            None => tracing::info!(biomes = snapshot.len(), "Biome catalog installed"),
        }
        snapshot
    }

    /// Returns the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotReady`] before the first install.
    pub fn snapshot(&self) -> Result<Arc<BiomeCatalog>, CatalogError> {
        self.state().ready().cloned().ok_or(CatalogError::NotReady)
    }

    /// A clone of the current state.
    pub fn state(&self) -> CatalogState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` once a catalog has been installed.
    pub fn is_ready(&self) -> bool {
        matches!(self.state(), CatalogState::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeCatalogBuilder, BiomeCategory, BiomeRecord};

    fn catalog_with(names: &[&str]) -> BiomeCatalog {
        let mut builder = BiomeCatalogBuilder::new();
        for name in names {
            builder
                .register(BiomeRecord::namespaced(*name, 0.0, 0.0, BiomeCategory::Plains))
                .unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_starts_uninitialized() {
        let slot = CatalogSlot::new();
        assert!(!slot.is_ready());
        assert!(matches!(slot.snapshot(), Err(CatalogError::NotReady)));
    }

    #[test]
    fn test_install_makes_ready() {
        let slot = CatalogSlot::new();
        let installed = slot.install(catalog_with(&["minecraft:plains"]));
        assert!(slot.is_ready());
        assert!(Arc::ptr_eq(&installed, &slot.snapshot().unwrap()));
    }

    #[test]
    fn test_reinstall_leaves_old_snapshot_intact() {
        let slot = CatalogSlot::new();
        let old = slot.install(catalog_with(&["minecraft:plains"]));
        let new = slot.install(catalog_with(&["minecraft:plains", "minecraft:desert"]));

        assert_eq!(old.len(), 1, "Existing snapshot must not be mutated");
        assert_eq!(new.len(), 2);
        assert_eq!(slot.snapshot().unwrap().len(), 2);
    }
}
