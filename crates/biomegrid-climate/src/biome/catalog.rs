//! Biome catalog: immutable index of every known biome.
//!
//! The host registers records into a [`BiomeCatalogBuilder`] once per session;
//! [`BiomeCatalogBuilder::build`] freezes them into a [`BiomeCatalog`] with
//! name, provenance, and tag indexes. A reload builds a new catalog rather than
//! mutating the old one.

use hashbrown::HashMap;

use super::{BiomeId, BiomeRecord};
use crate::climate::ClimateVector;

/// Errors raised while building or accessing the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
    /// Every `BiomeId` value is taken.
    #[error("biome catalog is full (max {} biomes)", u16::MAX as usize + 1)]
    Full,
    /// No catalog has been installed yet.
    #[error("biome catalog has not been populated")]
    NotReady,
}

/// Collects records before the catalog is frozen.
#[derive(Default)]
pub struct BiomeCatalogBuilder {
    records: Vec<BiomeRecord>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeCatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a record, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if the name is taken and
    /// [`CatalogError::Full`] once every id is in use.
    pub fn register(&mut self, record: BiomeRecord) -> Result<BiomeId, CatalogError> {
        if self.name_to_id.contains_key(&record.name) {
            return Err(CatalogError::DuplicateName(record.name));
        }
        let index = u16::try_from(self.records.len()).map_err(|_| CatalogError::Full)?;
        let id = BiomeId(index);
        self.name_to_id.insert(record.name.clone(), id);
        self.records.push(record);
        Ok(id)
    }

    /// Number of records registered so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Freezes the records into a catalog.
    pub fn build(self) -> BiomeCatalog {
        let mut by_provenance: HashMap<String, Vec<BiomeId>> = HashMap::new();
        let mut by_tag: HashMap<String, Vec<BiomeId>> = HashMap::new();
        let mut provenances = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            let id = BiomeId(index as u16);
            let entry = by_provenance
                .entry(record.provenance.clone())
                .or_insert_with(|| {
                    provenances.push(record.provenance.clone());
                    Vec::new()
                });
            entry.push(id);
            for tag in &record.tags {
                by_tag.entry(tag.clone()).or_default().push(id);
            }
        }

        BiomeCatalog {
            records: self.records,
            name_to_id: self.name_to_id,
            by_provenance,
            by_tag,
            provenances,
        }
    }
}

/// Frozen biome index. Shared between dimension contexts behind an `Arc`.
#[derive(Debug)]
pub struct BiomeCatalog {
    /// Dense array where `index == BiomeId.0`.
    records: Vec<BiomeRecord>,
    name_to_id: HashMap<String, BiomeId>,
    by_provenance: HashMap<String, Vec<BiomeId>>,
    by_tag: HashMap<String, Vec<BiomeId>>,
    /// Provenances in first-registration order.
    provenances: Vec<String>,
}

impl BiomeCatalog {
    /// Returns the record for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this catalog.
    pub fn get(&self, id: BiomeId) -> &BiomeRecord {
        &self.records[id.index()]
    }

    /// Returns the record for `id`, or `None` if it is out of range.
    pub fn try_get(&self, id: BiomeId) -> Option<&BiomeRecord> {
        self.records.get(id.index())
    }

    /// Looks up a record by its namespaced name.
    pub fn lookup(&self, name: &str) -> Option<&BiomeRecord> {
        self.id_of(name).map(|id| self.get(id))
    }

    /// Looks up a biome id by name.
    pub fn id_of(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Ids of every biome with the given provenance, in registration order.
    pub fn ids_by_provenance(&self, provenance: &str) -> &[BiomeId] {
        self.by_provenance
            .get(provenance)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Records of every biome with the given provenance.
    pub fn by_provenance(&self, provenance: &str) -> Vec<&BiomeRecord> {
        self.ids_by_provenance(provenance)
            .iter()
            .map(|&id| self.get(id))
            .collect()
    }

    /// Records carrying `tag`.
    pub fn by_tag(&self, tag: &str) -> Vec<&BiomeRecord> {
        self.by_tag
            .get(tag)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|&id| self.get(id))
            .collect()
    }

    /// Records whose climate lies within `tolerance` of `target`.
    pub fn by_climate(&self, target: ClimateVector, tolerance: f64) -> Vec<&BiomeRecord> {
        self.records
            .iter()
            .filter(|record| record.climate().distance(&target) <= tolerance)
            .collect()
    }

    /// Returns `true` if any biome has this provenance.
    pub fn has_provenance(&self, provenance: &str) -> bool {
        self.by_provenance.contains_key(provenance)
    }

    /// Known provenances in first-registration order.
    pub fn provenances(&self) -> &[String] {
        &self.provenances
    }

    /// Iterates every record with its id, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &BiomeRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (BiomeId(index as u16), record))
    }

    /// Every id, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = BiomeId> + '_ {
        (0..self.records.len()).map(|index| BiomeId(index as u16))
    }

    /// Returns the number of registered biomes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
