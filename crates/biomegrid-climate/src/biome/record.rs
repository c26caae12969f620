//! Biome record: the intrinsic climate and metadata of a single biome.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::climate::ClimateVector;

/// Compact handle for a registered biome: its index in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

impl BiomeId {
    /// Index into the catalog's record list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Broad terrain grouping of a biome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeCategory {
    #[default]
    None,
    Taiga,
    ExtremeHills,
    Jungle,
    Mesa,
    Plains,
    Savanna,
    Icy,
    TheEnd,
    Beach,
    Forest,
    Ocean,
    Desert,
    River,
    Swamp,
    Mushroom,
    Nether,
    Underground,
    Mountain,
}

impl BiomeCategory {
    /// Ocean and river biomes.
    pub fn is_aquatic(self) -> bool {
        matches!(self, Self::Ocean | Self::River)
    }
}

/// Full descriptor for a biome as supplied by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeRecord {
    /// Namespaced biome id (e.g., "minecraft:plains").
    pub name: String,
    /// Collection the biome comes from (e.g., "minecraft").
    pub provenance: String,
    /// Intrinsic temperature in `[-1, 1]`.
    pub temperature: f32,
    /// Intrinsic moisture in `[-1, 1]`.
    pub moisture: f32,
    pub category: BiomeCategory,
    /// Free-form tags (e.g., "cold", "overworld").
    pub tags: BTreeSet<String>,
}

impl BiomeRecord {
    /// Creates a record with an explicit provenance and no tags.
    pub fn new(
        name: impl Into<String>,
        provenance: impl Into<String>,
        temperature: f32,
        moisture: f32,
        category: BiomeCategory,
    ) -> Self {
        Self {
            name: name.into(),
            provenance: provenance.into(),
            temperature,
            moisture,
            category,
            tags: BTreeSet::new(),
        }
    }

    /// Creates a record whose provenance is the namespace of `name`.
    ///
    /// `"terralith:alpine_grove"` gets provenance `"terralith"`; a name without
    /// a namespace is treated as `"minecraft"`.
    pub fn namespaced(
        name: impl Into<String>,
        temperature: f32,
        moisture: f32,
        category: BiomeCategory,
    ) -> Self {
        let name = name.into();
        let provenance = name
            .split_once(':')
            .map_or("minecraft", |(namespace, _)| namespace)
            .to_string();
        Self::new(name, provenance, temperature, moisture, category)
    }

    /// Adds tags to the record.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// The record's climate coordinates, clamped into `[-1, 1]`.
    pub fn climate(&self) -> ClimateVector {
        ClimateVector::new(f64::from(self.temperature), f64::from(self.moisture))
    }
}
