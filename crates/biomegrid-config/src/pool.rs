//! Candidate pool selection lists.

use serde::{Deserialize, Serialize};

/// Which catalog biomes are eligible in a dimension.
///
/// Applied in order: base provenance, provenance wildcards, explicit ids,
/// then exclusions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolSpec {
    /// Add every biome of [`PoolSpec::base_provenance`].
    pub include_base: bool,
    /// Provenance treated as the base game.
    pub base_provenance: String,
    /// Provenances to add wholesale: `"name"`, `"name:*"`, or `"*"` for all.
    pub include_provenances: Vec<String>,
    /// Individual biome ids to add.
    pub include_ids: Vec<String>,
    /// Biome ids removed after all inclusions.
    pub exclude_ids: Vec<String>,
    /// Drop ocean and river biomes.
    pub exclude_aquatic: bool,
}

impl Default for PoolSpec {
    fn default() -> Self {
        Self {
            include_base: true,
            base_provenance: "minecraft".to_string(),
            include_provenances: Vec::new(),
            include_ids: Vec::new(),
            exclude_ids: Vec::new(),
            exclude_aquatic: false,
        }
    }
}
