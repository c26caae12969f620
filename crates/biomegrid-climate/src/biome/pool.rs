//! Candidate pool: the subset of the catalog eligible in one dimension.

use std::sync::Arc;

use biomegrid_config::PoolSpec;
use hashbrown::HashSet;

use super::{BiomeCatalog, BiomeId, BiomeRecord};

/// Wildcard entry that matches every provenance.
pub const ALL_PROVENANCES: &str = "*";

/// Errors raised while building a pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Nothing survived inclusion and exclusion.
    #[error("candidate pool is empty ({included} included, {removed} removed by exclusions)")]
    Empty {
        /// Biomes added before exclusions.
        included: usize,
        /// Biomes removed by exclusions.
        removed: usize,
    },
}

/// Ordered, de-duplicated set of biome ids plus the catalog snapshot they index.
///
/// Never empty. Order is insertion order, which makes selection reproducible.
#[derive(Clone, Debug)]
pub struct CandidatePool {
    catalog: Arc<BiomeCatalog>,
    members: Vec<BiomeId>,
}

impl CandidatePool {
    /// Builds a pool from `catalog` according to `spec`.
    ///
    /// Order of operations: base provenance, provenance wildcards, explicit
    /// ids, exclusions, then the aquatic filter. Unknown provenances and ids are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Empty`] if no biome remains.
    pub fn build(catalog: &Arc<BiomeCatalog>, spec: &PoolSpec) -> Result<Self, PoolError> {
        let mut members = PoolMembers::default();

        if spec.include_base {
            if catalog.has_provenance(&spec.base_provenance) {
                let base = catalog.ids_by_provenance(&spec.base_provenance);
                members.extend(base.iter().copied());
            } else {
                tracing::warn!(
                    provenance = %spec.base_provenance,
                    "Base provenance has no registered biomes"
                );
            }
        }

        for entry in &spec.include_provenances {
            match provenance_pattern(entry) {
                None => members.extend(catalog.ids()),
                Some(provenance) if catalog.has_provenance(provenance) => {
                    members.extend(catalog.ids_by_provenance(provenance).iter().copied());
                }
                Some(provenance) => {
                    tracing::warn!(%provenance, "Skipping unknown biome provenance");
                }
            }
        }

        for name in &spec.include_ids {
            match catalog.id_of(name) {
                Some(id) => members.push(id),
                None => tracing::warn!(biome = %name, "Skipping unknown included biome"),
            }
        }

        let included = members.ids.len();

        for name in &spec.exclude_ids {
            match catalog.id_of(name) {
                Some(id) => members.remove(id),
                None => tracing::warn!(biome = %name, "Skipping unknown excluded biome"),
            }
        }

        if spec.exclude_aquatic {
            members
                .ids
                .retain(|&id| !catalog.get(id).category.is_aquatic());
        }

        let removed = included - members.ids.len();
        if members.ids.is_empty() {
            return Err(PoolError::Empty { included, removed });
        }

        tracing::debug!(
            biomes = members.ids.len(),
            included,
            removed,
            "Built candidate pool"
        );

        Ok(Self {
            catalog: Arc::clone(catalog),
            members: members.ids,
        })
    }

    /// The catalog snapshot this pool indexes.
    pub fn catalog(&self) -> &Arc<BiomeCatalog> {
        &self.catalog
    }

    /// Member ids in pool order.
    pub fn ids(&self) -> &[BiomeId] {
        &self.members
    }

    /// The fallback biome: the first member.
    pub fn first(&self) -> BiomeId {
        self.members[0]
    }

    /// Returns `true` if `id` is a member.
    pub fn contains(&self, id: BiomeId) -> bool {
        self.members.contains(&id)
    }

    /// Iterates member records in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &BiomeRecord> {
        self.members.iter().map(|&id| self.catalog.get(id))
    }

    /// Iterates `(id, record)` pairs in pool order.
    pub fn entries(&self) -> impl Iterator<Item = (BiomeId, &BiomeRecord)> {
        self.members.iter().map(|&id| (id, self.catalog.get(id)))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for a built pool.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// `None` means every provenance.
fn provenance_pattern(entry: &str) -> Option<&str> {
    let entry = entry.trim();
    if entry == ALL_PROVENANCES {
        return None;
    }
    Some(entry.strip_suffix(":*").unwrap_or(entry))
}

#[derive(Default)]
struct PoolMembers {
    ids: Vec<BiomeId>,
    seen: HashSet<BiomeId>,
}

impl PoolMembers {
    fn push(&mut self, id: BiomeId) {
        if self.seen.insert(id) {
            self.ids.push(id);
        }
    }

    fn extend(&mut self, ids: impl IntoIterator<Item = BiomeId>) {
        for id in ids {
            self.push(id);
        }
    }

    fn remove(&mut self, id: BiomeId) {
        if self.seen.remove(&id) {
            self.ids.retain(|&member| member != id);
        }
    }
}
