//! Bounded coordinate → biome memoization shared across query threads.

use dashmap::DashMap;

use crate::biome::BiomeId;

/// Concurrent memo of resolved biomes keyed by raw coordinate.
///
/// When the map holds `capacity` entries the whole map is cleared. Answers
/// are a pure function of the coordinate, so eviction never changes results.
///
/// The capacity check and the insert are not one atomic step, so threads that
/// miss at the same moment can each add an entry past the limit: the map
/// overshoots by at most one entry per concurrent writer.
#[derive(Debug)]
pub struct BiomeCache {
    entries: DashMap<(i64, i64), BiomeId>,
    capacity: usize,
}

impl BiomeCache {
    /// Creates a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached biome for `(x, z)`, computing and storing it on a miss.
    pub fn get_or_insert_with(
        &self,
        x: i64,
        z: i64,
        compute: impl FnOnce() -> BiomeId,
    ) -> BiomeId {
        if let Some(hit) = self.entries.get(&(x, z)) {
            return *hit;
        }

        let biome = compute();
        if self.entries.len() >= self.capacity {
            self.clear();
        }
        self.entries.insert((x, z), biome);
        biome
    }

    /// Cached value for `(x, z)`, if present.
    pub fn get(&self, x: i64, z: i64) -> Option<BiomeId> {
        self.entries.get(&(x, z)).map(|entry| *entry)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
        tracing::trace!(capacity = self.capacity, "Biome cache cleared");
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries before the cache clears itself.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
