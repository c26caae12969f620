//! Biome catalog: records, the frozen catalog index, the session slot that
//! holds the current snapshot, and per-dimension candidate pools.

mod catalog;
mod pool;
mod record;
mod slot;

pub use catalog::{BiomeCatalog, BiomeCatalogBuilder, CatalogError};
pub use pool::{ALL_PROVENANCES, CandidatePool, PoolError};
pub use record::{BiomeCategory, BiomeId, BiomeRecord};
pub use slot::{CatalogSlot, CatalogState};
