//! Climate-grid biome placement: spawn-centred temperature and moisture
//! gradients, climate-matched weighted selection, and organic blob shaping.

mod blob;
mod cache;
mod climate;
mod context;
mod noise_field;
mod selector;
mod world;

pub mod biome;
pub mod seed;

pub use biome::{
    ALL_PROVENANCES, BiomeCatalog, BiomeCatalogBuilder, BiomeCategory, BiomeId, BiomeRecord,
    CandidatePool, CatalogError, CatalogSlot, CatalogState, PoolError,
};
pub use blob::{BlobEnforcer, CENTRE_JITTER, EDGE_WARP, cell_size_for};
pub use cache::BiomeCache;
pub use climate::{ClimateField, ClimateVector, NOISE_WEIGHT, fold_distance};
pub use context::{BiomeQuery, ContextError, DimensionContext};
pub use noise_field::{CoherentNoise, ConstantNoise, SimplexField};
pub use selector::{ClimateSelector, Selection, WEIGHT_EPSILON, candidate_weight};
pub use world::{BiomeWorld, WorldSetup};
