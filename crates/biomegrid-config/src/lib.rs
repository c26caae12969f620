//! Configuration for the biome climate grid.
//!
//! Holds the resolved per-dimension settings (climate gradients, blob shaping,
//! candidate pool lists) and persists them to disk as RON. Supports validation,
//! hot-reload detection, and forward/backward compatible serialization.

mod climate;
mod config;
mod error;
mod pool;

pub use climate::ClimateGridConfig;
pub use config::{CONFIG_FILE_NAME, CacheConfig, DebugConfig, DimensionSettings, GridConfig};
pub use error::ConfigError;
pub use pool::PoolSpec;
