//! Configuration structs with sensible defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::climate::ClimateGridConfig;
use crate::error::ConfigError;
use crate::pool::PoolSpec;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "biomegrid.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Per-dimension memoization cache settings.
    pub cache: CacheConfig,
    /// Climate grid settings keyed by dimension name.
    pub dimensions: BTreeMap<String, DimensionSettings>,
}

/// Everything needed to build one dimension context.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DimensionSettings {
    /// Seed for the climate and blob noise fields.
    pub seed: u64,
    /// Climate gradients, noise, blob shaping, and matching tolerance.
    pub climate: ClimateGridConfig,
    /// Which biomes take part in selection.
    pub pool: PoolSpec,
}

/// Coordinate → biome memoization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the cache.
    pub enabled: bool,
    /// Maximum number of cached coordinates per dimension.
    pub capacity: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        let mut dimensions = BTreeMap::new();
        dimensions.insert("overworld".to_string(), DimensionSettings::default());
        Self {
            debug: DebugConfig::default(),
            cache: CacheConfig::default(),
            dimensions,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 65_536,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Validation ---

impl DimensionSettings {
    /// Validates the climate settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.climate.validate()
    }
}

impl GridConfig {
    /// Validates every dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions
            .values()
            .try_for_each(DimensionSettings::validate)
    }
}

// --- Load / Save / Reload ---

impl GridConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: GridConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = GridConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `biomegrid.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A changed file that fails validation is reported as an error and the
    /// caller keeps its current config.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: GridConfig = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            new_config.validate()?;
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
