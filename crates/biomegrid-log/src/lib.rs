//! Structured logging for the biome climate grid.
//!
//! Installs a `tracing` subscriber with console output and, in debug builds,
//! a JSON log file for post-mortem analysis of generation runs. The level comes
//! from `RUST_LOG` when set, otherwise from the config's `debug.log_level`.

use biomegrid_config::GridConfig;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config specify one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "biomegrid.log";

/// Initialize the global tracing subscriber.
///
/// Sets up:
/// - Console output with uptime timestamps, targets, and levels
/// - JSON file logging when `debug_build` is set and `log_dir` is writable
/// - `RUST_LOG` filtering, falling back to the config's level
///
/// Calling this twice panics inside `tracing_subscriber`; hosts call it once at startup.
///
/// # Examples
///
/// ```no_run
/// use biomegrid_log::init_logging;
/// use biomegrid_config::GridConfig;
///
/// init_logging(None, false, None);
///
/// let config = GridConfig::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&GridConfig>) {
    let filter_str = filter_string(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true) // worker threads query in parallel
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::info!(filter = %filter_str, "Logging initialized with JSON file output");
        return;
    }

    subscriber.init();
    tracing::info!(filter = %filter_str, "Logging initialized");
}

/// Resolve the filter directive from an optional config.
pub fn filter_string(config: Option<&GridConfig>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_filter_from_config() {
        let mut config = GridConfig::default();
        config.debug.log_level = "debug,biomegrid_climate=trace".to_string();
        assert_eq!(
            filter_string(Some(&config)),
            "debug,biomegrid_climate=trace"
        );
    }

    #[test]
    fn test_blank_config_level_falls_back() {
        let mut config = GridConfig::default();
        config.debug.log_level = "   ".to_string();
        assert_eq!(filter_string(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filter() {
        let filter = EnvFilter::new("info,biomegrid_climate=debug");
        assert!(format!("{filter}").contains("biomegrid_climate=debug"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,biomegrid_climate=trace",
            "warn,biomegrid_climate::selector=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_resolved_filter_parses() {
        let mut config = GridConfig::default();
        let default = EnvFilter::try_new(filter_string(Some(&config))).unwrap();
        assert!(format!("{default}").contains(DEFAULT_FILTER));

        config.debug.log_level = " warn,biomegrid_climate::context=debug ".to_string();
        let custom = EnvFilter::try_new(filter_string(Some(&config))).unwrap();
        assert!(format!("{custom}").contains("biomegrid_climate::context=debug"));
    }
}
