//! Configuration module for connectivity-planner.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common planning scenarios
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use connectivity_planner::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::default();
//! let config = AppConfig::from_preset(ConfigPreset::Latam);
//! let config = AppConfig::builder().zones(5).seed(7).build();
//!
//! use connectivity_planner::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.connectivity-planner.yaml` file in the working directory or
//! `~/.config/connectivity-planner/`:
//!
//! ```yaml
//! geo:
//!   reference_preset: latam
//!   rural_threshold_km: 120
//! clustering:
//!   zones: 5
//!   seed: 42
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_CLUSTER_SEED, DEFAULT_FORECAST_HORIZON,
    DEFAULT_HIGH_PRIORITY_THRESHOLD, DEFAULT_RURAL_THRESHOLD_KM, DEFAULT_ZONE_COUNT,
};
pub use types::{
    AppConfig, AppConfigBuilder, ClusteringConfig, ForecastConfig, GeoConfig, PriorityConfig,
    ScoringConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
