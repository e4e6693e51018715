//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".connectivity-planner.yaml",
    ".connectivity-planner.yml",
    "connectivity-planner.yaml",
    "connectivity-planner.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/connectivity-planner/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("connectivity-planner")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    ///
    /// Used to layer CLI overrides over file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.scoring != defaults.scoring {
            self.scoring = other.scoring.clone();
        }

        if other.geo.reference_preset != defaults.geo.reference_preset {
            self.geo
                .reference_preset
                .clone_from(&other.geo.reference_preset);
        }
        if other.geo.reference_points.is_some() {
            self.geo
                .reference_points
                .clone_from(&other.geo.reference_points);
        }
        if other.geo.rural_threshold_km != defaults.geo.rural_threshold_km {
            self.geo.rural_threshold_km = other.geo.rural_threshold_km;
        }

        if other.priority != defaults.priority {
            self.priority = other.priority.clone();
        }

        if other.clustering.zones != defaults.clustering.zones {
            self.clustering.zones = other.clustering.zones;
        }
        if other.clustering.seed != defaults.clustering.seed {
            self.clustering.seed = other.clustering.seed;
        }
        if other.clustering.max_iterations != defaults.clustering.max_iterations {
            self.clustering.max_iterations = other.clustering.max_iterations;
        }

        if other.forecast.horizon != defaults.forecast.horizon {
            self.forecast.horizon = other.forecast.horizon;
        }
        if !other.forecast.refine_with_clusters {
            self.forecast.refine_with_clusters = false;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example YAML config with every section at its default.
#[must_use]
pub fn generate_example_config() -> String {
    let body = serde_yaml::to_string(&AppConfig::default()).unwrap_or_default();
    format!(
        "# connectivity-planner configuration\n\
         # Place as .connectivity-planner.yaml in the working directory\n\
         # or ~/.config/connectivity-planner/\n\n{body}"
    )
}
