//! Default configurations and presets for connectivity-planner.
//!
//! Provides named presets for common planning scenarios and default values.

use super::types::{AppConfig, ClusteringConfig, GeoConfig, PriorityConfig};

// ============================================================================
// Default Values
// ============================================================================

/// Distance (km) beyond which a point is considered rural
pub const DEFAULT_RURAL_THRESHOLD_KM: f64 = 100.0;

/// Priority score above which a point is high priority
pub const DEFAULT_HIGH_PRIORITY_THRESHOLD: f64 = 70.0;

/// Number of expansion zones
pub const DEFAULT_ZONE_COUNT: usize = 3;

/// Seed for reproducible clustering
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Forecast periods
pub const DEFAULT_FORECAST_HORIZON: usize = 7;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common planning scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Brazilian major cities as references, default thresholds
    Default,
    /// Regional planning across Latin American country centers
    Latam,
    /// Higher rurality and priority bars, more zones
    Conservative,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Latam => "latam",
            Self::Conservative => "conservative",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "brazil" | "br" => Some(Self::Default),
            "latam" | "latin-america" | "regional" => Some(Self::Latam),
            "conservative" | "strict" => Some(Self::Conservative),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Brazilian major cities as references with standard thresholds",
            Self::Latam => "Latin American country centers as references for regional planning",
            Self::Conservative => "Rural beyond 150 km, high priority above 80, five zones",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Latam, Self::Conservative]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Latam => Self::latam_preset(),
            ConfigPreset::Conservative => Self::conservative_preset(),
        }
    }

    /// Regional preset over Latin American country centers.
    ///
    /// Country centers are far apart, so more zones are requested.
    #[must_use]
    pub fn latam_preset() -> Self {
        Self {
            geo: GeoConfig {
                reference_preset: "latam".to_string(),
                ..GeoConfig::default()
            },
            clustering: ClusteringConfig {
                zones: 5,
                ..ClusteringConfig::default()
            },
            ..Self::default()
        }
    }

    /// Conservative preset.
    ///
    /// - Rural only beyond 150 km
    /// - High priority only above 80
    /// - Five zones
    #[must_use]
    pub fn conservative_preset() -> Self {
        Self {
            geo: GeoConfig {
                rural_threshold_km: 150.0,
                ..GeoConfig::default()
            },
            priority: PriorityConfig {
                high_priority_threshold: 80.0,
                ..PriorityConfig::default()
            },
            clustering: ClusteringConfig {
                zones: 5,
                ..ClusteringConfig::default()
            },
            ..Self::default()
        }
    }
}
