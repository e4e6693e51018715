//! Configuration types for connectivity-planner operations.
//!
//! Every stage receives its section explicitly; nothing is read from
//! process-global state.

use crate::error::{PlannerError, Result};
use crate::geo::{ReferencePoint, ReferenceSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_CLUSTER_SEED, DEFAULT_FORECAST_HORIZON, DEFAULT_HIGH_PRIORITY_THRESHOLD,
    DEFAULT_RURAL_THRESHOLD_KM, DEFAULT_ZONE_COUNT,
};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Quality scoring targets and latency curve
    pub scoring: ScoringConfig,
    /// Reference points and rurality threshold
    pub geo: GeoConfig,
    /// Priority classification thresholds
    pub priority: PriorityConfig,
    /// Zone clustering parameters
    pub clustering: ClusteringConfig,
    /// Trend forecasting parameters
    pub forecast: ForecastConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Select a named reference-point preset.
    pub fn reference_preset(mut self, preset: impl Into<String>) -> Self {
        self.config.geo.reference_preset = preset.into();
        self
    }

    /// Use an explicit reference-point set instead of a preset.
    pub fn reference_points(mut self, points: Vec<ReferencePoint>) -> Self {
        self.config.geo.reference_points = Some(points);
        self
    }

    /// Set the rurality distance threshold in kilometers.
    pub const fn rural_threshold_km(mut self, km: f64) -> Self {
        self.config.geo.rural_threshold_km = km;
        self
    }

    /// Set the number of expansion zones.
    pub const fn zones(mut self, zones: usize) -> Self {
        self.config.clustering.zones = zones;
        self
    }

    /// Set the clustering seed.
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.clustering.seed = seed;
        self
    }

    /// Set the forecast horizon.
    pub const fn horizon(mut self, horizon: usize) -> Self {
        self.config.forecast.horizon = horizon;
        self
    }

    /// Enable or disable cluster-based forecast refinement.
    pub const fn refine_forecasts(mut self, enabled: bool) -> Self {
        self.config.forecast.refine_with_clusters = enabled;
        self
    }

    /// Set the high-priority threshold.
    pub const fn high_priority_threshold(mut self, threshold: f64) -> Self {
        self.config.priority.high_priority_threshold = threshold;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Scoring Configuration
// ============================================================================

/// Targets for the quality scorer.
///
/// The latency curve is piecewise linear: 100 up to `latency_excellent_ms`,
/// 75 at `latency_good_ms`, 25 at `latency_fair_ms` and 0 at `latency_floor_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Download speed (Mbps) that earns a full download score
    pub target_download: f64,
    /// Upload speed (Mbps) that earns a full upload score
    pub target_upload: f64,
    pub latency_excellent_ms: f64,
    pub latency_good_ms: f64,
    pub latency_fair_ms: f64,
    pub latency_floor_ms: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            target_download: 200.0,
            target_upload: 20.0,
            latency_excellent_ms: 20.0,
            latency_good_ms: 40.0,
            latency_fair_ms: 100.0,
            latency_floor_ms: 200.0,
        }
    }
}

// ============================================================================
// Geo Configuration
// ============================================================================

/// Reference-point selection and rurality threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeoConfig {
    /// Named preset: "brazil", "latam", or an ISO 3166-1 alpha-2 country code
    pub reference_preset: String,
    /// Explicit reference points; overrides the preset when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_points: Option<Vec<ReferencePoint>>,
    /// Points farther than this from every reference point are rural
    pub rural_threshold_km: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            reference_preset: "brazil".to_string(),
            reference_points: None,
            rural_threshold_km: DEFAULT_RURAL_THRESHOLD_KM,
        }
    }
}

impl GeoConfig {
    /// Resolve the configured reference set.
    pub fn reference_set(&self) -> Result<ReferenceSet> {
        if let Some(points) = &self.reference_points {
            return Ok(ReferenceSet::new(points.clone()));
        }
        ReferenceSet::preset(&self.reference_preset).ok_or_else(|| {
            PlannerError::config(format!(
                "unknown reference preset '{}'",
                self.reference_preset
            ))
        })
    }
}

// ============================================================================
// Priority Configuration
// ============================================================================

/// Thresholds for the rurality / priority classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PriorityConfig {
    /// Batch-relative priority above which a point counts as high priority
    pub high_priority_threshold: f64,
    /// Batches smaller than this skip batch normalization
    pub min_batch_for_normalization: usize,
    /// Number of top-priority areas listed in reports
    pub top_priority_count: usize,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            high_priority_threshold: DEFAULT_HIGH_PRIORITY_THRESHOLD,
            min_batch_for_normalization: 3,
            top_priority_count: 5,
        }
    }
}

// ============================================================================
// Clustering Configuration
// ============================================================================

/// Parameters for the zone clusterer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Target number of zones (reduced to the batch size when larger)
    pub zones: usize,
    /// Seed for centroid initialization
    pub seed: u64,
    /// Lloyd iteration cap
    pub max_iterations: usize,
    /// Convergence threshold on centroid movement (standardized units)
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            zones: DEFAULT_ZONE_COUNT,
            seed: DEFAULT_CLUSTER_SEED,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

// ============================================================================
// Forecast Configuration
// ============================================================================

/// Parameters for the trend forecaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future periods to project
    pub horizon: usize,
    /// Blend forecasts toward profile-cluster centroids when enough history exists
    pub refine_with_clusters: bool,
    /// Minimum history length before refinement is attempted
    pub min_points_for_refinement: usize,
    /// Number of profile clusters used for refinement
    pub profile_clusters: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_FORECAST_HORIZON,
            refine_with_clusters: true,
            min_points_for_refinement: 5,
            profile_clusters: DEFAULT_ZONE_COUNT,
        }
    }
}
