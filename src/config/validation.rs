//! Configuration validation for connectivity-planner.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{
    AppConfig, ClusteringConfig, ForecastConfig, GeoConfig, PriorityConfig, ScoringConfig,
};
use crate::geo::ReferenceSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.geo.validate());
        errors.extend(self.priority.validate());
        errors.extend(self.clustering.validate());
        errors.extend(self.forecast.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.target_download > 0.0) {
            errors.push(ConfigError::new(
                "scoring.target_download",
                format!("Target must be positive, got {}", self.target_download),
            ));
        }
        if !(self.target_upload > 0.0) {
            errors.push(ConfigError::new(
                "scoring.target_upload",
                format!("Target must be positive, got {}", self.target_upload),
            ));
        }

        let curve = [
            self.latency_excellent_ms,
            self.latency_good_ms,
            self.latency_fair_ms,
            self.latency_floor_ms,
        ];
        if curve[0] < 0.0 || curve.windows(2).any(|w| !(w[0] < w[1])) {
            errors.push(ConfigError::new(
                "scoring.latency_*_ms",
                format!(
                    "Latency thresholds must be non-negative and strictly increasing, got {curve:?}"
                ),
            ));
        }

        errors
    }
}

impl Validatable for GeoConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match &self.reference_points {
            Some(points) => {
                if points.is_empty() {
                    errors.push(ConfigError::new(
                        "geo.reference_points",
                        "At least one reference point is required",
                    ));
                }
                for point in points {
                    if !(-90.0..=90.0).contains(&point.latitude)
                        || !(-180.0..=180.0).contains(&point.longitude)
                    {
                        errors.push(ConfigError::new(
                            "geo.reference_points",
                            format!(
                                "Reference '{}' has out-of-range coordinates ({}, {})",
                                point.name, point.latitude, point.longitude
                            ),
                        ));
                    }
                }
            }
            None => {
                if ReferenceSet::preset(&self.reference_preset).is_none() {
                    errors.push(ConfigError::new(
                        "geo.reference_preset",
                        format!(
                            "Unknown preset '{}'. Valid options: {}",
                            self.reference_preset,
                            ReferenceSet::preset_names().join(", ")
                        ),
                    ));
                }
            }
        }

        if !(self.rural_threshold_km >= 0.0) {
            errors.push(ConfigError::new(
                "geo.rural_threshold_km",
                format!(
                    "Threshold must be non-negative, got {}",
                    self.rural_threshold_km
                ),
            ));
        }

        errors
    }
}

impl Validatable for PriorityConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=100.0).contains(&self.high_priority_threshold) {
            errors.push(ConfigError::new(
                "priority.high_priority_threshold",
                format!(
                    "Threshold must be between 0 and 100, got {}",
                    self.high_priority_threshold
                ),
            ));
        }
        errors
    }
}

impl Validatable for ClusteringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.zones == 0 {
            errors.push(ConfigError::new(
                "clustering.zones",
                "At least one zone is required",
            ));
        }
        if self.max_iterations == 0 {
            errors.push(ConfigError::new(
                "clustering.max_iterations",
                "Iteration cap must be at least 1",
            ));
        }
        if !(self.tolerance >= 0.0) {
            errors.push(ConfigError::new(
                "clustering.tolerance",
                format!("Tolerance must be non-negative, got {}", self.tolerance),
            ));
        }
        errors
    }
}

impl Validatable for ForecastConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.refine_with_clusters && self.profile_clusters == 0 {
            errors.push(ConfigError::new(
                "forecast.profile_clusters",
                "Refinement needs at least one profile cluster",
            ));
        }
        errors
    }
}
