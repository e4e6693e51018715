//! Geo-tagged connectivity point.

use super::{Measurement, QualityScore};
use crate::error::{ErrorContext, PlannerError, Result};
use crate::utils::deserialize_optional_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A measurement taken at a geographic location.
///
/// Coordinate ranges are validated by the record store before records reach
/// this crate; nothing here re-validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, rename = "speed_test")]
    pub measurement: Measurement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<QualityScore>,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            provider: None,
            timestamp: None,
            measurement: Measurement::default(),
            quality_score: None,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn with_measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = measurement;
        self
    }

    #[must_use]
    pub fn with_quality_score(mut self, score: QualityScore) -> Self {
        self.quality_score = Some(score);
        self
    }

    /// Overall score, or 0 when the point has not been scored.
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.quality_score.map_or(0.0, |q| q.overall_score)
    }

    /// `100 - overall_score`, never negative.
    #[must_use]
    pub fn quality_gap(&self) -> f64 {
        (100.0 - self.overall_score()).max(0.0)
    }

    /// Provider label used for grouping.
    #[must_use]
    pub fn provider_label(&self) -> &str {
        self.provider.as_deref().unwrap_or("Unknown")
    }
}

/// Decode a JSON array of records.
pub fn parse_points(json: &str) -> Result<Vec<GeoPoint>> {
    serde_json::from_str(json).context("decoding connectivity records")
}

/// Read and decode a JSON array of records from disk.
pub fn load_points(path: &Path) -> Result<Vec<GeoPoint>> {
    let content = std::fs::read_to_string(path).map_err(|e| PlannerError::io(path, e))?;
    let points = parse_points(&content).with_context(|| path.display().to_string())?;
    tracing::info!("Loaded {} records from {}", points.len(), path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;

    const RECORD: &str = r#"[{
        "latitude": -15.7939,
        "longitude": -47.8828,
        "provider": "Starlink",
        "timestamp": "2024-01-15T10:30:00",
        "speed_test": {"download": 165.4, "upload": 22.3, "latency": 28.5, "jitter": 3.2},
        "quality_score": {
            "speed_score": 91.35, "latency_score": 89.38, "stability_score": 93.6,
            "overall_score": 91.42, "rating": "Excellent"
        }
    }]"#;

    #[test]
    fn test_parse_full_record() {
        let points = parse_points(RECORD).expect("valid records");
        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert_eq!(p.provider_label(), "Starlink");
        assert!(p.timestamp.is_some());
        assert_eq!(p.measurement.jitter, 3.2);
        assert_eq!(p.measurement.packet_loss, 0.0);
        assert_eq!(p.quality_score.map(|q| q.rating), Some(Rating::Excellent));
        assert!((p.quality_gap() - 8.58).abs() < 1e-9);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let points = parse_points(r#"[{"latitude": 1.0, "longitude": 2.0}]"#).expect("valid");
        let p = &points[0];
        assert_eq!(p.overall_score(), 0.0);
        assert_eq!(p.quality_gap(), 100.0);
        assert_eq!(p.provider_label(), "Unknown");
        assert_eq!(p.measurement, Measurement::default());
    }

    #[test]
    fn test_unparseable_timestamp_is_dropped() {
        let json = r#"[{"latitude": 1.0, "longitude": 2.0, "timestamp": "last tuesday"}]"#;
        let points = parse_points(json).expect("record still decodes");
        assert!(points[0].timestamp.is_none());
    }

    #[test]
    fn test_partial_quality_score_with_rating() {
        let json = r#"[{
            "latitude": -10.0, "longitude": -55.0,
            "speed_test": {"download": 40.0, "upload": 5.0, "latency": 60.0},
            "quality_score": {"overall_score": 45.0, "rating": "Fair"}
        }]"#;
        let points = parse_points(json).expect("partial score decodes");
        let score = points[0].quality_score.expect("score kept");
        assert_eq!(score.overall_score, 45.0);
        assert_eq!(score.rating, Rating::Fair);
        assert_eq!(score.speed_score, 0.0);
        assert_eq!(points[0].quality_gap(), 55.0);
    }

    #[test]
    fn test_partial_quality_score_derives_rating() {
        let json = r#"[
            {"latitude": -10.0, "longitude": -55.0, "quality_score": {"overall_score": 45.0}},
            {"latitude": -11.0, "longitude": -56.0, "quality_score": {"overall_score": 12.0}}
        ]"#;
        let points = parse_points(json).expect("partial scores decode");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].quality_score.map(|q| q.rating), Some(Rating::Fair));
        assert_eq!(points[1].quality_score.map(|q| q.rating), Some(Rating::Poor));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_points("[{").unwrap_err();
        assert!(matches!(err, PlannerError::Parse(_)));
    }
}
