//! Provider comparison and summary statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::GeoPoint;
use crate::utils::{mean, round2};

/// Average, minimum and maximum of a metric. All zero when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricStats {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        Self {
            avg: round2(mean(values)),
            min: round2(values.iter().copied().fold(f64::INFINITY, f64::min)),
            max: round2(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
        }
    }
}

/// Per-provider averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderComparison {
    pub num_points: usize,
    /// Over scored points only
    pub avg_quality_score: f64,
    pub avg_download_speed: f64,
    pub avg_upload_speed: f64,
    pub avg_latency: f64,
}

/// Compare providers, in order of first appearance. Missing providers are "Unknown".
#[must_use]
pub fn compare_providers(points: &[GeoPoint]) -> IndexMap<String, ProviderComparison> {
    let mut grouped: IndexMap<&str, Vec<&GeoPoint>> = IndexMap::new();
    for point in points {
        grouped.entry(point.provider_label()).or_default().push(point);
    }

    grouped
        .into_iter()
        .map(|(provider, members)| {
            let scores: Vec<f64> = members
                .iter()
                .filter_map(|p| p.quality_score.map(|q| q.overall_score))
                .collect();
            let downloads: Vec<f64> = members.iter().map(|p| p.measurement.download).collect();
            let uploads: Vec<f64> = members.iter().map(|p| p.measurement.upload).collect();
            let latencies: Vec<f64> = members.iter().map(|p| p.measurement.latency).collect();

            (
                provider.to_string(),
                ProviderComparison {
                    num_points: members.len(),
                    avg_quality_score: round2(mean(&scores)),
                    avg_download_speed: round2(mean(&downloads)),
                    avg_upload_speed: round2(mean(&uploads)),
                    avg_latency: round2(mean(&latencies)),
                },
            )
        })
        .collect()
}

/// Batch-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_points: usize,
    pub num_providers: usize,
    /// Distinct named providers, sorted
    pub providers: Vec<String>,
    pub quality_scores: MetricStats,
    pub download_speeds: MetricStats,
    pub upload_speeds: MetricStats,
    pub latencies: MetricStats,
}

#[must_use]
pub fn summary_statistics(points: &[GeoPoint]) -> SummaryStatistics {
    let providers: BTreeSet<&str> = points.iter().filter_map(|p| p.provider.as_deref()).collect();
    let scores: Vec<f64> = points
        .iter()
        .filter_map(|p| p.quality_score.map(|q| q.overall_score))
        .collect();
    let downloads: Vec<f64> = points.iter().map(|p| p.measurement.download).collect();
    let uploads: Vec<f64> = points.iter().map(|p| p.measurement.upload).collect();
    let latencies: Vec<f64> = points.iter().map(|p| p.measurement.latency).collect();

    SummaryStatistics {
        total_points: points.len(),
        num_providers: providers.len(),
        providers: providers.into_iter().map(str::to_string).collect(),
        quality_scores: MetricStats::from_values(&scores),
        download_speeds: MetricStats::from_values(&downloads),
        upload_speeds: MetricStats::from_values(&uploads),
        latencies: MetricStats::from_values(&latencies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurement, QualityScore};

    fn batch() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(-10.0, -55.0)
                .with_provider("Starlink")
                .with_measurement(Measurement::new(150.0, 15.0, 30.0))
                .with_quality_score(QualityScore::from_components(90.0, 90.0, 90.0)),
            GeoPoint::new(-11.0, -56.0)
                .with_provider("Starlink")
                .with_measurement(Measurement::new(50.0, 5.0, 50.0))
                .with_quality_score(QualityScore::from_components(70.0, 70.0, 70.0)),
            GeoPoint::new(-23.5, -46.6)
                .with_provider("Vivo")
                .with_measurement(Measurement::new(80.0, 10.0, 20.0)),
            GeoPoint::new(-22.9, -43.1).with_measurement(Measurement::new(20.0, 2.0, 90.0)),
        ]
    }

    #[test]
    fn test_compare_providers() {
        let comparison = compare_providers(&batch());
        assert_eq!(
            comparison.keys().collect::<Vec<_>>(),
            vec!["Starlink", "Vivo", "Unknown"]
        );
        let starlink = &comparison["Starlink"];
        assert_eq!(starlink.num_points, 2);
        assert_eq!(starlink.avg_quality_score, 80.0);
        assert_eq!(starlink.avg_download_speed, 100.0);
        assert_eq!(comparison["Vivo"].avg_quality_score, 0.0);
    }

    #[test]
    fn test_summary_statistics() {
        let summary = summary_statistics(&batch());
        assert_eq!(summary.total_points, 4);
        assert_eq!(summary.providers, vec!["Starlink", "Vivo"]);
        assert_eq!(summary.quality_scores.avg, 80.0);
        assert_eq!(summary.download_speeds.min, 20.0);
        assert_eq!(summary.download_speeds.max, 150.0);
    }

    #[test]
    fn test_empty_summary_is_zeroed() {
        assert_eq!(summary_statistics(&[]), SummaryStatistics::default());
        assert!(compare_providers(&[]).is_empty());
    }
}
