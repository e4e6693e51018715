//! Temporal evolution of connectivity quality.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::GeoPoint;
use crate::utils::{mean, round2};

/// Statistics for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub count: usize,
    pub avg_quality_score: f64,
    pub avg_download: f64,
    pub avg_latency: f64,
    pub min_quality_score: f64,
    pub max_quality_score: f64,
}

/// Averages over the whole batch, timestamped or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallTrends {
    pub avg_quality_score: f64,
    pub avg_download: f64,
    pub avg_latency: f64,
    pub min_quality_score: f64,
    pub max_quality_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderScore {
    pub count: usize,
    pub avg_score: f64,
}

/// Result of [`analyze_temporal_evolution`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    pub total_points: usize,
    pub date_range: DateRange,
    /// Keyed by UTC calendar day, ascending
    pub daily_averages: BTreeMap<NaiveDate, DailyStats>,
    pub trends: OverallTrends,
    pub insights: Vec<String>,
    pub provider_stats: IndexMap<String, ProviderScore>,
}

/// Group points by day and derive trends and textual insights.
///
/// Points without a timestamp are left out of the daily grouping but still
/// count toward the overall trends and provider stats.
#[must_use]
pub fn analyze_temporal_evolution(points: &[GeoPoint]) -> TemporalAnalysis {
    tracing::info!("Analyzing temporal evolution of {} points", points.len());
    if points.is_empty() {
        tracing::warn!("No data provided for temporal analysis");
        return TemporalAnalysis::default();
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&GeoPoint>> = BTreeMap::new();
    for point in points {
        if let Some(ts) = point.timestamp {
            by_day.entry(ts.date_naive()).or_default().push(point);
        }
    }

    let daily_averages: BTreeMap<NaiveDate, DailyStats> = by_day
        .iter()
        .map(|(day, members)| {
            let scores: Vec<f64> = members.iter().map(|p| p.overall_score()).collect();
            let downloads: Vec<f64> = members.iter().map(|p| p.measurement.download).collect();
            let latencies: Vec<f64> = members.iter().map(|p| p.measurement.latency).collect();
            let (min, max) = min_max(&scores);
            (
                *day,
                DailyStats {
                    count: members.len(),
                    avg_quality_score: round2(mean(&scores)),
                    avg_download: round2(mean(&downloads)),
                    avg_latency: round2(mean(&latencies)),
                    min_quality_score: round2(min),
                    max_quality_score: round2(max),
                },
            )
        })
        .collect();

    let scores: Vec<f64> = points.iter().map(GeoPoint::overall_score).collect();
    let downloads: Vec<f64> = points.iter().map(|p| p.measurement.download).collect();
    let latencies: Vec<f64> = points.iter().map(|p| p.measurement.latency).collect();
    let (min, max) = min_max(&scores);
    let trends = OverallTrends {
        avg_quality_score: round2(mean(&scores)),
        avg_download: round2(mean(&downloads)),
        avg_latency: round2(mean(&latencies)),
        min_quality_score: round2(min),
        max_quality_score: round2(max),
    };

    let provider_stats = provider_scores(points);
    let insights = build_insights(&trends, &provider_stats);

    let date_range = DateRange {
        start: daily_averages.keys().next().copied(),
        end: daily_averages.keys().next_back().copied(),
        days: daily_averages.len(),
    };

    TemporalAnalysis {
        total_points: points.len(),
        date_range,
        daily_averages,
        trends,
        insights,
        provider_stats,
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn provider_scores(points: &[GeoPoint]) -> IndexMap<String, ProviderScore> {
    let mut grouped: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for point in points {
        grouped
            .entry(point.provider_label())
            .or_default()
            .push(point.overall_score());
    }
    grouped
        .into_iter()
        .map(|(provider, scores)| {
            (
                provider.to_string(),
                ProviderScore {
                    count: scores.len(),
                    avg_score: round2(mean(&scores)),
                },
            )
        })
        .collect()
}

fn build_insights(
    trends: &OverallTrends,
    providers: &IndexMap<String, ProviderScore>,
) -> Vec<String> {
    let mut insights = Vec::new();

    insights.push(
        if trends.avg_quality_score >= 80.0 {
            "Overall connectivity quality is excellent across all points"
        } else if trends.avg_quality_score >= 60.0 {
            "Overall connectivity quality is good with room for improvement"
        } else {
            "Overall connectivity quality needs significant improvement"
        }
        .to_string(),
    );

    insights.push(
        if trends.avg_download >= 100.0 {
            "Download speeds meet Starlink 2026 target expectations"
        } else if trends.avg_download >= 50.0 {
            "Download speeds are acceptable but below optimal targets"
        } else {
            "Download speeds are below target thresholds"
        }
        .to_string(),
    );

    insights.push(
        if trends.avg_latency <= 40.0 {
            "Latency is within Starlink 2026 target range"
        } else {
            "Latency exceeds target thresholds and needs optimization"
        }
        .to_string(),
    );

    // First provider with the strictly highest positive average
    let mut best: Option<(&str, f64)> = None;
    for (provider, stats) in providers {
        if stats.avg_score > best.map_or(0.0, |(_, avg)| avg) {
            best = Some((provider.as_str(), stats.avg_score));
        }
    }
    if let Some((provider, avg)) = best {
        insights.push(format!(
            "{provider} shows the best average quality score ({avg:.1}/100)"
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurement, QualityScore};
    use crate::utils::parse_timestamp;

    fn point(ts: Option<&str>, provider: &str, q: f64, download: f64, latency: f64) -> GeoPoint {
        let mut p = GeoPoint::new(-10.0, -55.0)
            .with_provider(provider)
            .with_measurement(Measurement::new(download, 10.0, latency))
            .with_quality_score(QualityScore::from_components(q, q, q));
        p.timestamp = ts.and_then(parse_timestamp);
        p
    }

    #[test]
    fn test_groups_by_day() {
        let points = vec![
            point(Some("2026-01-15T08:00:00"), "Starlink", 90.0, 150.0, 25.0),
            point(Some("2026-01-15T20:00:00"), "Starlink", 80.0, 130.0, 35.0),
            point(Some("2026-01-16T09:00:00Z"), "Vivo", 50.0, 40.0, 80.0),
            point(None, "Claro", 60.0, 60.0, 60.0),
        ];
        let analysis = analyze_temporal_evolution(&points);

        assert_eq!(analysis.total_points, 4);
        assert_eq!(analysis.date_range.days, 2);
        let jan15 = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        assert_eq!(analysis.date_range.start, Some(jan15));
        let day = &analysis.daily_averages[&jan15];
        assert_eq!(day.count, 2);
        assert_eq!(day.avg_quality_score, 85.0);
        assert_eq!(day.min_quality_score, 80.0);
        assert_eq!(day.max_quality_score, 90.0);

        // Untimestamped point still counts toward trends
        assert_eq!(analysis.trends.avg_quality_score, 70.0);
        assert_eq!(analysis.provider_stats.len(), 3);
    }

    #[test]
    fn test_insights() {
        let points = vec![
            point(Some("2026-01-15"), "Starlink", 92.0, 180.0, 25.0),
            point(Some("2026-01-16"), "Vivo", 84.0, 120.0, 30.0),
        ];
        let insights = analyze_temporal_evolution(&points).insights;
        assert_eq!(insights.len(), 4);
        assert!(insights[0].contains("excellent"));
        assert!(insights[1].contains("meet"));
        assert!(insights[2].contains("within"));
        assert_eq!(insights[3], "Starlink shows the best average quality score (92.0/100)");
    }

    #[test]
    fn test_poor_batch_insights() {
        let points = vec![point(None, "Vivo", 30.0, 20.0, 120.0)];
        let insights = analyze_temporal_evolution(&points).insights;
        assert!(insights[0].contains("needs significant improvement"));
        assert!(insights[1].contains("below target"));
        assert!(insights[2].contains("exceeds"));
    }

    #[test]
    fn test_empty_batch() {
        let analysis = analyze_temporal_evolution(&[]);
        assert_eq!(analysis, TemporalAnalysis::default());
    }
}
