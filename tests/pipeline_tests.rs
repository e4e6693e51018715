//! Pipeline integration tests.
//!
//! These tests exercise scoring → classification → clustering → ROI →
//! forecast end to end, through both the library facade and real fixture
//! files.

use connectivity_planner::clustering::ZoneCentroid;
use connectivity_planner::config::{load_config_file, AppConfig, ConfigPreset};
use connectivity_planner::roi::RecommendationKind;
use connectivity_planner::{
    load_points, GeoPoint, Measurement, Planner, PlannerError, QualityScore, QualityScorer,
    Rating,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn planner() -> Planner {
    Planner::from_config(AppConfig::default()).expect("default config is valid")
}

fn scored_fixture(planner: &Planner) -> Vec<GeoPoint> {
    let mut points = load_points(&fixture_path("records.json")).expect("fixture loads");
    planner.prepare(&mut points);
    points
}

fn point_with_score(lat: f64, lon: f64, overall: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).with_quality_score(QualityScore::from_components(
        overall, overall, overall,
    ))
}

// ============================================================================
// End-to-end Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn ideal_measurement_is_excellent() {
        let m = Measurement::new(200.0, 20.0, 20.0);
        let score = QualityScorer::default().score(&m);
        assert_eq!(score.stability_score, 100.0);
        assert!(score.overall_score >= 95.0);
        assert_eq!(score.rating, Rating::Excellent);
    }

    #[test]
    fn degraded_measurement_is_poor() {
        let m = Measurement::new(20.0, 2.0, 150.0)
            .with_jitter(25.0)
            .with_packet_loss(5.0);
        let score = QualityScorer::default().score(&m);
        assert!(score.overall_score < 40.0);
        assert_eq!(score.rating, Rating::Poor);
    }

    #[test]
    fn rural_heavy_poor_batch_is_high_opportunity() {
        let points = vec![
            point_with_score(-10.0, -55.0, 15.0),
            point_with_score(-5.0, -60.0, 20.0),
            point_with_score(-12.0, -52.0, 10.0),
            point_with_score(-23.5505, -46.6333, 95.0),
            point_with_score(-22.9068, -43.1729, 100.0),
        ];
        let summary = planner().roi(&points);

        assert_eq!(summary.total_points, 5);
        assert_eq!(summary.rural_points, 3);
        assert_eq!(summary.rural_percentage, 60.0);
        assert!(summary.has(RecommendationKind::HighOpportunity));
        assert!(summary.has(RecommendationKind::StrongFit));
        assert!(summary.starlink_suitability_score >= 50.0);
        assert!(summary.starlink_suitability_score <= 100.0);
    }
}

// ============================================================================
// Priority Ordering
// ============================================================================

mod priority {
    use super::*;

    #[test]
    fn remote_poor_point_outranks_urban_good_point() {
        let points = vec![
            point_with_score(-10.0, -55.0, 30.0),
            point_with_score(-23.5505, -46.6333, 90.0),
        ];
        let enriched = planner().classify(&points);

        let a = &enriched[0].analysis;
        let b = &enriched[1].analysis;
        assert!(a.is_rural);
        assert!(!b.is_rural);
        assert_eq!(b.distance_from_reference_km, 0.0);
        assert!(a.priority_score > b.priority_score);
    }

    #[test]
    fn batch_normalization_peaks_at_100() {
        let planner = planner();
        let enriched = planner.classify(&scored_fixture(&planner));
        let max = enriched
            .iter()
            .map(|p| p.priority_score())
            .fold(f64::MIN, f64::max);
        assert_eq!(max, 100.0);
        assert!(enriched.iter().all(|p| (0.0..=100.0).contains(&p.priority_score())));
    }
}

// ============================================================================
// Zones
// ============================================================================

mod zones {
    use super::*;

    #[test]
    fn members_reproduce_rural_flags() {
        let planner = planner();
        let points = scored_fixture(&planner);
        let analysis = planner.expansion_zones(&points).expect("clusters");

        let reclassified = planner.classify(&points);
        for zone in analysis.zones.values() {
            let rural = zone
                .members
                .iter()
                .filter(|m| {
                    assert_eq!(m.is_rural, reclassified[m.index].is_rural());
                    m.is_rural
                })
                .count();
            assert_eq!(zone.is_primarily_rural, rural * 2 > zone.members.len());
        }
    }

    #[test]
    fn every_point_lands_in_exactly_one_zone() {
        let planner = planner();
        let points = scored_fixture(&planner);
        let analysis = planner.expansion_zones(&points).expect("clusters");

        let mut seen: HashMap<usize, usize> = HashMap::new();
        for zone in analysis.zones.values() {
            for member in &zone.members {
                *seen.entry(member.index).or_default() += 1;
            }
        }
        assert_eq!(seen.len(), points.len());
        assert!(seen.values().all(|&count| count == 1));
    }

    #[test]
    fn zones_sorted_by_priority() {
        let planner = planner();
        let analysis = planner
            .expansion_zones(&scored_fixture(&planner))
            .expect("clusters");
        let scores: Vec<f64> = analysis.zones.values().map(|z| z.priority_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(
            analysis.top_priority_zone.as_deref(),
            analysis.zones.keys().next().map(String::as_str)
        );
    }

    #[test]
    fn more_zones_than_points_is_reduced() {
        let planner = Planner::from_config(AppConfig::builder().zones(10).build()).expect("valid");
        let points = vec![
            point_with_score(-10.0, -55.0, 30.0),
            point_with_score(-23.5505, -46.6333, 90.0),
        ];
        let analysis = planner.expansion_zones(&points).expect("clusters");
        assert_eq!(analysis.total_zones, 2);
    }

    #[test]
    fn clustering_is_deterministic() {
        let planner = planner();
        let points = scored_fixture(&planner);
        let first = planner.expansion_zones(&points).expect("clusters");
        let second = planner.expansion_zones(&points).expect("clusters");
        assert_eq!(first, second);
    }

    #[test]
    fn expansion_centroids_are_geographic() {
        let planner = planner();
        let analysis = planner
            .expansion_zones(&scored_fixture(&planner))
            .expect("clusters");
        for zone in analysis.zones.values() {
            assert!(matches!(zone.centroid, ZoneCentroid::Geographic { .. }));
        }
    }
}

// ============================================================================
// Forecast and Reports
// ============================================================================

mod reports {
    use super::*;

    #[test]
    fn forecast_respects_horizon_and_range() {
        let planner = Planner::from_config(AppConfig::builder().horizon(14).build()).expect("valid");
        let series = planner.forecast(&scored_fixture(&planner));
        assert_eq!(series.forecasts.len(), 14);
        assert!(series.forecasts.iter().all(|v| (0.0..=100.0).contains(v)));
        assert!(series.refined);
    }

    #[test]
    fn refinement_failure_falls_back() {
        let planner = planner();
        let mut points = scored_fixture(&planner);
        points[0].measurement.download = f64::NAN;
        let series = planner.forecast(&points);
        assert_eq!(series.forecasts.len(), 7);
        assert!(!series.refined);
    }

    #[test]
    fn expansion_report_lists_top_areas() {
        let planner = planner();
        let points = scored_fixture(&planner);
        let report = planner.expansion_report(&points).expect("report");

        assert_eq!(report.summary.total_points_analyzed, points.len());
        assert_eq!(report.top_priority_areas.len(), 5);
        assert!(report
            .top_priority_areas
            .windows(2)
            .all(|w| w[0].priority_score >= w[1].priority_score));
        assert_eq!(report.enriched_data.len(), points.len());
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        let report = planner().expansion_report(&[]).expect("report");
        assert_eq!(report.summary.total_points_analyzed, 0);
        assert_eq!(report.expansion_zones.total_zones, 0);
        assert!(report.roi_analysis.has(RecommendationKind::Monitor));
    }

    #[test]
    fn unparseable_timestamps_are_tolerated() {
        let planner = planner();
        let points = scored_fixture(&planner);
        assert!(points.iter().any(|p| p.timestamp.is_none()));

        let temporal = planner.temporal(&points);
        assert_eq!(temporal.total_points, points.len());
        assert_eq!(temporal.date_range.days, 5);
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod configuration {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_file_drives_planner() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "geo:\n  rural_threshold_km: 5000\nclustering:\n  zones: 2\nforecast:\n  horizon: 3"
        )
        .expect("write");

        let config = load_config_file(file.path()).expect("loads");
        let planner = Planner::from_config(config).expect("valid");
        let points = scored_fixture(&planner);

        assert!(planner.classify(&points).iter().all(|p| !p.is_rural()));
        assert_eq!(planner.expansion_zones(&points).expect("zones").total_zones, 2);
        assert_eq!(planner.forecast(&points).forecasts.len(), 3);
    }

    #[test]
    fn latam_preset_uses_country_centers() {
        let planner =
            Planner::from_config(AppConfig::from_preset(ConfigPreset::Latam)).expect("valid");
        let enriched = planner.classify(&[point_with_score(-34.6037, -58.3816, 50.0)]);
        assert_eq!(
            enriched[0].analysis.nearest_reference.as_deref(),
            Some("Argentina")
        );
        assert_eq!(enriched[0].analysis.distance_from_reference_km, 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = AppConfig::builder().reference_preset("atlantis").build();
        assert!(matches!(
            Planner::from_config(config),
            Err(PlannerError::Validation(_))
        ));
    }
}
