//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod analyze;
mod forecast;
mod score;
mod trends;

pub use analyze::{run_analyze, run_zones, ZoneMode};
pub use forecast::run_forecast;
pub use score::run_score;
pub use trends::{run_providers, run_trends};

use crate::model::{load_points, GeoPoint};
use crate::pipeline::Planner;
use anyhow::{Context, Result};
use std::path::Path;

/// Load records from disk and score the ones that arrived unscored.
fn load_scored_points(planner: &Planner, path: &Path) -> Result<Vec<GeoPoint>> {
    let mut points =
        load_points(path).with_context(|| format!("Failed to load {}", path.display()))?;
    let scored = planner.prepare(&mut points);
    if scored > 0 {
        tracing::info!("Scored {scored} records without a quality score");
    }
    Ok(points)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write a record file with a mix of rural and urban points.
    pub fn record_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        let records = r#"[
            {"latitude": -23.5505, "longitude": -46.6333, "provider": "Starlink",
             "timestamp": "2024-03-01T10:00:00Z",
             "speed_test": {"download": 180.0, "upload": 18.0, "latency": 25.0}},
            {"latitude": -10.0, "longitude": -55.0, "provider": "Starlink",
             "timestamp": "2024-03-02T10:00:00Z",
             "speed_test": {"download": 40.0, "upload": 5.0, "latency": 90.0, "jitter": 20.0}},
            {"latitude": -9.5, "longitude": -56.0, "provider": "Viasat",
             "timestamp": "2024-03-03T10:00:00Z",
             "speed_test": {"download": 20.0, "upload": 2.0, "latency": 600.0, "packet_loss": 3.0}},
            {"latitude": -22.9068, "longitude": -43.1729,
             "timestamp": "2024-03-04T10:00:00Z",
             "speed_test": {"download": 150.0, "upload": 15.0, "latency": 35.0}}
        ]"#;
        file.write_all(records.as_bytes()).expect("write records");
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_load_scored_points_fills_scores() {
        let file = test_support::record_file();
        let planner = Planner::from_config(AppConfig::default()).expect("valid");
        let points = load_scored_points(&planner, file.path()).expect("loads");
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.quality_score.is_some()));
    }

    #[test]
    fn test_missing_file_is_error() {
        let planner = Planner::from_config(AppConfig::default()).expect("valid");
        let err = load_scored_points(&planner, Path::new("/nonexistent/records.json"))
            .expect_err("missing file");
        assert!(err.to_string().contains("records.json"));
    }
}
