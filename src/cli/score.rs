//! Score command handler.
//!
//! Implements the `score` subcommand for a single measurement.

use crate::config::AppConfig;
use crate::model::Measurement;
use crate::pipeline::{exit_codes, to_pretty_json, write_output, OutputTarget, Planner};
use anyhow::Result;
use std::path::PathBuf;

/// Score one measurement and print the result as JSON.
pub fn run_score(
    config: AppConfig,
    measurement: Measurement,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let score = planner.score(&measurement);
    tracing::debug!(
        "Scored measurement: {} ({})",
        score.overall_score,
        score.rating.name()
    );

    let json = to_pretty_json(&score)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("score.json");
        let code = run_score(
            AppConfig::default(),
            Measurement::new(200.0, 20.0, 20.0),
            Some(path.clone()),
            true,
        )
        .expect("scored");
        assert_eq!(code, exit_codes::SUCCESS);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json");
        assert_eq!(value["rating"], "Excellent");
        assert_eq!(value["overall_score"], 100.0);
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = AppConfig::builder().zones(0).build();
        assert!(run_score(config, Measurement::new(1.0, 1.0, 1.0), None, true).is_err());
    }
}
