//! Forecast command handler.

use super::load_scored_points;
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, to_pretty_json, write_output, OutputTarget, Planner};
use anyhow::Result;
use std::path::PathBuf;

/// Project future quality scores from a record history.
pub fn run_forecast(
    config: AppConfig,
    records: PathBuf,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let history = load_scored_points(&planner, &records)?;
    let series = planner.forecast(&history);

    tracing::info!(
        "Forecast {} periods, trend {:?}, confidence {:?}",
        series.forecast_horizon,
        series.trend,
        series.confidence
    );

    let json = to_pretty_json(&series)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}
