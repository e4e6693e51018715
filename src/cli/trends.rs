//! Trends and providers command handlers.

use super::load_scored_points;
use crate::analysis::{compare_providers, summary_statistics};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, to_pretty_json, write_output, OutputTarget, Planner};
use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

/// Daily evolution, overall trends and insights.
pub fn run_trends(
    config: AppConfig,
    records: PathBuf,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let points = load_scored_points(&planner, &records)?;
    let analysis = planner.temporal(&points);

    let json = to_pretty_json(&analysis)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// Batch statistics plus a per-provider comparison.
pub fn run_providers(
    config: AppConfig,
    records: PathBuf,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let points = load_scored_points(&planner, &records)?;

    let output = json!({
        "summary": summary_statistics(&points),
        "providers": compare_providers(&points),
    });

    let json = to_pretty_json(&output)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}
