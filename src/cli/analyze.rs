//! Analyze and zones command handlers.
//!
//! `analyze` produces the full expansion report; `zones` runs only the
//! clusterer in either of its two modes.

use super::load_scored_points;
use crate::config::AppConfig;
use crate::pipeline::{
    exit_codes, to_pretty_json, write_output, OutputFormat, OutputTarget, Planner,
    SummaryRenderer,
};
use anyhow::Result;
use std::path::PathBuf;

/// Feature space used by the `zones` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ZoneMode {
    /// Location plus weighted quality gap
    #[default]
    Expansion,
    /// Download, upload, latency and overall score
    Profile,
}

/// Run the analyze command, returning the desired exit code.
pub fn run_analyze(
    config: AppConfig,
    records: PathBuf,
    format: OutputFormat,
    output_file: Option<PathBuf>,
    no_color: bool,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let points = load_scored_points(&planner, &records)?;
    let report = planner.expansion_report(&points)?;

    let target = OutputTarget::from_option(output_file);
    let text = match format {
        OutputFormat::Json => to_pretty_json(&report)?,
        OutputFormat::Summary => {
            let renderer = SummaryRenderer::new();
            let renderer = if no_color || matches!(target, OutputTarget::File(_)) {
                renderer.no_color()
            } else {
                renderer
            };
            renderer.render_report(&report)
        }
    };

    write_output(&text, &target, quiet)?;
    Ok(exit_codes::SUCCESS)
}

/// Run the zones command, returning the desired exit code.
pub fn run_zones(
    config: AppConfig,
    records: PathBuf,
    mode: ZoneMode,
    output_file: Option<PathBuf>,
    quiet: bool,
) -> Result<i32> {
    let planner = Planner::from_config(config)?;
    let points = load_scored_points(&planner, &records)?;

    let analysis = match mode {
        ZoneMode::Expansion => planner.expansion_zones(&points)?,
        ZoneMode::Profile => planner.profile_zones(&points)?,
    };

    let json = to_pretty_json(&analysis)?;
    write_output(&json, &OutputTarget::from_option(output_file), quiet)?;
    Ok(exit_codes::SUCCESS)
}
