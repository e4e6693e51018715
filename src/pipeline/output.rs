//! Output handling for planner results.
//!
//! JSON for machines, a compact colored summary for terminals.

use crate::analysis::ExpansionReport;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }
}

/// Rendering for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Human-readable summary
    Summary,
}

/// Serialize any result as pretty JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Output written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary renderer for shell output
#[derive(Debug, Clone)]
pub struct SummaryRenderer {
    colored: bool,
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryRenderer {
    /// Colored unless `NO_COLOR` is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colored: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    #[must_use]
    pub fn render_report(&self, report: &ExpansionReport) -> String {
        let mut lines = Vec::new();
        let roi = &report.roi_analysis;

        lines.push(self.color("Expansion Report", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!(
            "{} {}",
            self.color("Points analyzed:", "cyan"),
            report.summary.total_points_analyzed
        ));
        lines.push(format!(
            "{} {} ({}%)",
            self.color("Rural points:", "cyan"),
            roi.rural_points,
            roi.rural_percentage
        ));
        lines.push(format!(
            "{} {}",
            self.color("High priority:", "cyan"),
            roi.high_priority_points
        ));
        lines.push(format!(
            "{} {}",
            self.color("Avg quality:", "cyan"),
            roi.avg_current_quality
        ));
        let suitability = format!("{:.2}", roi.starlink_suitability_score);
        let suitability_color = if roi.starlink_suitability_score >= 50.0 {
            "green"
        } else {
            "yellow"
        };
        lines.push(format!(
            "{} {}",
            self.color("Suitability:", "cyan"),
            self.color(&suitability, suitability_color)
        ));

        lines.push(String::new());
        lines.push(self.color("Recommendations", "bold"));
        for rec in &roi.recommendations {
            lines.push(format!("  • {}", rec.message));
        }

        if !report.expansion_zones.zones.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Zones", "bold"));
            for (id, zone) in &report.expansion_zones.zones {
                lines.push(format!(
                    "  {} {} points, quality {}, priority {}",
                    self.color(id, "cyan"),
                    zone.point_count,
                    zone.avg_quality,
                    zone.priority_score
                ));
                lines.push(format!("    {}", self.color(&zone.recommendation, "dim")));
            }
        }

        if !report.top_priority_areas.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Top priority areas", "bold"));
            for area in &report.top_priority_areas {
                let flag = if area.is_rural { "rural" } else { "urban" };
                lines.push(format!(
                    "  {:>6.2}  ({:.4}, {:.4})  {}  quality {}  {}",
                    area.priority_score,
                    area.latitude,
                    area.longitude,
                    area.provider,
                    area.current_quality,
                    self.color(flag, if area.is_rural { "red" } else { "dim" })
                ));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
        let path = PathBuf::from("/tmp/report.json");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("out.json");
        write_output("{}", &OutputTarget::File(path.clone()), true).expect("written");
        assert_eq!(std::fs::read_to_string(path).expect("readable"), "{}");
    }

    #[test]
    fn test_plain_summary_has_no_ansi() {
        let text = SummaryRenderer::new()
            .no_color()
            .render_report(&ExpansionReport::empty());
        assert!(text.starts_with("Expansion Report"));
        assert!(text.contains("MONITOR"));
        assert!(!text.contains('\x1b'));
    }
}
