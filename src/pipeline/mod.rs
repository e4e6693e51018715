//! Pipeline orchestration for planning runs.
//!
//! [`Planner`] wires the scoring, classification, clustering, ROI and
//! forecast stages together from a single validated [`AppConfig`], so CLI
//! handlers never assemble stages by hand.

mod output;

pub use output::{to_pretty_json, write_output, OutputFormat, OutputTarget, SummaryRenderer};

use crate::analysis::{
    analyze_temporal_evolution, build_expansion_report, ExpansionReport, TemporalAnalysis,
};
use crate::clustering::{ZoneAnalysis, ZoneClusterer};
use crate::config::{AppConfig, Validatable};
use crate::error::{PlannerError, Result};
use crate::forecast::{ForecastSeries, TrendForecaster};
use crate::model::{GeoPoint, Measurement, QualityScore};
use crate::priority::{EnrichedPoint, RuralityClassifier};
use crate::quality::QualityScorer;
use crate::roi::{PortfolioSummary, RoiEngine};

/// Exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
}

/// All planning stages configured from one [`AppConfig`].
#[derive(Debug, Clone)]
pub struct Planner {
    config: AppConfig,
    scorer: QualityScorer,
    classifier: RuralityClassifier,
    clusterer: ZoneClusterer,
    roi: RoiEngine,
    forecaster: TrendForecaster,
}

impl Planner {
    /// Validate the configuration and build every stage.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PlannerError::validation(joined));
        }

        Ok(Self {
            scorer: QualityScorer::new(config.scoring.clone()),
            classifier: RuralityClassifier::from_config(&config)?,
            clusterer: ZoneClusterer::from_config(&config),
            roi: RoiEngine::from_config(&config.priority),
            forecaster: TrendForecaster::from_config(&config),
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn score(&self, measurement: &Measurement) -> QualityScore {
        self.scorer.score(measurement)
    }

    /// Score every point that arrived without a quality score.
    pub fn prepare(&self, points: &mut [GeoPoint]) -> usize {
        self.scorer.ensure_scored(points)
    }

    #[must_use]
    pub fn classify(&self, points: &[GeoPoint]) -> Vec<EnrichedPoint> {
        self.classifier.classify(points)
    }

    pub fn expansion_zones(&self, points: &[GeoPoint]) -> Result<ZoneAnalysis> {
        self.clusterer.expansion_zones(&self.classify(points))
    }

    pub fn profile_zones(&self, points: &[GeoPoint]) -> Result<ZoneAnalysis> {
        self.clusterer.profile_zones(&self.classify(points))
    }

    #[must_use]
    pub fn roi(&self, points: &[GeoPoint]) -> PortfolioSummary {
        self.roi.analyze(&self.classify(points))
    }

    #[must_use]
    pub fn forecast(&self, history: &[GeoPoint]) -> ForecastSeries {
        self.forecaster.forecast(history)
    }

    #[must_use]
    pub fn temporal(&self, points: &[GeoPoint]) -> TemporalAnalysis {
        analyze_temporal_evolution(points)
    }

    pub fn expansion_report(&self, points: &[GeoPoint]) -> Result<ExpansionReport> {
        build_expansion_report(
            points,
            &self.classifier,
            &self.clusterer,
            &self.roi,
            self.config.priority.top_priority_count,
        )
    }
}
