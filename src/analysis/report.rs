//! Combined expansion report.

use serde::{Deserialize, Serialize};

use crate::clustering::{ZoneAnalysis, ZoneClusterer};
use crate::error::{ErrorContext, Result};
use crate::model::GeoPoint;
use crate::priority::{EnrichedPoint, RuralityClassifier};
use crate::roi::{PortfolioSummary, RoiEngine};

/// Report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_points_analyzed: usize,
    pub engine_version: String,
}

/// One of the highest-priority points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityArea {
    pub provider: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_quality: f64,
    pub priority_score: f64,
    pub distance_from_reference_km: f64,
    pub is_rural: bool,
}

impl From<&EnrichedPoint> for PriorityArea {
    fn from(p: &EnrichedPoint) -> Self {
        Self {
            provider: p.point.provider_label().to_string(),
            latitude: p.point.latitude,
            longitude: p.point.longitude,
            current_quality: p.overall_score(),
            priority_score: p.analysis.priority_score,
            distance_from_reference_km: p.analysis.distance_from_reference_km,
            is_rural: p.analysis.is_rural,
        }
    }
}

/// Classification, zones, ROI and the top priority areas for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub summary: ReportSummary,
    pub roi_analysis: PortfolioSummary,
    pub expansion_zones: ZoneAnalysis,
    pub top_priority_areas: Vec<PriorityArea>,
    pub enriched_data: Vec<EnrichedPoint>,
}

impl ExpansionReport {
    /// Report for an empty batch; nothing is computed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            summary: ReportSummary {
                total_points_analyzed: 0,
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            roi_analysis: PortfolioSummary::default(),
            expansion_zones: ZoneAnalysis::default(),
            top_priority_areas: Vec::new(),
            enriched_data: Vec::new(),
        }
    }
}

/// Classify a scored batch, cluster it into expansion zones, summarize ROI
/// and pick the `top_n` highest-priority points.
pub fn build_expansion_report(
    points: &[GeoPoint],
    classifier: &RuralityClassifier,
    clusterer: &ZoneClusterer,
    roi: &RoiEngine,
    top_n: usize,
) -> Result<ExpansionReport> {
    tracing::info!("Generating expansion report for {} points", points.len());
    if points.is_empty() {
        tracing::warn!("No data provided for expansion report");
        return Ok(ExpansionReport::empty());
    }

    let enriched = classifier.classify(points);
    let expansion_zones = clusterer
        .expansion_zones(&enriched)
        .context("building expansion report")?;
    let roi_analysis = roi.analyze(&enriched);

    let mut ranked: Vec<&EnrichedPoint> = enriched.iter().collect();
    ranked.sort_by(|a, b| b.priority_score().total_cmp(&a.priority_score()));
    let top_priority_areas = ranked.into_iter().take(top_n).map(PriorityArea::from).collect();

    let report = ExpansionReport {
        summary: ReportSummary {
            total_points_analyzed: points.len(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        roi_analysis,
        expansion_zones,
        top_priority_areas,
        enriched_data: enriched,
    };
    tracing::info!("Expansion report complete");
    Ok(report)
}
