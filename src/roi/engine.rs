//! ROI engine: aggregates classified points into suitability metrics and
//! threshold-driven recommendations.

use crate::config::PriorityConfig;
use crate::priority::EnrichedPoint;
use crate::utils::{mean, round2};
use serde::{Deserialize, Serialize};

/// Rural share above which the market is a strong fit
const STRONG_FIT_RURAL_PCT: f64 = 50.0;
/// Rural share above which the market is a good fit
const GOOD_FIT_RURAL_PCT: f64 = 30.0;
/// Average quality below which there is a clear opportunity
const OPPORTUNITY_QUALITY: f64 = 60.0;
/// Share of high-priority points that calls for urgent action
const URGENT_SHARE: f64 = 0.3;

/// Category of a portfolio recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    StrongFit,
    GoodFit,
    HighOpportunity,
    UrgentAction,
    Monitor,
}

/// A recommendation with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRecommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

impl PortfolioRecommendation {
    fn new(kind: RecommendationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn monitor() -> Self {
        Self::new(
            RecommendationKind::Monitor,
            "MONITOR: Current connectivity is adequate - focus on maintenance and monitoring",
        )
    }
}

/// Portfolio summary over a classified batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_points: usize,
    pub rural_points: usize,
    pub rural_percentage: f64,
    pub high_priority_points: usize,
    pub avg_current_quality: f64,
    pub total_improvement_potential: f64,
    pub avg_improvement_potential: f64,
    /// Blend of rural share and quality deficit, in `[0, 100]`
    pub starlink_suitability_score: f64,
    /// Never empty
    pub recommendations: Vec<PortfolioRecommendation>,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            total_points: 0,
            rural_points: 0,
            rural_percentage: 0.0,
            high_priority_points: 0,
            avg_current_quality: 0.0,
            total_improvement_potential: 0.0,
            avg_improvement_potential: 0.0,
            starlink_suitability_score: 0.0,
            recommendations: vec![PortfolioRecommendation::monitor()],
        }
    }
}

impl PortfolioSummary {
    #[must_use]
    pub fn has(&self, kind: RecommendationKind) -> bool {
        self.recommendations.iter().any(|r| r.kind == kind)
    }
}

/// ROI / recommendation engine.
#[derive(Debug, Clone)]
pub struct RoiEngine {
    high_priority_threshold: f64,
}

impl Default for RoiEngine {
    fn default() -> Self {
        Self::from_config(&PriorityConfig::default())
    }
}

impl RoiEngine {
    #[must_use]
    pub const fn new(high_priority_threshold: f64) -> Self {
        Self {
            high_priority_threshold,
        }
    }

    #[must_use]
    pub const fn from_config(config: &PriorityConfig) -> Self {
        Self::new(config.high_priority_threshold)
    }

    /// `0.5 * rural_percentage + 0.5 * (100 - avg_quality)`, clamped to `[0, 100]`.
    #[must_use]
    pub fn suitability_score(rural_percentage: f64, avg_quality: f64) -> f64 {
        let rural_term = rural_percentage.clamp(0.0, 100.0) / 100.0 * 50.0;
        let deficit_term = (100.0 - avg_quality).clamp(0.0, 100.0) / 100.0 * 50.0;
        rural_term + deficit_term
    }

    /// Summarize a classified batch.
    #[must_use]
    pub fn analyze(&self, points: &[EnrichedPoint]) -> PortfolioSummary {
        tracing::info!("Analyzing ROI over {} points", points.len());
        if points.is_empty() {
            return PortfolioSummary::default();
        }

        let total = points.len();
        let rural_points = points.iter().filter(|p| p.is_rural()).count();
        let high_priority_points = points
            .iter()
            .filter(|p| p.priority_score() > self.high_priority_threshold)
            .count();
        let total_potential: f64 = points
            .iter()
            .map(|p| p.analysis.improvement_potential)
            .sum();
        let qualities: Vec<f64> = points.iter().map(EnrichedPoint::overall_score).collect();
        let avg_quality = mean(&qualities);
        let rural_percentage = rural_points as f64 / total as f64 * 100.0;

        let recommendations =
            Self::recommend(rural_percentage, avg_quality, high_priority_points, total);

        let summary = PortfolioSummary {
            total_points: total,
            rural_points,
            rural_percentage: round2(rural_percentage),
            high_priority_points,
            avg_current_quality: round2(avg_quality),
            total_improvement_potential: round2(total_potential),
            avg_improvement_potential: round2(total_potential / total as f64),
            starlink_suitability_score: round2(Self::suitability_score(
                rural_percentage,
                avg_quality,
            )),
            recommendations,
        };

        tracing::info!(
            "ROI analysis complete: suitability={}, recommendations={}",
            summary.starlink_suitability_score,
            summary.recommendations.len()
        );
        summary
    }

    fn recommend(
        rural_percentage: f64,
        avg_quality: f64,
        high_priority: usize,
        total: usize,
    ) -> Vec<PortfolioRecommendation> {
        let mut recs = Vec::new();

        if rural_percentage > STRONG_FIT_RURAL_PCT {
            recs.push(PortfolioRecommendation::new(
                RecommendationKind::StrongFit,
                "STRONG FIT: Over 50% of points are in rural areas - excellent market for Starlink",
            ));
        } else if rural_percentage > GOOD_FIT_RURAL_PCT {
            recs.push(PortfolioRecommendation::new(
                RecommendationKind::GoodFit,
                "GOOD FIT: Significant rural population - viable Starlink market",
            ));
        }

        if avg_quality < OPPORTUNITY_QUALITY {
            recs.push(PortfolioRecommendation::new(
                RecommendationKind::HighOpportunity,
                "HIGH OPPORTUNITY: Average quality below 60 - significant room for improvement",
            ));
        }

        if high_priority as f64 > total as f64 * URGENT_SHARE {
            recs.push(PortfolioRecommendation::new(
                RecommendationKind::UrgentAction,
                format!("URGENT ACTION: {high_priority} high-priority areas need immediate attention"),
            ));
        }

        if recs.is_empty() {
            recs.push(PortfolioRecommendation::monitor());
        }
        recs
    }
}
