//! Batch classifier producing per-point priority assessments.

use crate::config::{AppConfig, PriorityConfig};
use crate::error::Result;
use crate::geo::ReferenceSet;
use crate::model::GeoPoint;
use crate::utils::round2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Upper bound on the distance multiplier
pub const MAX_RURAL_FACTOR: f64 = 2.0;

/// Distance (km) that adds one unit of rural factor
const RURAL_FACTOR_SCALE_KM: f64 = 100.0;

/// `min(distance_km / 100, 2)`
#[must_use]
pub fn rural_factor(distance_km: f64) -> f64 {
    (distance_km.max(0.0) / RURAL_FACTOR_SCALE_KM).min(MAX_RURAL_FACTOR)
}

/// `quality_gap * (1 + rural_factor * 0.5)`
#[must_use]
pub fn improvement_potential(quality_gap: f64, distance_km: f64) -> f64 {
    quality_gap.max(0.0) * (1.0 + rural_factor(distance_km) * 0.5)
}

// ============================================================================
// Assessment types
// ============================================================================

/// Derived rurality and priority data for one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAssessment {
    /// Distance to the nearest reference point
    pub distance_from_reference_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearest_reference: Option<String>,
    pub is_rural: bool,
    pub rural_factor: f64,
    pub quality_gap: f64,
    pub improvement_potential: f64,
    /// Potential relative to the batch maximum, in `[0, 100]`
    pub priority_score: f64,
}

/// A point together with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub analysis: PriorityAssessment,
}

impl EnrichedPoint {
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        self.point.overall_score()
    }

    #[must_use]
    pub const fn priority_score(&self) -> f64 {
        self.analysis.priority_score
    }

    #[must_use]
    pub const fn is_rural(&self) -> bool {
        self.analysis.is_rural
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Rurality / priority classifier over a fixed reference set.
#[derive(Debug, Clone)]
pub struct RuralityClassifier {
    references: ReferenceSet,
    rural_threshold_km: f64,
    config: PriorityConfig,
}

impl RuralityClassifier {
    #[must_use]
    pub const fn new(
        references: ReferenceSet,
        rural_threshold_km: f64,
        config: PriorityConfig,
    ) -> Self {
        Self {
            references,
            rural_threshold_km,
            config,
        }
    }

    /// Build a classifier from the `geo` and `priority` config sections.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            config.geo.reference_set()?,
            config.geo.rural_threshold_km,
            config.priority.clone(),
        ))
    }

    #[must_use]
    pub const fn references(&self) -> &ReferenceSet {
        &self.references
    }

    #[must_use]
    pub const fn rural_threshold_km(&self) -> f64 {
        self.rural_threshold_km
    }

    /// Rural when strictly beyond the threshold.
    #[must_use]
    pub fn is_rural(&self, distance_km: f64) -> bool {
        distance_km > self.rural_threshold_km
    }

    /// High priority when strictly above the configured threshold.
    #[must_use]
    pub fn is_high_priority(&self, assessment: &PriorityAssessment) -> bool {
        assessment.priority_score > self.config.high_priority_threshold
    }

    /// Assess a single point without batch context.
    ///
    /// The priority score is the improvement potential capped at 100, so it
    /// stays on the same `[0, 100]` scale as batch-normalized scores even
    /// though the raw potential can reach 200.
    #[must_use]
    pub fn assess(&self, point: &GeoPoint) -> PriorityAssessment {
        self.assess_with_potential(point).0
    }

    /// Assessment plus the unrounded improvement potential.
    fn assess_with_potential(&self, point: &GeoPoint) -> (PriorityAssessment, f64) {
        let nearest = self.references.nearest(point.latitude, point.longitude);
        let distance = nearest.map_or(0.0, |n| n.distance_km);
        let gap = point.quality_gap();
        let potential = improvement_potential(gap, distance);

        let assessment = PriorityAssessment {
            distance_from_reference_km: round2(distance),
            nearest_reference: nearest.map(|n| n.reference.name.clone()),
            is_rural: self.is_rural(distance),
            rural_factor: rural_factor(distance),
            quality_gap: round2(gap),
            improvement_potential: round2(potential),
            priority_score: round2(potential.min(100.0)),
        };
        (assessment, potential)
    }

    /// Assess a batch, scaling priority against the batch maximum.
    ///
    /// Batches smaller than `min_batch_for_normalization` keep the
    /// single-point priority.
    #[must_use]
    pub fn classify(&self, points: &[GeoPoint]) -> Vec<EnrichedPoint> {
        tracing::info!("Classifying {} points", points.len());

        let (mut assessments, potentials): (Vec<PriorityAssessment>, Vec<f64>) = points
            .par_iter()
            .map(|p| self.assess_with_potential(p))
            .unzip();

        if points.len() < self.config.min_batch_for_normalization {
            if !points.is_empty() {
                tracing::warn!(
                    "Batch of {} points is below {}; priority scores are not batch-normalized",
                    points.len(),
                    self.config.min_batch_for_normalization
                );
            }
        } else {
            normalize_priorities(&mut assessments, &potentials);
        }

        points
            .iter()
            .cloned()
            .zip(assessments)
            .map(|(point, analysis)| EnrichedPoint { point, analysis })
            .collect()
    }
}

/// Scale each potential against the batch maximum of the unrounded values.
fn normalize_priorities(assessments: &mut [PriorityAssessment], potentials: &[f64]) {
    let max = potentials.iter().copied().fold(0.0_f64, f64::max);

    for (a, potential) in assessments.iter_mut().zip(potentials) {
        a.priority_score = if max > 0.0 {
            round2(potential / max * 100.0)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QualityScore;

    fn classifier() -> RuralityClassifier {
        RuralityClassifier::from_config(&AppConfig::default()).expect("default config")
    }

    fn scored(lat: f64, lon: f64, overall: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).with_quality_score(QualityScore::from_components(
            overall, overall, overall,
        ))
    }

    #[test]
    fn test_rural_factor_capped() {
        assert_eq!(rural_factor(0.0), 0.0);
        assert_eq!(rural_factor(50.0), 0.5);
        assert_eq!(rural_factor(1000.0), MAX_RURAL_FACTOR);
    }

    #[test]
    fn test_improvement_potential() {
        assert_eq!(improvement_potential(40.0, 0.0), 40.0);
        assert_eq!(improvement_potential(40.0, 100.0), 60.0);
        assert_eq!(improvement_potential(40.0, 5000.0), 80.0);
    }

    #[test]
    fn test_city_point_is_urban() {
        let a = classifier().assess(&scored(-23.5505, -46.6333, 90.0));
        assert!(!a.is_rural);
        assert_eq!(a.distance_from_reference_km, 0.0);
        assert_eq!(a.nearest_reference.as_deref(), Some("São Paulo"));
        assert_eq!(a.improvement_potential, 10.0);
    }

    #[test]
    fn test_batch_normalized_to_max() {
        let points = vec![
            scored(-10.0, -55.0, 30.0),
            scored(-23.5505, -46.6333, 90.0),
            scored(-22.9068, -43.1729, 50.0),
        ];
        let enriched = classifier().classify(&points);
        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].priority_score(), 100.0);
        assert!(enriched[0].priority_score() > enriched[1].priority_score());
        assert!(enriched[0].is_rural());
        assert!(enriched.iter().all(|e| (0.0..=100.0).contains(&e.priority_score())));
    }

    #[test]
    fn test_all_perfect_batch_has_zero_priority() {
        let points = vec![scored(0.0, 0.0, 100.0); 4];
        let enriched = classifier().classify(&points);
        assert!(enriched.iter().all(|e| e.priority_score() == 0.0));
    }

    #[test]
    fn test_small_batch_not_normalized() {
        let points = vec![scored(-23.5505, -46.6333, 70.0)];
        let enriched = classifier().classify(&points);
        assert_eq!(enriched[0].priority_score(), 30.0);
    }

    #[test]
    fn test_small_batch_priority_capped_at_100() {
        // zero score far from every city: potential 200
        let points = vec![scored(-10.0, -55.0, 0.0)];
        let enriched = classifier().classify(&points);
        assert_eq!(enriched[0].analysis.improvement_potential, 200.0);
        assert_eq!(enriched[0].priority_score(), 100.0);
    }

    #[test]
    fn test_normalization_uses_unrounded_potential() {
        let mut assessments = vec![
            classifier().assess(&scored(0.0, 0.0, 0.0)),
            classifier().assess(&scored(0.0, 0.0, 0.0)),
        ];
        // stored potentials are rounded copies of these
        let potentials = [1.004_9, 1.0];
        assessments[0].improvement_potential = round2(potentials[0]);
        assessments[1].improvement_potential = round2(potentials[1]);
        normalize_priorities(&mut assessments, &potentials);
        assert_eq!(assessments[0].priority_score, 100.0);
        // 1.0 / 1.0049 * 100 = 99.51; dividing rounded values would give 100.0
        assert_eq!(assessments[1].priority_score, 99.51);
    }

    #[test]
    fn test_high_priority_threshold_is_strict() {
        let c = classifier();
        let mut a = c.assess(&scored(0.0, 0.0, 0.0));
        a.priority_score = 70.0;
        assert!(!c.is_high_priority(&a));
        a.priority_score = 70.01;
        assert!(c.is_high_priority(&a));
    }

    #[test]
    fn test_enriched_point_serializes_flat() {
        let enriched = classifier().classify(&[scored(-10.0, -55.0, 30.0)]);
        let json = serde_json::to_value(&enriched[0]).expect("serializable");
        assert!(json.get("latitude").is_some());
        assert!(json["analysis"]["is_rural"].as_bool().unwrap_or(false));
    }
}
