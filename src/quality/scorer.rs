//! Connectivity quality scorer.
//!
//! Combines a speed component, a piecewise latency curve and link stability
//! into a 0-100 overall score with a categorical rating.

use crate::config::ScoringConfig;
use crate::model::{GeoPoint, Measurement, QualityScore};
use crate::utils::clamp_score;
use rayon::prelude::*;

use super::stability::measurement_stability;

/// Latency score at the "good" threshold
const LATENCY_GOOD_SCORE: f64 = 75.0;
/// Latency score at the "fair" threshold
const LATENCY_FAIR_SCORE: f64 = 25.0;

/// Quality scorer.
///
/// Pure and stateless apart from its targets, so one instance can score
/// any number of batches concurrently.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: ScoringConfig,
}

impl QualityScorer {
    /// Create a scorer with the given targets
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Average of the capped download and upload percentages of target.
    #[must_use]
    pub fn speed_score(&self, download: f64, upload: f64) -> f64 {
        let download_pct = percent_of(download, self.config.target_download);
        let upload_pct = percent_of(upload, self.config.target_upload);
        (download_pct + upload_pct) / 2.0
    }

    /// Piecewise-linear latency curve, non-increasing in latency.
    #[must_use]
    pub fn latency_score(&self, latency_ms: f64) -> f64 {
        let c = &self.config;
        let latency = latency_ms.max(0.0);

        let score = if latency <= c.latency_excellent_ms {
            100.0
        } else if latency <= c.latency_good_ms {
            interpolate(
                latency,
                (c.latency_excellent_ms, 100.0),
                (c.latency_good_ms, LATENCY_GOOD_SCORE),
            )
        } else if latency <= c.latency_fair_ms {
            interpolate(
                latency,
                (c.latency_good_ms, LATENCY_GOOD_SCORE),
                (c.latency_fair_ms, LATENCY_FAIR_SCORE),
            )
        } else if latency <= c.latency_floor_ms {
            interpolate(
                latency,
                (c.latency_fair_ms, LATENCY_FAIR_SCORE),
                (c.latency_floor_ms, 0.0),
            )
        } else {
            0.0
        };

        clamp_score(score)
    }

    /// Score a single measurement.
    #[must_use]
    pub fn score(&self, measurement: &Measurement) -> QualityScore {
        QualityScore::from_components(
            self.speed_score(measurement.download, measurement.upload),
            self.latency_score(measurement.latency),
            measurement_stability(measurement),
        )
    }

    /// Score a point's measurement, ignoring any stored score.
    #[must_use]
    pub fn score_point(&self, point: &GeoPoint) -> QualityScore {
        self.score(&point.measurement)
    }

    /// Fill in missing quality scores across a batch.
    ///
    /// Points that already carry a score keep it. Returns how many points
    /// were scored.
    pub fn ensure_scored(&self, points: &mut [GeoPoint]) -> usize {
        let scored = points
            .par_iter_mut()
            .filter(|p| p.quality_score.is_none())
            .map(|p| {
                p.quality_score = Some(self.score(&p.measurement));
            })
            .count();

        if scored > 0 {
            tracing::debug!("Scored {} of {} points", scored, points.len());
        }
        scored
    }
}

fn percent_of(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

fn interpolate(x: f64, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> f64 {
    if x1 <= x0 {
        return y1;
    }
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;

    fn scorer() -> QualityScorer {
        QualityScorer::default()
    }

    #[test]
    fn test_speed_score_caps_each_direction() {
        let s = scorer();
        assert_eq!(s.speed_score(200.0, 20.0), 100.0);
        assert_eq!(s.speed_score(400.0, 0.0), 50.0);
        assert_eq!(s.speed_score(100.0, 5.0), 37.5);
    }

    #[test]
    fn test_latency_curve_breakpoints() {
        let s = scorer();
        assert_eq!(s.latency_score(0.0), 100.0);
        assert_eq!(s.latency_score(20.0), 100.0);
        assert_eq!(s.latency_score(30.0), 87.5);
        assert_eq!(s.latency_score(40.0), 75.0);
        assert_eq!(s.latency_score(70.0), 50.0);
        assert_eq!(s.latency_score(100.0), 25.0);
        assert_eq!(s.latency_score(150.0), 12.5);
        assert_eq!(s.latency_score(200.0), 0.0);
        assert_eq!(s.latency_score(900.0), 0.0);
    }

    #[test]
    fn test_latency_curve_non_increasing() {
        let s = scorer();
        let mut previous = f64::INFINITY;
        for ms in 0..400 {
            let score = s.latency_score(f64::from(ms));
            assert!(score <= previous, "latency {ms}");
            previous = score;
        }
    }

    #[test]
    fn test_ideal_measurement_is_excellent() {
        let score = scorer().score(&Measurement::new(200.0, 20.0, 20.0));
        assert_eq!(score.stability_score, 100.0);
        assert!(score.overall_score >= 95.0);
        assert_eq!(score.rating, Rating::Excellent);
    }

    #[test]
    fn test_degraded_measurement_is_poor() {
        let m = Measurement::new(20.0, 2.0, 150.0)
            .with_jitter(25.0)
            .with_packet_loss(5.0);
        let score = scorer().score(&m);
        assert_eq!(score.speed_score, 10.0);
        assert_eq!(score.latency_score, 12.5);
        assert_eq!(score.stability_score, 20.0);
        assert_eq!(score.overall_score, 13.75);
        assert_eq!(score.rating, Rating::Poor);
    }

    #[test]
    fn test_ensure_scored_keeps_existing() {
        let existing = QualityScore::from_components(10.0, 10.0, 10.0);
        let mut points = vec![
            GeoPoint::new(0.0, 0.0).with_quality_score(existing),
            GeoPoint::new(1.0, 1.0).with_measurement(Measurement::new(200.0, 20.0, 10.0)),
        ];
        assert_eq!(scorer().ensure_scored(&mut points), 1);
        assert_eq!(points[0].quality_score, Some(existing));
        assert_eq!(points[1].overall_score(), 100.0);
    }
}
