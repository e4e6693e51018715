//! Link stability estimation.

use crate::model::Measurement;
use crate::utils::clamp_score;

/// Per-unit penalty for jitter (ms)
const JITTER_PENALTY: f64 = 2.0;
const JITTER_CAP: f64 = 40.0;
/// Per-unit penalty for packet loss (%)
const PACKET_LOSS_PENALTY: f64 = 10.0;
const PACKET_LOSS_CAP: f64 = 40.0;
/// Per-unit penalty for dish obstruction (%)
const OBSTRUCTION_PENALTY: f64 = 0.2;
const OBSTRUCTION_CAP: f64 = 20.0;

/// Estimate stability in `[0, 100]` from jitter, packet loss and obstruction.
///
/// Each penalty is capped independently, so the result is monotonically
/// non-increasing in every input.
#[must_use]
pub fn estimate_stability(jitter: f64, packet_loss: f64, obstruction: f64) -> f64 {
    let jitter_penalty = penalty(jitter, JITTER_PENALTY, JITTER_CAP);
    let loss_penalty = penalty(packet_loss, PACKET_LOSS_PENALTY, PACKET_LOSS_CAP);
    let obstruction_penalty = penalty(obstruction, OBSTRUCTION_PENALTY, OBSTRUCTION_CAP);

    clamp_score(100.0 - jitter_penalty - loss_penalty - obstruction_penalty)
}

/// Stability for a measurement: the recorded value when present, otherwise estimated.
#[must_use]
pub fn measurement_stability(measurement: &Measurement) -> f64 {
    match measurement.stability {
        Some(known) if known.is_finite() => clamp_score(known),
        _ => estimate_stability(
            measurement.jitter,
            measurement.packet_loss,
            measurement.obstruction,
        ),
    }
}

fn penalty(value: f64, per_unit: f64, cap: f64) -> f64 {
    // Negative input is already invalid upstream; treat it as no penalty
    (value.max(0.0) * per_unit).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_link_is_perfect() {
        assert_eq!(estimate_stability(0.0, 0.0, 0.0), 100.0);
    }

    #[test]
    fn test_penalties_are_capped() {
        assert_eq!(estimate_stability(25.0, 5.0, 0.0), 20.0);
        assert_eq!(estimate_stability(1000.0, 0.0, 0.0), 60.0);
        assert_eq!(estimate_stability(0.0, 0.0, 500.0), 80.0);
        assert_eq!(estimate_stability(1000.0, 1000.0, 1000.0), 0.0);
    }

    #[test]
    fn test_partial_penalties() {
        let score = estimate_stability(5.0, 0.5, 10.0);
        assert!((score - 83.0).abs() < 1e-9);
    }

    #[test]
    fn test_recorded_stability_overrides_estimate() {
        let m = Measurement::new(100.0, 10.0, 30.0)
            .with_jitter(30.0)
            .with_stability(91.0);
        assert_eq!(measurement_stability(&m), 91.0);

        let m = Measurement::new(100.0, 10.0, 30.0).with_jitter(10.0);
        assert_eq!(measurement_stability(&m), 80.0);
    }
}
