//! Quality score and rating.

use crate::utils::{clamp_score, round2};
use serde::{Deserialize, Serialize};

/// Weight of the speed component in the overall score
pub const SPEED_WEIGHT: f64 = 0.4;
/// Weight of the latency component in the overall score
pub const LATENCY_WEIGHT: f64 = 0.3;
/// Weight of the stability component in the overall score
pub const STABILITY_WEIGHT: f64 = 0.3;

/// Categorical rating derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// 80-100
    Excellent,
    /// 60-79.99
    Good,
    /// 40-59.99
    Fair,
    /// Below 40
    Poor,
}

impl Rating {
    /// Step function over the overall score with boundaries at 80/60/40.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Quality score for a single measurement
///
/// Stored records may carry only `overall_score`; missing components decode
/// as 0 and a missing rating is derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "QualityScoreRecord")]
pub struct QualityScore {
    pub speed_score: f64,
    pub latency_score: f64,
    pub stability_score: f64,
    /// Weighted blend, always in `[0, 100]`
    pub overall_score: f64,
    pub rating: Rating,
}

/// Wire shape of a stored quality score.
#[derive(Deserialize)]
struct QualityScoreRecord {
    #[serde(default)]
    speed_score: f64,
    #[serde(default)]
    latency_score: f64,
    #[serde(default)]
    stability_score: f64,
    overall_score: f64,
    #[serde(default)]
    rating: Option<Rating>,
}

impl From<QualityScoreRecord> for QualityScore {
    fn from(raw: QualityScoreRecord) -> Self {
        Self {
            speed_score: raw.speed_score,
            latency_score: raw.latency_score,
            stability_score: raw.stability_score,
            overall_score: raw.overall_score,
            rating: raw
                .rating
                .unwrap_or_else(|| Rating::from_score(raw.overall_score)),
        }
    }
}

impl QualityScore {
    /// Blend component scores 40/30/30 into an overall score rounded to 2 decimals.
    #[must_use]
    pub fn from_components(speed_score: f64, latency_score: f64, stability_score: f64) -> Self {
        let speed_score = round2(clamp_score(speed_score));
        let latency_score = round2(clamp_score(latency_score));
        let stability_score = round2(clamp_score(stability_score));
        let overall_score = round2(clamp_score(
            speed_score * SPEED_WEIGHT
                + latency_score * LATENCY_WEIGHT
                + stability_score * STABILITY_WEIGHT,
        ));

        Self {
            speed_score,
            latency_score,
            stability_score,
            overall_score,
            rating: Rating::from_score(overall_score),
        }
    }

    /// Headroom to a perfect score, never negative.
    #[must_use]
    pub fn quality_gap(&self) -> f64 {
        (100.0 - self.overall_score).max(0.0)
    }
}
