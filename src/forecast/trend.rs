//! Trend detection and projection.

use crate::clustering::{ProfileFeatures, ZoneClusterer};
use crate::config::{AppConfig, ClusteringConfig, ForecastConfig};
use crate::error::{ErrorContext, ForecastErrorKind, PlannerError, Result};
use crate::model::GeoPoint;
use crate::utils::{clamp_score, mean, population_std_dev, round2};
use serde::{Deserialize, Serialize};

/// Mean difference (score points) that counts as a trend
const TREND_THRESHOLD: f64 = 5.0;
/// Per-period growth factor while improving
const IMPROVING_FACTOR: f64 = 1.02;
/// Per-period decay factor while declining
const DECLINING_FACTOR: f64 = 0.98;
/// Number of most recent values compared against the rest
const RECENT_WINDOW: usize = 3;
/// Weight of the projection when blending with an anchor value
const PROJECTION_WEIGHT: f64 = 0.7;

/// Direction of the recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Per-period multiplier applied to the last observed value.
    #[must_use]
    pub const fn growth_factor(&self) -> f64 {
        match self {
            Self::Improving => IMPROVING_FACTOR,
            Self::Declining => DECLINING_FACTOR,
            Self::Stable => 1.0,
        }
    }
}

/// Confidence derived from the spread of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// High below 5 std, medium below 15, otherwise low.
    #[must_use]
    pub fn from_std_dev(std: f64) -> Self {
        if std < 5.0 {
            Self::High
        } else if std < 15.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Projected scores for the next `forecast_horizon` periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// One value per period, each in `[0, 100]`
    pub forecasts: Vec<f64>,
    pub baseline_score: f64,
    pub historical_mean: f64,
    pub historical_std: f64,
    pub trend: Trend,
    pub confidence: Confidence,
    pub forecast_horizon: usize,
    /// Whether the projection was blended toward profile centroids
    pub refined: bool,
}

/// Trend forecaster.
#[derive(Debug, Clone, Default)]
pub struct TrendForecaster {
    config: ForecastConfig,
    clusterer: ZoneClusterer,
}

impl TrendForecaster {
    #[must_use]
    pub fn new(config: ForecastConfig, clustering: ClusteringConfig) -> Self {
        let clusterer = ZoneClusterer::new(clustering).with_zones(config.profile_clusters);
        Self { config, clusterer }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.forecast.clone(), config.clustering.clone())
    }

    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.config.horizon
    }

    /// Forecast from scored points in any order.
    ///
    /// Points are sorted by timestamp; points without one sort first.
    /// Refinement failures are logged and the unrefined series is returned.
    #[must_use]
    pub fn forecast(&self, history: &[GeoPoint]) -> ForecastSeries {
        let mut ordered: Vec<&GeoPoint> = history.iter().collect();
        ordered.sort_by_key(|p| p.timestamp);
        let scores: Vec<f64> = ordered.iter().map(|p| p.overall_score()).collect();

        let mut series = self.forecast_scores(&scores);

        if self.config.refine_with_clusters && history.len() >= self.config.min_points_for_refinement
        {
            match self.refinement_target(history) {
                Ok(target) => {
                    for value in &mut series.forecasts {
                        *value = round2(clamp_score(
                            *value * PROJECTION_WEIGHT + target * (1.0 - PROJECTION_WEIGHT),
                        ));
                    }
                    series.refined = true;
                }
                Err(e) => {
                    tracing::warn!("Forecast refinement skipped: {}", e);
                }
            }
        }

        series
    }

    /// Forecast from an already time-ordered score series.
    ///
    /// Non-finite scores are dropped.
    #[must_use]
    pub fn forecast_scores(&self, scores: &[f64]) -> ForecastSeries {
        let horizon = self.config.horizon;
        let values: Vec<f64> = scores.iter().copied().filter(|v| v.is_finite()).collect();
        if values.len() < scores.len() {
            tracing::warn!(
                "Dropped {} non-finite scores from forecast history",
                scores.len() - values.len()
            );
        }

        let baseline = mean(&values);
        let std = population_std_dev(&values);

        if values.len() < 2 {
            let flat = round2(clamp_score(values.first().copied().unwrap_or(0.0)));
            return ForecastSeries {
                forecasts: vec![flat; horizon],
                baseline_score: round2(baseline),
                historical_mean: round2(baseline),
                historical_std: 0.0,
                trend: Trend::Stable,
                confidence: Confidence::Low,
                forecast_horizon: horizon,
                refined: false,
            };
        }

        let trend = detect_trend(&values);
        let factor = trend.growth_factor();
        let last = values[values.len() - 1];

        let forecasts = (1..=horizon)
            .map(|period| {
                let exponent = i32::try_from(period).unwrap_or(i32::MAX);
                let projected = last * factor.powi(exponent);
                round2(clamp_score(
                    projected * PROJECTION_WEIGHT + baseline * (1.0 - PROJECTION_WEIGHT),
                ))
            })
            .collect();

        ForecastSeries {
            forecasts,
            baseline_score: round2(baseline),
            historical_mean: round2(baseline),
            historical_std: round2(std),
            trend,
            confidence: Confidence::from_std_dev(std),
            forecast_horizon: horizon,
            refined: false,
        }
    }

    /// Gap-weighted mean of the profile-cluster centroids' overall score.
    ///
    /// Each cluster weighs `(100 - avg_quality) * member_count`; when every
    /// weight is zero the plain centroid mean is used.
    pub fn refinement_target(&self, history: &[GeoPoint]) -> Result<f64> {
        let clustering = self
            .clusterer
            .cluster(history, &ProfileFeatures)
            .context("clustering forecast history")?;

        let mut weighted = 0.0;
        let mut total_weight = 0.0;
        let mut centroids = Vec::with_capacity(clustering.clusters.len());

        for cluster in &clustering.clusters {
            let centroid = clustering
                .centroid_value(cluster, "overall_score")
                .ok_or_else(|| {
                    PlannerError::forecast(
                        "reading profile centroid",
                        ForecastErrorKind::RefinementUnavailable(
                            "no overall_score feature".to_string(),
                        ),
                    )
                })?;
            let avg_quality = mean(
                &cluster
                    .members
                    .iter()
                    .map(|&i| history[i].overall_score())
                    .collect::<Vec<_>>(),
            );
            let weight = (100.0 - avg_quality).max(0.0) * cluster.members.len() as f64;

            weighted += centroid * weight;
            total_weight += weight;
            centroids.push(centroid);
        }

        if centroids.is_empty() {
            return Err(PlannerError::forecast(
                "computing refinement target",
                ForecastErrorKind::RefinementUnavailable("no profile clusters".to_string()),
            ));
        }

        let target = if total_weight > 0.0 {
            weighted / total_weight
        } else {
            mean(&centroids)
        };
        Ok(clamp_score(target))
    }
}

/// Compare the mean of the last three values with the mean of the rest.
///
/// Histories of three or fewer compare against the first value alone.
fn detect_trend(values: &[f64]) -> Trend {
    let n = values.len();
    let split = n.saturating_sub(RECENT_WINDOW);
    let recent = &values[split..];
    let earlier = if split > 0 { &values[..split] } else { &values[..1] };

    let diff = mean(recent) - mean(earlier);
    if diff > TREND_THRESHOLD {
        Trend::Improving
    } else if diff < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
