//! Zone clusterer: standardize, partition, then summarize each cluster.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::features::{ExpansionFeatures, FeatureExtractor, ProfileFeatures};
use super::kmeans::{KMeans, Standardizer};
use crate::config::{AppConfig, ClusteringConfig};
use crate::error::{ClusterErrorKind, PlannerError, Result};
use crate::priority::{rural_factor, EnrichedPoint};
use crate::utils::{mean, population_std_dev, round2, round4};

/// Zones keyed by id (`zone_1`, `zone_2`, ...), highest priority first
pub type ZoneMap = IndexMap<String, Zone>;

// ============================================================================
// Generic clustering output
// ============================================================================

/// Mean and population standard deviation of one feature within a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStat {
    pub mean: f64,
    pub std: f64,
}

/// One non-empty cluster over extracted features.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Label assigned by the partitioner
    pub label: usize,
    /// Indices into the clustered batch
    pub members: Vec<usize>,
    /// Centroid in original feature units
    pub centroid: Vec<f64>,
    pub feature_stats: Vec<FeatureStat>,
}

/// Result of clustering a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub feature_names: &'static [&'static str],
    /// Non-empty clusters in label order
    pub clusters: Vec<Cluster>,
    /// Effective cluster count after reducing to the batch size
    pub k: usize,
    pub iterations: usize,
    pub converged: bool,
}

impl Clustering {
    fn empty(feature_names: &'static [&'static str]) -> Self {
        Self {
            feature_names,
            clusters: Vec::new(),
            k: 0,
            iterations: 0,
            converged: true,
        }
    }

    /// Centroid value of a named feature.
    #[must_use]
    pub fn centroid_value(&self, cluster: &Cluster, feature: &str) -> Option<f64> {
        self.feature_names
            .iter()
            .position(|name| *name == feature)
            .and_then(|i| cluster.centroid.get(i).copied())
    }
}

// ============================================================================
// Zones
// ============================================================================

/// Investment tier of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZonePriority {
    High,
    Medium,
    Low,
}

/// Recommendation drawn from the `(avg_quality bucket, rural)` decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRecommendation {
    RuralPoor,
    RuralModerate,
    UrbanPoor,
    RuralGood,
    UrbanGood,
}

impl ZoneRecommendation {
    /// Urban zones with quality in `[60, 80)` fall through to the maintain case.
    #[must_use]
    pub fn classify(avg_quality: f64, is_rural: bool) -> Self {
        match (is_rural, avg_quality) {
            (true, q) if q < 60.0 => Self::RuralPoor,
            (true, q) if q < 80.0 => Self::RuralModerate,
            (false, q) if q < 60.0 => Self::UrbanPoor,
            (true, _) => Self::RuralGood,
            (false, _) => Self::UrbanGood,
        }
    }

    #[must_use]
    pub const fn priority(&self) -> ZonePriority {
        match self {
            Self::RuralPoor => ZonePriority::High,
            Self::RuralModerate | Self::UrbanPoor => ZonePriority::Medium,
            Self::RuralGood | Self::UrbanGood => ZonePriority::Low,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RuralPoor => {
                "HIGH PRIORITY: Rural area with poor connectivity - ideal for Starlink expansion"
            }
            Self::RuralModerate => {
                "MEDIUM PRIORITY: Rural area with moderate connectivity - good Starlink candidate"
            }
            Self::UrbanPoor => {
                "MEDIUM PRIORITY: Urban area with poor connectivity - consider infrastructure upgrade"
            }
            Self::RuralGood => {
                "LOW PRIORITY: Rural area with good connectivity - monitor for degradation"
            }
            Self::UrbanGood => {
                "LOW PRIORITY: Urban area with good connectivity - maintain current service"
            }
        }
    }
}

/// Zone center: raw geographic mean for expansion zones, feature-space
/// centroid for profile zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneCentroid {
    Geographic { latitude: f64, longitude: f64 },
    Profile(IndexMap<String, f64>),
}

/// A zone member, referenced by its index in the clustered batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMember {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub overall_score: f64,
    pub distance_from_reference_km: f64,
    pub is_rural: bool,
}

/// Summary of one cluster of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub centroid: ZoneCentroid,
    pub point_count: usize,
    pub avg_quality: f64,
    pub avg_distance_from_reference_km: f64,
    /// Strict majority of members are rural
    pub is_primarily_rural: bool,
    /// `(100 - avg_quality) * (1 + min(avg_distance / 100, 2))`
    pub priority_score: f64,
    pub priority: ZonePriority,
    pub recommendation: String,
    pub feature_stats: IndexMap<String, FeatureStat>,
    pub members: Vec<ZoneMember>,
}

/// Zones plus headline counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnalysis {
    pub total_zones: usize,
    pub zones: ZoneMap,
    pub top_priority_zone: Option<String>,
}

impl ZoneAnalysis {
    fn from_zones(mut zones: Vec<(String, Zone)>) -> Self {
        zones.sort_by(|a, b| b.1.priority_score.total_cmp(&a.1.priority_score));
        let zones: ZoneMap = zones.into_iter().collect();
        Self {
            total_zones: zones.len(),
            top_priority_zone: zones.keys().next().cloned(),
            zones,
        }
    }
}

// ============================================================================
// Clusterer
// ============================================================================

/// Seeded zone clusterer.
#[derive(Debug, Clone, Default)]
pub struct ZoneClusterer {
    config: ClusteringConfig,
}

impl ZoneClusterer {
    #[must_use]
    pub const fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.clustering.clone())
    }

    /// Override the target cluster count.
    #[must_use]
    pub const fn with_zones(mut self, zones: usize) -> Self {
        self.config.zones = zones;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Standardize extracted features and partition them into at most
    /// `zones` clusters.
    ///
    /// Fails only when the extractor produces no columns, rows of the wrong
    /// width, or non-finite values.
    pub fn cluster<T, F>(&self, items: &[T], extractor: &F) -> Result<Clustering>
    where
        T: Sync,
        F: FeatureExtractor<T>,
    {
        let names = extractor.feature_names();
        let dim = names.len();
        if dim == 0 {
            return Err(PlannerError::clustering(
                "extracting features",
                ClusterErrorKind::EmptyFeatureSet,
            ));
        }
        if items.is_empty() {
            return Ok(Clustering::empty(names));
        }

        let rows: Vec<Vec<f64>> = items.par_iter().map(|i| extractor.extract(i)).collect();
        validate_rows(&rows, dim)?;

        let k = self.config.zones.max(1).min(rows.len());
        if k < self.config.zones {
            tracing::warn!(
                "Requested {} zones but only {} points; using {} zones",
                self.config.zones,
                rows.len(),
                k
            );
        }

        let scaler = Standardizer::fit(&rows, dim);
        let scaled: Vec<Vec<f64>> = rows.iter().map(|r| scaler.transform(r)).collect();
        let fit = KMeans::new(k, self.config.seed)
            .with_max_iterations(self.config.max_iterations)
            .with_tolerance(self.config.tolerance)
            .fit(&scaled);

        if !fit.converged {
            tracing::warn!(
                "k-means stopped at the {} iteration cap without converging",
                fit.iterations
            );
        }

        let clusters = fit
            .centroids
            .iter()
            .enumerate()
            .filter_map(|(label, centroid)| {
                let members: Vec<usize> = fit
                    .labels
                    .iter()
                    .enumerate()
                    .filter(|&(_, &l)| l == label)
                    .map(|(i, _)| i)
                    .collect();
                if members.is_empty() {
                    return None;
                }
                let feature_stats = (0..dim)
                    .map(|c| {
                        let values: Vec<f64> = members.iter().map(|&i| rows[i][c]).collect();
                        FeatureStat {
                            mean: mean(&values),
                            std: population_std_dev(&values),
                        }
                    })
                    .collect();
                Some(Cluster {
                    label,
                    members,
                    centroid: scaler.inverse_transform(centroid),
                    feature_stats,
                })
            })
            .collect();

        Ok(Clustering {
            feature_names: names,
            clusters,
            k,
            iterations: fit.iterations,
            converged: fit.converged,
        })
    }

    /// Geographic expansion zones over `[latitude, longitude, gap * rural_factor]`.
    pub fn expansion_zones(&self, points: &[EnrichedPoint]) -> Result<ZoneAnalysis> {
        tracing::info!(
            "Identifying up to {} expansion zones over {} points",
            self.config.zones,
            points.len()
        );
        let clustering = self.cluster(points, &ExpansionFeatures)?;
        let analysis = self.summarize(points, &clustering, |cluster| {
            let lat: Vec<f64> = cluster.members.iter().map(|&i| points[i].point.latitude).collect();
            let lon: Vec<f64> = cluster.members.iter().map(|&i| points[i].point.longitude).collect();
            ZoneCentroid::Geographic {
                latitude: round4(mean(&lat)),
                longitude: round4(mean(&lon)),
            }
        });
        tracing::info!("Identified {} expansion zones", analysis.total_zones);
        Ok(analysis)
    }

    /// Connectivity-profile zones over `[download, upload, latency, overall_score]`.
    pub fn profile_zones(&self, points: &[EnrichedPoint]) -> Result<ZoneAnalysis> {
        tracing::info!(
            "Clustering {} points into up to {} profile zones",
            points.len(),
            self.config.zones
        );
        let clustering = self.cluster(points, &ProfileFeatures)?;
        let analysis = self.summarize(points, &clustering, |cluster| {
            ZoneCentroid::Profile(
                clustering
                    .feature_names
                    .iter()
                    .zip(&cluster.centroid)
                    .map(|(name, value)| ((*name).to_string(), round2(*value)))
                    .collect(),
            )
        });
        Ok(analysis)
    }

    fn summarize(
        &self,
        points: &[EnrichedPoint],
        clustering: &Clustering,
        centroid: impl Fn(&Cluster) -> ZoneCentroid,
    ) -> ZoneAnalysis {
        let zones = clustering
            .clusters
            .iter()
            .map(|cluster| {
                let id = format!("zone_{}", cluster.label + 1);
                (id, build_zone(points, clustering, cluster, centroid(cluster)))
            })
            .collect();
        ZoneAnalysis::from_zones(zones)
    }
}

fn build_zone(
    points: &[EnrichedPoint],
    clustering: &Clustering,
    cluster: &Cluster,
    centroid: ZoneCentroid,
) -> Zone {
    let members: Vec<ZoneMember> = cluster
        .members
        .iter()
        .map(|&index| {
            let p = &points[index];
            ZoneMember {
                index,
                latitude: p.point.latitude,
                longitude: p.point.longitude,
                overall_score: p.overall_score(),
                distance_from_reference_km: p.analysis.distance_from_reference_km,
                is_rural: p.analysis.is_rural,
            }
        })
        .collect();

    let qualities: Vec<f64> = members.iter().map(|m| m.overall_score).collect();
    let distances: Vec<f64> = members.iter().map(|m| m.distance_from_reference_km).collect();
    let avg_quality = mean(&qualities);
    let avg_distance = mean(&distances);
    let rural_count = members.iter().filter(|m| m.is_rural).count();
    let is_primarily_rural = rural_count * 2 > members.len();

    let priority_score = (100.0 - avg_quality).max(0.0) * (1.0 + rural_factor(avg_distance));
    let recommendation = ZoneRecommendation::classify(avg_quality, is_primarily_rural);

    let feature_stats = clustering
        .feature_names
        .iter()
        .zip(&cluster.feature_stats)
        .map(|(name, stat)| {
            (
                (*name).to_string(),
                FeatureStat {
                    mean: round2(stat.mean),
                    std: round2(stat.std),
                },
            )
        })
        .collect();

    Zone {
        centroid,
        point_count: members.len(),
        avg_quality: round2(avg_quality),
        avg_distance_from_reference_km: round2(avg_distance),
        is_primarily_rural,
        priority_score: round2(priority_score),
        priority: recommendation.priority(),
        recommendation: recommendation.message().to_string(),
        feature_stats,
        members,
    }
}

fn validate_rows(rows: &[Vec<f64>], dim: usize) -> Result<()> {
    for (row, values) in rows.iter().enumerate() {
        if values.len() != dim {
            return Err(PlannerError::clustering(
                "validating features",
                ClusterErrorKind::DimensionMismatch {
                    row,
                    expected: dim,
                    found: values.len(),
                },
            ));
        }
        if let Some(column) = values.iter().position(|v| !v.is_finite()) {
            return Err(PlannerError::clustering(
                "validating features",
                ClusterErrorKind::NonFiniteFeature { row, column },
            ));
        }
    }
    Ok(())
}
