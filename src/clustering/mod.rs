//! Zone clustering.
//!
//! One mechanism serves both clustering modes: features are extracted by a
//! [`FeatureExtractor`], standardized to zero mean and unit variance, then
//! partitioned with seeded k-means. Each non-empty cluster is summarized
//! into a [`Zone`] with a recommendation from a fixed decision table.
//!
//! - [`ProfileFeatures`]: `[download, upload, latency, overall_score]`
//! - [`ExpansionFeatures`]: `[latitude, longitude, quality_gap * rural_factor]`

mod features;
mod kmeans;
mod zones;

pub use features::{ExpansionFeatures, FeatureExtractor, ProfileFeatures};
pub use kmeans::{KMeans, KMeansFit, Standardizer};
pub use zones::{
    Cluster, Clustering, FeatureStat, Zone, ZoneAnalysis, ZoneCentroid, ZoneClusterer, ZoneMap,
    ZoneMember, ZonePriority, ZoneRecommendation,
};
