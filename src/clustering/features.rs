//! Feature extraction for the zone clusterer.
//!
//! Both clustering modes share one mechanism; they differ only in which
//! columns are pulled out of each point.

use crate::model::GeoPoint;
use crate::priority::EnrichedPoint;

/// Maps an item to a fixed-width feature row.
pub trait FeatureExtractor<T>: Sync {
    /// Column names, one per feature. The row width must match.
    fn feature_names(&self) -> &'static [&'static str];

    /// Extract the feature row for one item.
    fn extract(&self, item: &T) -> Vec<f64>;

    /// Number of features per row
    fn dimension(&self) -> usize {
        self.feature_names().len()
    }
}

/// Connectivity profile: `[download, upload, latency, overall_score]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileFeatures;

impl ProfileFeatures {
    pub const NAMES: &'static [&'static str] = &["download", "upload", "latency", "overall_score"];
}

impl FeatureExtractor<GeoPoint> for ProfileFeatures {
    fn feature_names(&self) -> &'static [&'static str] {
        Self::NAMES
    }

    fn extract(&self, point: &GeoPoint) -> Vec<f64> {
        let m = &point.measurement;
        vec![m.download, m.upload, m.latency, point.overall_score()]
    }
}

impl FeatureExtractor<EnrichedPoint> for ProfileFeatures {
    fn feature_names(&self) -> &'static [&'static str] {
        Self::NAMES
    }

    fn extract(&self, item: &EnrichedPoint) -> Vec<f64> {
        <Self as FeatureExtractor<GeoPoint>>::extract(self, &item.point)
    }
}

/// Expansion geometry: `[latitude, longitude, quality_gap * rural_factor]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpansionFeatures;

impl ExpansionFeatures {
    pub const NAMES: &'static [&'static str] = &["latitude", "longitude", "weighted_gap"];
}

impl FeatureExtractor<EnrichedPoint> for ExpansionFeatures {
    fn feature_names(&self) -> &'static [&'static str] {
        Self::NAMES
    }

    fn extract(&self, item: &EnrichedPoint) -> Vec<f64> {
        vec![
            item.point.latitude,
            item.point.longitude,
            item.analysis.quality_gap * item.analysis.rural_factor,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Measurement, QualityScore};
    use crate::priority::PriorityAssessment;

    fn enriched() -> EnrichedPoint {
        let point = GeoPoint::new(-10.0, -55.0)
            .with_measurement(Measurement::new(50.0, 5.0, 80.0))
            .with_quality_score(QualityScore::from_components(30.0, 30.0, 30.0));
        EnrichedPoint {
            point,
            analysis: PriorityAssessment {
                distance_from_reference_km: 1000.0,
                nearest_reference: None,
                is_rural: true,
                rural_factor: 2.0,
                quality_gap: 70.0,
                improvement_potential: 140.0,
                priority_score: 100.0,
            },
        }
    }

    #[test]
    fn test_profile_row() {
        let item = enriched();
        let row = FeatureExtractor::<EnrichedPoint>::extract(&ProfileFeatures, &item);
        assert_eq!(row, vec![50.0, 5.0, 80.0, 30.0]);
        assert_eq!(FeatureExtractor::<GeoPoint>::dimension(&ProfileFeatures), 4);
    }

    #[test]
    fn test_expansion_row_weights_gap_by_rurality() {
        let row = ExpansionFeatures.extract(&enriched());
        assert_eq!(row, vec![-10.0, -55.0, 140.0]);
    }
}
