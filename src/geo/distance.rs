//! Haversine distance to the nearest reference point.

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// A named reference location such as a major city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReferencePoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ReferencePoint {
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Distance from this reference to a coordinate.
    #[must_use]
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_km(latitude, longitude, self.latitude, self.longitude)
    }
}

/// Closest reference to a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestReference<'a> {
    pub reference: &'a ReferencePoint,
    pub distance_km: f64,
}

/// Fixed set of reference points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceSet {
    points: Vec<ReferencePoint>,
}

impl ReferenceSet {
    #[must_use]
    pub fn new(points: Vec<ReferencePoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nearest reference point, or `None` for an empty set.
    #[must_use]
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<NearestReference<'_>> {
        self.points
            .iter()
            .map(|reference| NearestReference {
                reference,
                distance_km: reference.distance_km(latitude, longitude),
            })
            .min_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
    }

    /// Minimum distance to any reference point. An empty set yields 0.
    #[must_use]
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        self.nearest(latitude, longitude)
            .map_or(0.0, |n| n.distance_km)
    }

    /// Distances for a batch of coordinates, computed in parallel.
    #[must_use]
    pub fn distances_km(&self, coordinates: &[(f64, f64)]) -> Vec<f64> {
        coordinates
            .par_iter()
            .map(|&(lat, lon)| self.distance_km(lat, lon))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brazil() -> ReferenceSet {
        ReferenceSet::preset("brazil").expect("brazil preset")
    }

    #[test]
    fn test_haversine_known_distance() {
        // São Paulo to Rio de Janeiro is roughly 360 km
        let d = haversine_km(-23.5505, -46.6333, -22.9068, -43.1729);
        assert!((d - 360.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = haversine_km(-10.0, -55.0, -3.7172, -38.5434);
        let b = haversine_km(-3.7172, -38.5434, -10.0, -55.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_distance_zero_at_reference() {
        let set = brazil();
        for reference in set.points() {
            assert_eq!(set.distance_km(reference.latitude, reference.longitude), 0.0);
        }
    }

    #[test]
    fn test_nearest_picks_closest() {
        let set = brazil();
        let nearest = set.nearest(-22.0, -43.5).expect("non-empty");
        assert_eq!(nearest.reference.name, "Rio de Janeiro");
    }

    #[test]
    fn test_order_independent() {
        let set = brazil();
        let mut reversed = set.points().to_vec();
        reversed.reverse();
        let reversed = ReferenceSet::new(reversed);
        let d1 = set.distance_km(-10.0, -55.0);
        let d2 = reversed.distance_km(-10.0, -55.0);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_empty_set_yields_zero() {
        let set = ReferenceSet::default();
        assert!(set.nearest(1.0, 1.0).is_none());
        assert_eq!(set.distance_km(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_batch_distances_match_single() {
        let set = brazil();
        let coords = [(-10.0, -55.0), (-23.5505, -46.6333), (-5.0, -60.0)];
        let batch = set.distances_km(&coords);
        for (i, &(lat, lon)) in coords.iter().enumerate() {
            assert_eq!(batch[i], set.distance_km(lat, lon));
        }
    }
}
