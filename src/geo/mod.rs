//! Geographic reference geometry.
//!
//! Great-circle distances from a point to the nearest member of a named
//! reference set (major population centers). The reference set is always
//! passed in explicitly; presets are only constructors.

mod distance;
mod presets;

pub use distance::{haversine_km, NearestReference, ReferencePoint, ReferenceSet, EARTH_RADIUS_KM};
pub use presets::{CountryCenter, LATAM_COUNTRIES};
