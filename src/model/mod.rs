//! Record model for geo-tagged connectivity measurements.
//!
//! These types mirror the record shape exchanged with the record store:
//!
//! ```text
//! { latitude, longitude, provider, timestamp,
//!   speed_test: { download, upload, latency, jitter, packet_loss, obstruction, stability },
//!   quality_score: { speed_score, latency_score, stability_score, overall_score, rating } }
//! ```
//!
//! Optional measurement fields default to 0 when absent; an absent
//! `quality_score` reads as an overall score of 0 until it is scored.

mod measurement;
mod point;
mod score;

pub use measurement::Measurement;
pub use point::{load_points, parse_points, GeoPoint};
pub use score::{QualityScore, Rating};
