//! Connectivity quality scoring.
//!
//! Turns a raw speed-test measurement into a [`QualityScore`]:
//!
//! - **Speed**: download and upload as a capped percentage of target
//! - **Latency**: piecewise-linear curve over configurable thresholds
//! - **Stability**: recorded value, or estimated from jitter, packet loss and obstruction
//!
//! # Usage
//!
//! ```
//! use connectivity_planner::config::ScoringConfig;
//! use connectivity_planner::model::{Measurement, Rating};
//! use connectivity_planner::quality::QualityScorer;
//!
//! let scorer = QualityScorer::new(ScoringConfig::default());
//! let score = scorer.score(&Measurement::new(200.0, 20.0, 20.0));
//! assert_eq!(score.rating, Rating::Excellent);
//! ```
//!
//! [`QualityScore`]: crate::model::QualityScore

mod scorer;
mod stability;

pub use scorer::QualityScorer;
pub use stability::{estimate_stability, measurement_stability};
