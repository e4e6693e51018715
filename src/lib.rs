//! **Connectivity quality scoring and expansion planning from geo-tagged speed tests.**
//!
//! `connectivity-planner` turns a batch of network measurements (download, upload,
//! latency, jitter, packet loss, dish obstruction) taken at known coordinates into
//! planning signals: how good the connection is, how remote the location is, which
//! areas most deserve investment, and where quality is heading.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Measurement`], [`QualityScore`] and [`GeoPoint`], the record shape
//!   consumed from the record store.
//! - **[`quality`]**: the [`QualityScorer`] and the stability estimator.
//! - **[`geo`]**: great-circle distance and named [`ReferenceSet`] presets.
//! - **[`priority`]**: the [`RuralityClassifier`], which flags rural points and ranks
//!   the batch by improvement priority.
//! - **[`clustering`]**: a seeded k-means [`ZoneClusterer`] producing expansion or
//!   performance-profile zones.
//! - **[`roi`]**: portfolio-level summary and recommendations.
//! - **[`forecast`]**: trend detection and short-horizon projection.
//! - **[`analysis`]**: temporal evolution, provider comparison and the combined
//!   expansion report.
//! - **[`pipeline`]**: the [`Planner`] facade that wires every stage from one
//!   [`AppConfig`].
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use connectivity_planner::{load_points, AppConfig, Planner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let planner = Planner::from_config(AppConfig::default())?;
//!     let mut points = load_points(Path::new("records.json"))?;
//!     planner.prepare(&mut points);
//!
//!     let report = planner.expansion_report(&points)?;
//!     println!(
//!         "{} zones, suitability {:.1}",
//!         report.expansion_zones.total_zones,
//!         report.roi_analysis.starlink_suitability_score
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Scoring a single measurement
//!
//! ```
//! use connectivity_planner::{Measurement, QualityScorer, Rating};
//!
//! let score = QualityScorer::default().score(&Measurement::new(200.0, 20.0, 20.0));
//! assert_eq!(score.overall_score, 100.0);
//! assert_eq!(score.rating, Rating::Excellent);
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize→f64 casts in statistics; counts stay far below 2^52
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::fn_params_excessive_bools,
    // Variable names like `lat`/`lon` or `min`/`max` are clear in context
    clippy::similar_names
)]

pub mod analysis;
pub mod cli;
pub mod clustering;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod model;
pub mod pipeline;
pub mod priority;
pub mod quality;
pub mod roi;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{ExpansionReport, TemporalAnalysis};
pub use clustering::{Zone, ZoneAnalysis, ZoneClusterer};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use error::{ErrorContext, OptionContext, PlannerError, Result};
pub use forecast::{ForecastSeries, TrendForecaster};
pub use geo::{haversine_km, ReferencePoint, ReferenceSet};
pub use model::{load_points, parse_points, GeoPoint, Measurement, QualityScore, Rating};
pub use pipeline::Planner;
pub use priority::{EnrichedPoint, RuralityClassifier};
pub use quality::QualityScorer;
pub use roi::{PortfolioSummary, RoiEngine};
