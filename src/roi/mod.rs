//! Portfolio-level return-on-investment analysis.

mod engine;

pub use engine::{PortfolioRecommendation, PortfolioSummary, RecommendationKind, RoiEngine};
