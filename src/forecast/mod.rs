//! Short-horizon quality trend forecasting.
//!
//! Projects future overall scores from a time-ordered history: the last
//! value grows or decays with the detected trend and regresses toward the
//! historical mean. With enough history the projection is pulled toward
//! the gap-weighted centroid of the history's connectivity profiles.

mod trend;

pub use trend::{Confidence, ForecastSeries, Trend, TrendForecaster};
