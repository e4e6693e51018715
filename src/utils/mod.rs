//! Shared utilities.

mod stats;
mod timestamp;

pub use stats::{clamp_score, mean, population_std_dev, round2, round4};
pub(crate) use timestamp::deserialize_optional_timestamp;
pub use timestamp::parse_timestamp;
