//! Rurality and priority classification.
//!
//! Combines each point's quality gap with its distance to the nearest
//! reference point into an improvement potential, then scales that potential
//! against the batch maximum to get a 0-100 priority score.

mod classifier;

pub use classifier::{
    improvement_potential, rural_factor, EnrichedPoint, PriorityAssessment, RuralityClassifier,
    MAX_RURAL_FACTOR,
};
