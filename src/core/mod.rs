//! Risk model, estimator, and the input boundary around them.

pub mod data;
pub mod estimator;
pub mod model;
pub mod submission;

pub use estimator::RiskEstimator;
pub use submission::{assess, Assessment};
