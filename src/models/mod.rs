//! Data types shared by the estimator and the presentation layer.

pub mod metrics;
pub mod prediction;

pub use metrics::{Feature, HealthMetrics};
pub use prediction::{PredictionResult, RiskBand};
