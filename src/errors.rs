//! Error types for the risk estimator and its submission boundary.

use thiserror::Error;

use crate::models::Feature;

#[derive(Debug, Error)]
pub enum RiskError {
    /// One or more required fields were missing or not positive.
    #[error("Please fill in all required fields (missing: {})", join_features(.missing))]
    IncompleteSubmission { missing: Vec<Feature> },

    /// A constant model table failed validation.
    #[error("invalid model parameters for {feature}: {reason}")]
    InvalidModel { feature: String, reason: String },

    #[error("failed to parse health metrics: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read health metrics: {0}")]
    Io(#[from] std::io::Error),
}

fn join_features(features: &[Feature]) -> String {
    features
        .iter()
        .map(|feature| feature.key())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T, E = RiskError> = std::result::Result<T, E>;
