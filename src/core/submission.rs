//! Boundary between user input and the estimator: required-field checks,
//! scoring, and the fallback for a result that could not be computed.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::estimator::RiskEstimator;
use crate::errors::{Result, RiskError};
use crate::models::{Feature, HealthMetrics, PredictionResult, RiskBand};

/// Required fields that are missing, i.e. not strictly positive, in
/// declaration order. NaN counts as present.
pub fn missing_required(metrics: &HealthMetrics) -> Vec<Feature> {
    Feature::REQUIRED
        .into_iter()
        .filter(|feature| metrics.get(*feature) <= 0.0)
        .collect()
}

pub fn validate_submission(metrics: &HealthMetrics) -> Result<()> {
    let missing = missing_required(metrics);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RiskError::IncompleteSubmission { missing })
    }
}

pub const FAILURE_NOTICE: &str =
    "Error generating prediction: there was a problem processing your data. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub result: PredictionResult,
    /// Absent when the result is the fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<RiskBand>,
    /// Set when the estimator produced a non-finite result and
    /// [`PredictionResult::FALLBACK`] was substituted.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<BTreeMap<Feature, f64>>,
}

/// Validates a submission and scores it.
///
/// Incomplete submissions are rejected before the estimator runs. A result
/// that is not finite is never handed back as-is: it is replaced by the
/// fallback and flagged as degraded.
#[instrument(skip(estimator, metrics))]
pub fn assess(
    estimator: &RiskEstimator,
    metrics: &HealthMetrics,
    with_factors: bool,
) -> Result<Assessment> {
    if let Err(err) = validate_submission(metrics) {
        info!("submission rejected: {}", err);
        return Err(err);
    }

    let result = estimator.estimate(metrics);
    if !result.is_finite() {
        warn!(?result, "estimator produced a non-finite result; using fallback");
        return Ok(Assessment {
            result: PredictionResult::FALLBACK,
            band: None,
            degraded: true,
            notice: Some(FAILURE_NOTICE),
            factors: None,
        });
    }

    let band = result.band();
    info!(risk = result.risk, %band, "prediction generated");

    Ok(Assessment {
        result,
        band: Some(band),
        degraded: false,
        notice: None,
        factors: with_factors.then(|| estimator.explain(metrics)),
    })
}
