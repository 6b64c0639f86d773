//! Logistic risk estimator.
//!
//! Each input is standardized against its reference statistics, combined
//! linearly with the model weights, and squashed through the sigmoid. The
//! estimator holds no mutable state; copies can be shared freely.

use std::collections::BTreeMap;

use tracing::{instrument, trace};

use crate::core::model::{ModelParameters, STANDARD_MODEL};
use crate::errors::Result;
use crate::models::{Feature, HealthMetrics, PredictionResult};

const CONFIDENCE_FLOOR: f64 = 0.75;
const CONFIDENCE_SLOPE: f64 = 0.4;
const CONFIDENCE_CEILING: f64 = 0.99;

#[derive(Debug, Clone, Copy)]
pub struct RiskEstimator {
    params: ModelParameters,
}

impl RiskEstimator {
    /// Builds an estimator after checking the parameter tables.
    pub fn new(params: ModelParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Estimator over the built-in coefficients and Pima scaling statistics.
    pub fn standard() -> Result<Self> {
        Self::new(STANDARD_MODEL)
    }

    pub fn normalize(&self, metrics: &HealthMetrics, feature: Feature) -> f64 {
        self.params.scaling.get(feature).standardize(metrics.get(feature))
    }

    /// Linear score before the logistic transform.
    pub fn score(&self, metrics: &HealthMetrics) -> f64 {
        let weights = &self.params.coefficients.weights;
        Feature::ALL
            .into_iter()
            .fold(self.params.coefficients.intercept, |z, feature| {
                z + weights.get(feature) * self.normalize(metrics, feature)
            })
    }

    /// Risk and confidence for one set of metrics.
    ///
    /// Finite input always yields a finite result, even for zero or negative
    /// values. Non-finite input is not guarded against and propagates into
    /// the result.
    #[instrument(level = "debug", skip(self, metrics))]
    pub fn estimate(&self, metrics: &HealthMetrics) -> PredictionResult {
        let z = self.score(metrics);
        let risk = sigmoid(z);
        let confidence = confidence_for(risk);
        trace!(z, risk, confidence, "scored metrics");
        PredictionResult { risk, confidence }
    }

    /// Relative contribution of glucose, BMI, age, pedigree and blood pressure.
    ///
    /// This is a display heuristic, not a feature-attribution method: each
    /// field's weighted standardized value is taken in absolute terms and the
    /// five are scaled to sum to 1. When every included field sits exactly on
    /// its reference mean there is nothing to compare, and each field gets an
    /// equal share.
    pub fn explain(&self, metrics: &HealthMetrics) -> BTreeMap<Feature, f64> {
        let weights = &self.params.coefficients.weights;
        let raw: Vec<(Feature, f64)> = Feature::EXPLAINED
            .into_iter()
            .map(|feature| {
                let contribution = self.normalize(metrics, feature) * weights.get(feature);
                (feature, contribution.abs())
            })
            .collect();

        let total: f64 = raw.iter().map(|(_, value)| value).sum();
        if total == 0.0 {
            let share = 1.0 / raw.len() as f64;
            return raw.into_iter().map(|(feature, _)| (feature, share)).collect();
        }

        raw.into_iter()
            .map(|(feature, value)| (feature, value / total))
            .collect()
    }
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Grows with the distance of `risk` from 0.5, from 0.75 up to a 0.99 cap.
/// Not a calibrated uncertainty.
pub fn confidence_for(risk: f64) -> f64 {
    let confidence = CONFIDENCE_FLOOR + CONFIDENCE_SLOPE * (risk - 0.5).abs();
    if confidence > CONFIDENCE_CEILING {
        CONFIDENCE_CEILING
    } else {
        confidence
    }
}
