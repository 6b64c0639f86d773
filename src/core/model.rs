//! Fixed parameters of the logistic risk model.
//!
//! Coefficients reflect common Type 2 diabetes risk factors; the scaling
//! statistics come from the Pima Indians diabetes dataset. Neither is learned
//! at runtime.

use crate::errors::{Result, RiskError};
use crate::models::Feature;

/// One value per model input. Every slot is a named field, so a table that
/// leaves a feature out does not compile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureTable<T> {
    pub pregnancies: T,
    pub glucose: T,
    pub blood_pressure: T,
    pub skin_thickness: T,
    pub insulin: T,
    pub bmi: T,
    pub diabetes_pedigree: T,
    pub age: T,
}

impl<T> FeatureTable<T> {
    pub fn get(&self, feature: Feature) -> &T {
        match feature {
            Feature::Pregnancies => &self.pregnancies,
            Feature::Glucose => &self.glucose,
            Feature::BloodPressure => &self.blood_pressure,
            Feature::SkinThickness => &self.skin_thickness,
            Feature::Insulin => &self.insulin,
            Feature::Bmi => &self.bmi,
            Feature::DiabetesPedigree => &self.diabetes_pedigree,
            Feature::Age => &self.age,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, &T)> + '_ {
        Feature::ALL.into_iter().map(move |feature| (feature, self.get(feature)))
    }
}

/// Reference population mean and standard deviation for one input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub mean: f64,
    pub std: f64,
}

impl Scaling {
    const fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    pub fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }
}

pub type NormalizationStats = FeatureTable<Scaling>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub weights: FeatureTable<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    pub scaling: NormalizationStats,
    pub coefficients: ModelCoefficients,
}

pub const PIMA_SCALING: NormalizationStats = FeatureTable {
    pregnancies: Scaling::new(3.8, 3.4),
    glucose: Scaling::new(120.9, 32.0),
    blood_pressure: Scaling::new(69.1, 19.4),
    skin_thickness: Scaling::new(20.5, 16.0),
    insulin: Scaling::new(79.8, 115.2),
    bmi: Scaling::new(32.0, 7.9),
    diabetes_pedigree: Scaling::new(0.47, 0.3),
    age: Scaling::new(33.2, 11.8),
};

pub const RISK_COEFFICIENTS: ModelCoefficients = ModelCoefficients {
    intercept: -5.5,
    weights: FeatureTable {
        pregnancies: 0.1,
        glucose: 0.02,
        blood_pressure: 0.005,
        skin_thickness: 0.003,
        insulin: -0.001,
        bmi: 0.09,
        diabetes_pedigree: 0.8,
        age: 0.03,
    },
};

pub const STANDARD_MODEL: ModelParameters = ModelParameters {
    scaling: PIMA_SCALING,
    coefficients: RISK_COEFFICIENTS,
};

impl ModelParameters {
    /// Rejects tables that would make normalization or scoring meaningless:
    /// a non-positive or non-finite standard deviation, or any non-finite
    /// mean, weight or intercept.
    pub fn validate(&self) -> Result<()> {
        if !self.coefficients.intercept.is_finite() {
            return Err(invalid("intercept", "value is not finite"));
        }

        for (feature, scaling) in self.scaling.iter() {
            if !scaling.mean.is_finite() {
                return Err(invalid(feature.key(), "mean is not finite"));
            }
            if !scaling.std.is_finite() || scaling.std <= 0.0 {
                return Err(invalid(
                    feature.key(),
                    &format!("standard deviation must be positive, got {}", scaling.std),
                ));
            }
        }

        for (feature, weight) in self.coefficients.weights.iter() {
            if !weight.is_finite() {
                return Err(invalid(feature.key(), "coefficient is not finite"));
            }
        }

        Ok(())
    }
}

fn invalid(feature: &str, reason: &str) -> RiskError {
    RiskError::InvalidModel {
        feature: feature.to_string(),
        reason: reason.to_string(),
    }
}
