use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight inputs of the risk model, in the order the form collects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigree,
    Age,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Pregnancies,
        Feature::Glucose,
        Feature::BloodPressure,
        Feature::SkinThickness,
        Feature::Insulin,
        Feature::Bmi,
        Feature::DiabetesPedigree,
        Feature::Age,
    ];

    /// Fields that must be positive before a submission is scored.
    pub const REQUIRED: [Feature; 4] = [
        Feature::Glucose,
        Feature::BloodPressure,
        Feature::Bmi,
        Feature::Age,
    ];

    /// Fields reported by the contribution breakdown.
    pub const EXPLAINED: [Feature; 5] = [
        Feature::Glucose,
        Feature::Bmi,
        Feature::Age,
        Feature::DiabetesPedigree,
        Feature::BloodPressure,
    ];

    /// Key used in JSON documents and error messages.
    pub fn key(self) -> &'static str {
        match self {
            Feature::Pregnancies => "pregnancies",
            Feature::Glucose => "glucose",
            Feature::BloodPressure => "bloodPressure",
            Feature::SkinThickness => "skinThickness",
            Feature::Insulin => "insulin",
            Feature::Bmi => "bmi",
            Feature::DiabetesPedigree => "diabetesPedigree",
            Feature::Age => "age",
        }
    }

    /// Human-readable label, with units.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Pregnancies => "Number of Pregnancies",
            Feature::Glucose => "Glucose Level (mg/dL)",
            Feature::BloodPressure => "Blood Pressure (mm Hg)",
            Feature::SkinThickness => "Skin Thickness (mm)",
            Feature::Insulin => "Insulin (mu U/ml)",
            Feature::Bmi => "BMI (kg/m²)",
            Feature::DiabetesPedigree => "Diabetes Pedigree Function",
            Feature::Age => "Age (years)",
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl fmt::Display for UnknownFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown health metric: {}", self.0)
    }
}

impl std::error::Error for UnknownFeature {}

impl FromStr for Feature {
    type Err = UnknownFeature;

    /// Accepts the camelCase key as well as its snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.replace('_', "").to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Health metrics entered by the user. Constructed per evaluation.
///
/// Values are non-negative in practice, but nothing here enforces bounds or
/// biological plausibility; see [`crate::core::submission`] for the checks
/// applied before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthMetrics {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree: f64,
    pub age: f64,
}

impl HealthMetrics {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Pregnancies => self.pregnancies,
            Feature::Glucose => self.glucose,
            Feature::BloodPressure => self.blood_pressure,
            Feature::SkinThickness => self.skin_thickness,
            Feature::Insulin => self.insulin,
            Feature::Bmi => self.bmi,
            Feature::DiabetesPedigree => self.diabetes_pedigree,
            Feature::Age => self.age,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Pregnancies => &mut self.pregnancies,
            Feature::Glucose => &mut self.glucose,
            Feature::BloodPressure => &mut self.blood_pressure,
            Feature::SkinThickness => &mut self.skin_thickness,
            Feature::Insulin => &mut self.insulin,
            Feature::Bmi => &mut self.bmi,
            Feature::DiabetesPedigree => &mut self.diabetes_pedigree,
            Feature::Age => &mut self.age,
        };
        *slot = value;
    }

    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, value);
        self
    }
}
