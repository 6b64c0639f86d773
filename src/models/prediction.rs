use std::fmt;

use serde::Serialize;

/// Output of a single estimator call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Probability of diabetes, in (0, 1) for finite input.
    pub risk: f64,
    /// Heuristic certainty, in [0.75, 0.99] for finite input.
    pub confidence: f64,
}

impl PredictionResult {
    /// Returned in place of a result that could not be computed.
    pub const FALLBACK: PredictionResult = PredictionResult {
        risk: 0.0,
        confidence: 0.0,
    };

    pub fn is_finite(&self) -> bool {
        self.risk.is_finite() && self.confidence.is_finite()
    }

    pub fn risk_percent(&self) -> u8 {
        as_percent(self.risk)
    }

    pub fn confidence_percent(&self) -> u8 {
        as_percent(self.confidence)
    }

    pub fn band(&self) -> RiskBand {
        RiskBand::from_risk(self.risk)
    }
}

/// Rounds a fraction in [0, 1] to a whole percentage.
pub fn as_percent(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Qualitative label for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub const HIGH_THRESHOLD: f64 = 0.7;
    pub const MODERATE_THRESHOLD: f64 = 0.3;

    pub fn from_risk(risk: f64) -> Self {
        if risk >= Self::HIGH_THRESHOLD {
            RiskBand::High
        } else if risk >= Self::MODERATE_THRESHOLD {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
