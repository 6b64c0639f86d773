use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::OutputFormat;
use crate::core::submission::FAILURE_NOTICE;
use crate::core::Assessment;
use crate::models::prediction::as_percent;
use crate::models::{Feature, RiskBand};

const BAR_WIDTH: usize = 20;

pub const DISCLAIMER: &str = "Note: This prediction is based on statistical analysis and \
should not replace professional medical advice. Please consult with your healthcare provider \
about your results.";

pub fn render(assessment: &Assessment, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(assessment)),
        OutputFormat::Json => serde_json::to_string_pretty(assessment),
    }
}

pub fn render_text(assessment: &Assessment) -> String {
    let band = match (assessment.degraded, assessment.band) {
        (false, Some(band)) => band,
        _ => return format!("{}\n", assessment.notice.unwrap_or(FAILURE_NOTICE)),
    };

    let result = &assessment.result;
    let mut out = String::new();
    let _ = writeln!(out, "Diabetes Risk Prediction");
    let _ = writeln!(out, "  Risk level:  {} ({}%)", band, result.risk_percent());
    let _ = writeln!(out, "  {}", progress_bar(result.risk));
    let _ = writeln!(out, "  Prediction confidence: {}%", result.confidence_percent());

    if let Some(factors) = &assessment.factors {
        let _ = writeln!(out);
        let _ = writeln!(out, "Contributing factors:");
        out.push_str(&render_factors(factors));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", DISCLAIMER);
    out
}

/// One line per factor, largest share first, as whole percentages.
pub fn render_factors(factors: &BTreeMap<Feature, f64>) -> String {
    let mut ranked: Vec<_> = factors.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(a.1));

    let mut out = String::new();
    for (feature, weight) in ranked {
        let _ = writeln!(out, "  {:<28} {:>3}%", feature.label(), as_percent(*weight));
    }
    out
}

/// Horizontal gauge with the Low / Moderate / High scale underneath.
fn progress_bar(risk: f64) -> String {
    let filled = ((risk.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let scale = format!(
        "{:<w$}{:^w$}{:>w$}",
        RiskBand::Low.label(),
        RiskBand::Moderate.label(),
        RiskBand::High.label(),
        w = BAR_WIDTH / 3 + 1
    );
    format!(
        "[{}{}]\n  {}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        scale.trim_end()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{assess, RiskEstimator};
    use crate::models::{HealthMetrics, PredictionResult};

    fn assessment(with_factors: bool) -> Assessment {
        let metrics = HealthMetrics {
            pregnancies: 6.0,
            glucose: 200.0,
            blood_pressure: 90.0,
            bmi: 45.0,
            diabetes_pedigree: 2.2,
            age: 60.0,
            ..HealthMetrics::default()
        };
        let estimator = RiskEstimator::standard().unwrap();
        assess(&estimator, &metrics, with_factors).unwrap()
    }

    #[test]
    fn text_report_shows_band_and_percentages() {
        let assessment = assessment(false);
        let text = render_text(&assessment);

        let band = assessment.band.unwrap();
        assert!(text.contains(&format!(
            "Risk level:  {} ({}%)",
            band,
            assessment.result.risk_percent()
        )));
        assert!(text.contains("Prediction confidence:"));
        assert!(text.ends_with(&format!("{}\n", DISCLAIMER)));
        assert!(!text.contains("Contributing factors"));
    }

    #[test]
    fn text_report_ranks_factors() {
        let text = render_text(&assessment(true));
        let pedigree = text.find(Feature::DiabetesPedigree.label()).unwrap();
        let pressure = text.find(Feature::BloodPressure.label()).unwrap();
        assert!(pedigree < pressure);
    }

    #[test]
    fn degraded_assessment_shows_failure_notice() {
        let degraded = Assessment {
            result: PredictionResult::FALLBACK,
            band: None,
            degraded: true,
            notice: Some(FAILURE_NOTICE),
            factors: None,
        };
        let text = render_text(&degraded);
        assert_eq!(text, format!("{}\n", FAILURE_NOTICE));
        assert!(!text.contains(RiskBand::Low.label()));
    }

    #[test]
    fn degraded_json_report_has_no_band() {
        let metrics = HealthMetrics {
            glucose: 150.0,
            blood_pressure: 85.0,
            bmi: 30.0,
            age: 45.0,
            insulin: f64::NAN,
            ..HealthMetrics::default()
        };
        let estimator = RiskEstimator::standard().unwrap();
        let assessment = assess(&estimator, &metrics, false).unwrap();

        let json = render(&assessment, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("band").is_none());
        assert_eq!(value["notice"], FAILURE_NOTICE);
        assert_eq!(value["degraded"], true);
    }

    #[test]
    fn factors_render_as_ranked_percentages() {
        let factors = BTreeMap::from([
            (Feature::Glucose, 0.25),
            (Feature::Age, 0.125),
            (Feature::DiabetesPedigree, 0.625),
        ]);
        let text = render_factors(&factors);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(Feature::DiabetesPedigree.label()));
        assert!(lines[0].ends_with(" 63%"));
        assert!(lines[2].contains(Feature::Age.label()));
        assert!(lines[2].ends_with(" 13%"));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let assessment = assessment(true);
        let json = render(&assessment, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["band"], assessment.band.unwrap().label());
        assert!(value.get("notice").is_none());
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert!(progress_bar(0.0).starts_with("[...................."));
        assert!(progress_bar(0.5).starts_with("[##########.........."));
        assert!(progress_bar(1.0).starts_with("[####################]"));
    }
}
