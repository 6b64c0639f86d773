use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::{Feature, HealthMetrics};

/// Reads a form entry the way the input widgets do: anything that is not a
/// finite number counts as 0.
pub fn parse_entry(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn entry_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(raw) => parse_entry(raw),
        _ => 0.0,
    }
}

/// Builds metrics from a JSON object of form entries.
///
/// Keys may be camelCase or snake_case. Unknown keys are ignored, and values
/// that are not numbers or numeric strings count as 0.
pub fn process_metrics_json(raw_data: &str) -> Result<HealthMetrics> {
    let data: Value = serde_json::from_str(raw_data)?;
    let mut metrics = HealthMetrics::default();

    if let Some(obj) = data.as_object() {
        for (key, value) in obj {
            match key.parse::<Feature>() {
                Ok(feature) => metrics.set(feature, entry_from_value(value)),
                Err(err) => debug!("ignoring entry: {}", err),
            }
        }
    } else {
        warn!("metrics document is not a JSON object; using defaults");
    }

    Ok(metrics)
}

/// Loads a metrics document from a file, or from stdin when `path` is `-`.
pub fn read_metrics_document(path: &Path) -> Result<HealthMetrics> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    process_metrics_json(&raw)
}

/// Applies raw entries over `base`. Entries that are `None` leave the base
/// value untouched.
pub fn apply_entries<'a, I>(base: HealthMetrics, entries: I) -> HealthMetrics
where
    I: IntoIterator<Item = (Feature, Option<&'a str>)>,
{
    entries
        .into_iter()
        .fold(base, |metrics, (feature, entry)| match entry {
            Some(raw) => metrics.with(feature, parse_entry(raw)),
            None => metrics,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("150", 150.0)]
    #[test_case(" 30.5 ", 30.5)]
    #[test_case("", 0.0 ; "empty")]
    #[test_case("abc", 0.0 ; "garbage")]
    #[test_case("NaN", 0.0 ; "nan")]
    #[test_case("inf", 0.0 ; "infinity")]
    #[test_case("-4", -4.0 ; "negative kept")]
    fn parses_form_entries(raw: &str, expected: f64) {
        assert_eq!(parse_entry(raw), expected);
    }

    #[test]
    fn processes_json_document() {
        let metrics = process_metrics_json(
            r#"{
                "glucose": 150,
                "bloodPressure": "85",
                "body_mass": 12,
                "bmi": 30.0,
                "diabetes_pedigree": 0.5,
                "age": null,
                "insulin": "n/a"
            }"#,
        )
        .unwrap();

        assert_eq!(metrics.glucose, 150.0);
        assert_eq!(metrics.blood_pressure, 85.0);
        assert_eq!(metrics.bmi, 30.0);
        assert_eq!(metrics.diabetes_pedigree, 0.5);
        assert_eq!(metrics.age, 0.0);
        assert_eq!(metrics.insulin, 0.0);
    }

    #[test]
    fn non_object_document_yields_defaults() {
        let metrics = process_metrics_json("[1, 2, 3]").unwrap();
        assert_eq!(metrics, HealthMetrics::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(process_metrics_json("{glucose:").is_err());
    }

    #[test]
    fn entries_override_base_values() {
        let base = HealthMetrics::default().with(Feature::Age, 50.0).with(Feature::Bmi, 22.0);
        let metrics = apply_entries(
            base,
            [
                (Feature::Age, Some("45")),
                (Feature::Bmi, None),
                (Feature::Glucose, Some("oops")),
            ],
        );
        assert_eq!(metrics.age, 45.0);
        assert_eq!(metrics.bmi, 22.0);
        assert_eq!(metrics.glucose, 0.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_metrics_document(Path::new("/nonexistent/metrics.json")).unwrap_err();
        assert!(matches!(err, crate::errors::RiskError::Io(_)));
    }
}
