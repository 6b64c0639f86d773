//! Diabetes risk estimation core library
//! 
//! This module exports the risk model, the estimator and the presentation
//! helpers used by the command line front end.

pub mod core;
pub mod errors;
pub mod models;
pub mod ui;

pub use crate::core::{assess, Assessment, RiskEstimator};
pub use errors::RiskError;
pub use models::{Feature, HealthMetrics, PredictionResult, RiskBand};

/// Application configuration
pub mod config {
    use std::path::Path;

    use serde::Deserialize;

    const ENV_PREFIX: &str = "DIABETES_RISK";

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct Settings {
        #[serde(default)]
        pub output: OutputConfig,
        #[serde(default)]
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct OutputConfig {
        #[serde(default)]
        pub format: OutputFormat,
        /// Include the contributing-factor breakdown in reports.
        #[serde(default)]
        pub explain: bool,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LoggingConfig {
        pub level: String,
        #[serde(default)]
        pub json: bool,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: "info".into(),
                json: false,
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
    #[serde(rename_all = "lowercase")]
    pub enum OutputFormat {
        #[default]
        Text,
        Json,
    }

    type Builder = ::config::ConfigBuilder<::config::builder::DefaultState>;

    fn base_builder() -> Result<Builder, ::config::ConfigError> {
        ::config::Config::builder()
            .set_default("output.format", "text")?
            .set_default("output.explain", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Settings, ::config::ConfigError> {
        load_config_from(Path::new("config"), std::env::vars().collect())
    }

    /// Layers `<dir>/default`, `<dir>/<env>` and `DIABETES_RISK__*` variables
    /// from `vars` over the built-in defaults.
    pub fn load_config_from(
        dir: &Path,
        vars: ::config::Map<String, String>,
    ) -> Result<Settings, ::config::ConfigError> {
        let env = vars
            .get(&format!("{}_ENV", ENV_PREFIX))
            .cloned()
            .unwrap_or_else(|| "development".into());

        base_builder()?
            // Start with default settings
            .add_source(::config::File::from(dir.join("default")).required(false))
            // Override with environment-specific settings
            .add_source(::config::File::from(dir.join(&env)).required(false))
            // Override with environment variables, e.g. DIABETES_RISK__OUTPUT__FORMAT=json
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse settings from a TOML document layered over the defaults.
    pub fn parse_config(toml: &str) -> Result<Settings, ::config::ConfigError> {
        base_builder()?
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn empty_document_uses_defaults() {
            let settings = parse_config("").unwrap();
            assert_eq!(settings.output.format, OutputFormat::Text);
            assert!(!settings.output.explain);
            assert_eq!(settings.logging.level, "info");
            assert!(!settings.logging.json);
        }

        #[test]
        fn document_overrides_defaults() {
            let settings = parse_config(
                r#"
                [output]
                format = "json"
                explain = true

                [logging]
                level = "debug"
                "#,
            )
            .unwrap();
            assert_eq!(settings.output.format, OutputFormat::Json);
            assert!(settings.output.explain);
            assert_eq!(settings.logging.level, "debug");
        }

        #[test]
        fn files_and_environment_are_layered() {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                dir.path().join("default.toml"),
                "[output]\nformat = \"text\"\nexplain = false\n\n[logging]\nlevel = \"warn\"\n",
            )
            .unwrap();
            std::fs::write(dir.path().join("staging.toml"), "[output]\nexplain = true\n").unwrap();

            let vars = [
                ("DIABETES_RISK_ENV", "staging"),
                ("DIABETES_RISK__OUTPUT__FORMAT", "json"),
                ("DIABETES_RISK__LOGGING__JSON", "true"),
                ("UNRELATED__OUTPUT__FORMAT", "text"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

            let settings = load_config_from(dir.path(), vars).unwrap();
            assert_eq!(settings.output.format, OutputFormat::Json);
            assert!(settings.output.explain);
            assert_eq!(settings.logging.level, "warn");
            assert!(settings.logging.json);
        }

        #[test]
        fn missing_files_fall_back_to_defaults() {
            let dir = tempfile::tempdir().unwrap();
            let settings = load_config_from(dir.path(), Default::default()).unwrap();
            assert_eq!(settings.output.format, OutputFormat::Text);
            assert!(!settings.output.explain);
            assert_eq!(settings.logging.level, "info");
        }

        #[test]
        fn unknown_format_is_rejected() {
            assert!(parse_config("[output]\nformat = \"yaml\"").is_err());
        }
    }
}
