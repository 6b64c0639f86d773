//! Diabetes risk estimator
//!
//! Command line entry point: collects health metrics from flags or a JSON
//! document, scores them and prints a report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use diabetes_risk::config::{self, LoggingConfig, OutputFormat};
use diabetes_risk::core::data::{apply_entries, read_metrics_document};
use diabetes_risk::{assess, ui, Feature, HealthMetrics, RiskEstimator};

#[derive(Parser)]
#[command(
    name = "diabetes-risk",
    version,
    about = "Estimate diabetes risk from basic health metrics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Output format; overrides the configured one
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a submission and print the risk band
    Predict {
        #[command(flatten)]
        metrics: MetricsArgs,
        /// Include the contributing-factor breakdown
        #[arg(long)]
        explain: bool,
    },
    /// Print only the contributing-factor breakdown
    Explain {
        #[command(flatten)]
        metrics: MetricsArgs,
    },
}

/// Form entries. Absent or unparsable values count as 0.
#[derive(Args)]
struct MetricsArgs {
    /// JSON document with metric entries; `-` reads stdin
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    #[arg(long)]
    pregnancies: Option<String>,
    /// Glucose level (mg/dL), required
    #[arg(long)]
    glucose: Option<String>,
    /// Blood pressure (mm Hg), required
    #[arg(long)]
    blood_pressure: Option<String>,
    /// Skin thickness (mm)
    #[arg(long)]
    skin_thickness: Option<String>,
    /// Insulin (mu U/ml)
    #[arg(long)]
    insulin: Option<String>,
    /// BMI (kg/m²), required
    #[arg(long)]
    bmi: Option<String>,
    /// Diabetes pedigree function (family history score)
    #[arg(long)]
    diabetes_pedigree: Option<String>,
    /// Age (years), required
    #[arg(long)]
    age: Option<String>,
}

impl MetricsArgs {
    fn collect(&self) -> Result<HealthMetrics> {
        let base = match &self.input {
            Some(path) => read_metrics_document(path)
                .with_context(|| format!("failed to load metrics from {}", path.display()))?,
            None => HealthMetrics::default(),
        };

        Ok(apply_entries(
            base,
            [
                (Feature::Pregnancies, self.pregnancies.as_deref()),
                (Feature::Glucose, self.glucose.as_deref()),
                (Feature::BloodPressure, self.blood_pressure.as_deref()),
                (Feature::SkinThickness, self.skin_thickness.as_deref()),
                (Feature::Insulin, self.insulin.as_deref()),
                (Feature::Bmi, self.bmi.as_deref()),
                (Feature::DiabetesPedigree, self.diabetes_pedigree.as_deref()),
                (Feature::Age, self.age.as_deref()),
            ],
        ))
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = config::load_config().context("Failed to load configuration")?;
    init_tracing(&settings.logging);
    debug!(?settings, "configuration loaded");

    let format = cli.format.unwrap_or(settings.output.format);
    let estimator = RiskEstimator::standard()?;

    match cli.command {
        Commands::Predict { metrics, explain } => {
            let metrics = metrics.collect()?;
            let assessment = assess(&estimator, &metrics, explain || settings.output.explain)?;
            print!("{}", ui::render(&assessment, format)?);
            if format == OutputFormat::Json {
                println!();
            }
        }
        Commands::Explain { metrics } => {
            let metrics = metrics.collect()?;
            let factors = estimator.explain(&metrics);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&factors)?),
                OutputFormat::Text => print!("{}", ui::report::render_factors(&factors)),
            }
        }
    }

    Ok(())
}
