//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - loads the model artifact (once, before any prediction)
//! - runs the prediction pipeline
//! - prints reports/charts
//! - writes optional exports (text, JSON, PDF)

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchArgs, Command, ModelArgs, PredictArgs};
use crate::domain::PredictConfig;
use crate::error::AppError;
use crate::estimator::SalaryEstimator;
use crate::io::LoadedArtifact;

pub mod pipeline;

/// Environment variable consulted when `--model` is not given.
pub const MODEL_PATH_ENV: &str = "SALARY_MODEL_PATH";

/// Model path used when neither the flag nor the environment sets one.
pub const DEFAULT_MODEL_PATH: &str = "salary_model.json";

/// Entry point for the `salary` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Predict(args) => handle_predict(args),
        Command::Batch(args) => handle_batch(args),
        Command::Samples(args) => handle_samples(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

/// Log to stderr so stdout stays clean for reports and CSV output.
///
/// Defaults to `warn`; override with `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve the model path: explicit flag, then environment (`.env` honoured), then default.
pub fn resolve_model_path(args: &ModelArgs) -> PathBuf {
    if let Some(path) = &args.model {
        return path.clone();
    }
    dotenvy::dotenv().ok();
    match std::env::var(MODEL_PATH_ENV) {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
        _ => PathBuf::from(DEFAULT_MODEL_PATH),
    }
}

pub fn predict_config_from_args(args: &PredictArgs) -> PredictConfig {
    PredictConfig {
        model_path: resolve_model_path(&args.model),
        chart: !args.no_chart,
        chart_width: args.width,
        show_samples: !args.no_samples,
        export_report: args.report.clone(),
        export_report_json: args.report_json.clone(),
        export_report_pdf: args.report_pdf.clone(),
    }
}

fn load_estimator(path: &std::path::Path) -> Result<(SalaryEstimator<crate::models::LoadedModel>, f64), AppError> {
    let LoadedArtifact { model, r2_score } = crate::io::load_model(path)?;
    Ok((SalaryEstimator::new(model), r2_score))
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = predict_config_from_args(&args);
    let (estimator, accuracy) = load_estimator(&config.model_path)?;

    let profile = args.profile.to_profile()?;
    profile.validate()?;
    debug!(?profile, "predict request");

    let run = pipeline::run_prediction(&estimator, &profile, accuracy, config.show_samples)?;
    let report = &run.report;

    println!("{}", crate::report::format_prediction(&report.result, report.accuracy_r2));
    if config.chart {
        println!("{}", crate::plot::render_band_chart(&report.result, config.chart_width));
        println!("{}", crate::plot::render_band_shares(&report.result));
    }
    println!("{}", crate::report::format_input_summary(&report.profile));
    println!(
        "{}",
        crate::report::format_importances(report.importances.as_deref(), config.chart_width, config.chart)
    );

    if let Some(samples) = &run.samples {
        println!("{}", crate::report::format_samples(samples));
        println!("{}", crate::report::format_insights(&samples.insights));
    }

    if let Some(path) = &config.export_report {
        crate::io::write_report_text(path, report)?;
    }
    if let Some(path) = &config.export_report_json {
        crate::io::write_report_json(path, report)?;
    }
    if let Some(path) = &config.export_report_pdf {
        crate::io::write_report_pdf(path, report)?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let (estimator, _) = load_estimator(&resolve_model_path(&args.model))?;
    let ingested = crate::io::load_profiles(&args.input)?;
    if !ingested.row_errors.is_empty() {
        warn!(
            skipped = ingested.row_errors.len(),
            read = ingested.rows_read,
            "some rows were skipped"
        );
    }

    let rows = pipeline::run_batch(&estimator, &ingested)?;

    match &args.export {
        Some(path) => crate::io::write_batch_csv_file(path, &rows)?,
        None => crate::io::write_batch_csv(std::io::stdout().lock(), &rows)?,
    }

    for err in &ingested.row_errors {
        eprintln!("line {}: {}", err.line, err.message);
    }
    Ok(())
}

fn handle_samples(args: ModelArgs) -> Result<(), AppError> {
    let (estimator, _) = load_estimator(&resolve_model_path(&args))?;
    let samples = crate::data::score_samples(&estimator, &crate::data::reference_profiles())?;
    println!("{}", crate::report::format_samples(&samples));
    println!("{}", crate::report::format_insights(&samples.insights));
    Ok(())
}

fn handle_inspect(args: ModelArgs) -> Result<(), AppError> {
    let path = resolve_model_path(&args);
    let (estimator, accuracy) = load_estimator(&path)?;
    let model = estimator.predictor();

    println!("Model: {} ({})", path.display(), crate::models::Predictor::kind_name(model));
    println!("Features: {}", crate::encode::FEATURE_NAMES.join(", "));
    println!("Accuracy (R²): {:.2}%", accuracy * 100.0);
    if let crate::models::LoadedModel::Linear(linear) = model {
        println!("Intercept: {:.4}", linear.intercept());
    }
    if let crate::models::LoadedModel::Forest(forest) = model {
        println!("Trees: {}", forest.n_trees());
    }
    println!();
    let importances = estimator.importances();
    println!("{}", crate::report::format_importances(importances.as_deref(), 40, true));
    Ok(())
}
