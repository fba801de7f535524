//! Command-line parsing for the salary predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the encoding/prediction code. Numeric flags carry the same
//! ranges the input form enforces.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{EducationLevel, EmployeeProfile, JobTitle, Location};
use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salary", version, about = "Employee salary prediction from a trained regression model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict one employee's salary, print the band and summaries, optionally export a report.
    Predict(PredictArgs),
    /// Score every row of a profiles CSV.
    Batch(BatchArgs),
    /// Print predictions for the built-in reference profiles.
    Samples(ModelArgs),
    /// Describe the loaded model and its feature importance.
    Inspect(ModelArgs),
}

/// Where to load the model from.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Model artifact JSON. Falls back to `SALARY_MODEL_PATH`, then `salary_model.json`.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,
}

/// The five profile inputs.
///
/// Categories are kept as raw text and parsed in [`ProfileArgs::to_profile`], so
/// an unknown label surfaces as an unrecognized-category error rather than a
/// usage error.
#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    /// Highest education level: "High School", "Bachelor's", "Master's", "PhD" (or high-school, bachelors, masters, phd).
    #[arg(long, value_name = "LEVEL")]
    pub education: String,

    /// Years of professional experience (0-40).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=40))]
    pub experience: u32,

    /// Age in years (18-70).
    #[arg(long, value_parser = clap::value_parser!(u32).range(18..=70))]
    pub age: u32,

    /// Current job title: Director, Engineer, Manager.
    #[arg(long, value_name = "TITLE")]
    pub job_title: String,

    /// Work location: Rural, Suburban, Urban.
    #[arg(long, value_name = "LOCATION")]
    pub location: String,
}

impl ProfileArgs {
    pub fn to_profile(&self) -> Result<EmployeeProfile, AppError> {
        Ok(EmployeeProfile {
            education_level: self.education.parse::<EducationLevel>()?,
            experience_years: self.experience,
            age: self.age,
            job_title: self.job_title.parse::<JobTitle>()?,
            location: self.location.parse::<Location>()?,
        })
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Write a plain-text report to this path.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write a JSON report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Write a one-page PDF report to this path.
    #[arg(long = "report-pdf", value_name = "PATH")]
    pub report_pdf: Option<PathBuf>,

    /// Disable the terminal charts (band, shares, importances).
    #[arg(long)]
    pub no_chart: bool,

    /// Skip the reference sample predictions.
    #[arg(long)]
    pub no_samples: bool,

    /// Chart bar width (columns).
    #[arg(long, default_value_t = 40)]
    pub width: usize,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Profiles CSV (education, experience, age, job_title, location).
    #[arg(long, short = 'i', value_name = "CSV")]
    pub input: PathBuf,

    /// Write predictions to this CSV instead of stdout.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn predict_args(education: &str, job_title: &str, location: &str) -> PredictArgs {
        let cli = Cli::try_parse_from([
            "salary",
            "predict",
            "--education",
            education,
            "--experience",
            "10",
            "--age",
            "35",
            "--job-title",
            job_title,
            "--location",
            location,
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        args
    }

    #[test]
    fn parses_predict_flags() {
        let args = predict_args("bachelors", "manager", "suburban");
        let p = args.profile.to_profile().unwrap();
        assert_eq!(p.education_level, EducationLevel::Bachelors);
        assert_eq!(p.job_title, JobTitle::Manager);
        assert_eq!(p.location, Location::Suburban);
        assert_eq!(args.width, 40);
        assert!(args.model.model.is_none());
        assert!(args.report_pdf.is_none());
    }

    #[test]
    fn accepts_display_labels() {
        let p = predict_args("Bachelor's", "Manager", "Suburban").profile.to_profile().unwrap();
        assert_eq!(p.education_level, EducationLevel::Bachelors);
        assert_eq!(p.job_title, JobTitle::Manager);

        let p = predict_args("PhD", "Director", "Rural").profile.to_profile().unwrap();
        assert_eq!(p.education_level, EducationLevel::PhD);
        assert_eq!(p.job_title, JobTitle::Director);
        assert_eq!(p.location, Location::Rural);

        let p = predict_args("High School", "Engineer", "Urban").profile.to_profile().unwrap();
        assert_eq!(p.education_level, EducationLevel::HighSchool);
    }

    #[test]
    fn unknown_category_exits_with_input_code() {
        let err = predict_args("diploma", "manager", "rural").profile.to_profile().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedCategory);
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("'diploma'"));

        let err = predict_args("PhD", "CEO", "rural").profile.to_profile().unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_out_of_range_age() {
        let res = Cli::try_parse_from([
            "salary",
            "predict",
            "--education",
            "phd",
            "--experience",
            "5",
            "--age",
            "17",
            "--job-title",
            "engineer",
            "--location",
            "rural",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_report_pdf_flag() {
        let cli = Cli::try_parse_from([
            "salary",
            "predict",
            "--education",
            "Master's",
            "--experience",
            "5",
            "--age",
            "30",
            "--job-title",
            "Engineer",
            "--location",
            "Urban",
            "--report-pdf",
            "out.pdf",
        ])
        .unwrap();
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.report_pdf, Some(PathBuf::from("out.pdf")));
    }
}
