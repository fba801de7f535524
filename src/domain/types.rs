//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags or CSV rows
//! - fed through the encoder and predictor
//! - exported to JSON/CSV reports

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Allowed range for years of experience (inclusive).
pub const EXPERIENCE_RANGE: (u32, u32) = (0, 40);

/// Allowed range for age in years (inclusive).
pub const AGE_RANGE: (u32, u32) = (18, 70);

/// Highest level of education completed.
///
/// Variant order is the ordinal order used by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    PhD,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::HighSchool,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::PhD,
    ];

    /// Human-readable label for terminal output and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelors => "Bachelor's",
            EducationLevel::Masters => "Master's",
            EducationLevel::PhD => "PhD",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high-school",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::PhD => "phd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobTitle {
    Director,
    Engineer,
    Manager,
}

impl JobTitle {
    pub const ALL: [JobTitle; 3] = [JobTitle::Director, JobTitle::Engineer, JobTitle::Manager];

    pub fn display_name(self) -> &'static str {
        match self {
            JobTitle::Director => "Director",
            JobTitle::Engineer => "Engineer",
            JobTitle::Manager => "Manager",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            JobTitle::Director => "director",
            JobTitle::Engineer => "engineer",
            JobTitle::Manager => "manager",
        }
    }
}

/// Work location. `Rural` is the reference category and has no feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Rural,
    Suburban,
    Urban,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Rural, Location::Suburban, Location::Urban];

    pub fn display_name(self) -> &'static str {
        match self {
            Location::Rural => "Rural",
            Location::Suburban => "Suburban",
            Location::Urban => "Urban",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Location::Rural => "rural",
            Location::Suburban => "suburban",
            Location::Urban => "urban",
        }
    }
}

/// Accepts either the display label (`Bachelor's`) or the CLI slug (`bachelors`).
/// Anything else, including the empty string, is an unrecognized category.
fn parse_label<T: Copy>(
    field: &str,
    label: &str,
    all: &[T],
    display: fn(T) -> &'static str,
    slug: fn(T) -> &'static str,
) -> Result<T, AppError> {
    let trimmed = label.trim();
    all.iter()
        .copied()
        .find(|&v| display(v) == trimmed || slug(v).eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| AppError::unrecognized_category(field, label))
}

impl FromStr for EducationLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("education", s, &Self::ALL, Self::display_name, Self::slug)
    }
}

impl FromStr for JobTitle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("job title", s, &Self::ALL, Self::display_name, Self::slug)
    }
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("location", s, &Self::ALL, Self::display_name, Self::slug)
    }
}

/// The attributes collected for a single prediction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub education_level: EducationLevel,
    pub experience_years: u32,
    pub age: u32,
    pub job_title: JobTitle,
    pub location: Location,
}

impl EmployeeProfile {
    /// Check the numeric fields against the ranges the input controls allow.
    pub fn validate(&self) -> Result<(), AppError> {
        check_range("experience", self.experience_years, EXPERIENCE_RANGE)?;
        check_range("age", self.age, AGE_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &str, value: u32, (lo, hi): (u32, u32)) -> Result<(), AppError> {
    if value < lo || value > hi {
        return Err(AppError::invalid_input(format!(
            "{field} must be within [{lo}, {hi}], got {value}."
        )));
    }
    Ok(())
}

/// Point estimate plus the ±10% band around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Absolute coefficient magnitude for one feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags plus the environment.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub model_path: PathBuf,
    pub chart: bool,
    pub chart_width: usize,
    pub show_samples: bool,
    pub export_report: Option<PathBuf>,
    pub export_report_json: Option<PathBuf>,
    pub export_report_pdf: Option<PathBuf>,
}
