//! CSV ingest of employee profiles for batch scoring.
//!
//! Expected headers (case/whitespace-insensitive, any order):
//! `education, experience, age, job_title, location`.
//!
//! Design goals:
//! - **Strict schema** for the five columns (clear errors, exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Same label rules** as the CLI: unknown categories never default

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::EmployeeProfile;
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 5] = ["education", "experience", "age", "job_title", "location"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: valid profiles (with their source line) + row errors.
#[derive(Debug, Clone)]
pub struct IngestedProfiles {
    pub profiles: Vec<(usize, EmployeeProfile)>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load profiles from a CSV file.
pub fn load_profiles(path: &Path) -> Result<IngestedProfiles, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::usage(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_profiles(file)
}

/// Load profiles from any CSV reader.
pub fn read_profiles<R: std::io::Read>(input: R) -> Result<IngestedProfiles, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::usage(format!(
            "CSV is missing required column(s): {}.",
            missing.join(", ")
        )));
    }

    let mut profiles = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(profile) => profiles.push((line, profile)),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for err in &row_errors {
        warn!(line = err.line, "{}", err.message);
    }

    if profiles.is_empty() {
        return Err(AppError::invalid_input("No valid profile rows in CSV."));
    }

    Ok(IngestedProfiles {
        profiles,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase().replace([' ', '-'], "_")
}

fn field<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> &'a str {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

fn parse_int(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<u32, String> {
    let raw = field(record, header_map, name);
    raw.parse::<u32>()
        .map_err(|_| format!("Invalid {name} '{raw}': expected a non-negative integer."))
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<EmployeeProfile, String> {
    let profile = EmployeeProfile {
        education_level: field(record, header_map, "education")
            .parse()
            .map_err(|e: AppError| e.to_string())?,
        experience_years: parse_int(record, header_map, "experience")?,
        age: parse_int(record, header_map, "age")?,
        job_title: field(record, header_map, "job_title")
            .parse()
            .map_err(|e: AppError| e.to_string())?,
        location: field(record, header_map, "location")
            .parse()
            .map_err(|e: AppError| e.to_string())?,
    };
    profile.validate().map_err(|e| e.to_string())?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EducationLevel, JobTitle, Location};
    use crate::error::ErrorKind;

    #[test]
    fn reads_valid_rows_and_reports_bad_ones() {
        let csv = "\u{feff}Education,Experience,Age,Job Title,Location\n\
                   Bachelor's,10,35,Manager,Suburban\n\
                   Diploma,5,30,Engineer,Urban\n\
                   phd,20,45,director,rural\n\
                   Master's,3,90,Engineer,Urban\n";
        let ingested = read_profiles(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 4);
        assert_eq!(ingested.profiles.len(), 2);

        let (line, first) = &ingested.profiles[0];
        assert_eq!(*line, 2);
        assert_eq!(first.education_level, EducationLevel::Bachelors);
        assert_eq!(first.location, Location::Suburban);

        let (line, second) = &ingested.profiles[1];
        assert_eq!(*line, 4);
        assert_eq!(second.job_title, JobTitle::Director);

        let bad_lines: Vec<usize> = ingested.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(bad_lines, vec![3, 5]);
        assert!(ingested.row_errors[0].message.contains("Diploma"));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let csv = "education,experience,age,location\nPhD,1,30,Urban\n";
        let err = read_profiles(csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.message().contains("job_title"));
    }

    #[test]
    fn all_rows_invalid_is_an_error() {
        let csv = "education,experience,age,job_title,location\n,1,30,Engineer,Urban\n";
        let err = read_profiles(csv.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
