//! Feature encoding: `EmployeeProfile` -> fixed-order numeric row.
//!
//! The column layout is the one the predictor was trained against:
//!
//! ```text
//! [Education, Experience, Age,
//!  Job_Title_Director, Job_Title_Engineer, Job_Title_Manager,
//!  Location_Suburban, Location_Urban]
//! ```
//!
//! Education is ordinal (0..=3). Job title is a full one-hot block. Location
//! drops `Rural` as the reference category, so a rural profile has both location
//! flags at zero. Any change to this layout breaks compatibility with existing
//! model artifacts.

use serde::{Deserialize, Serialize};

use crate::domain::{EducationLevel, EmployeeProfile, JobTitle, Location};
use crate::error::AppError;

/// Number of columns in an encoded row.
pub const N_FEATURES: usize = 8;

/// Column names in encoder order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Education",
    "Experience",
    "Age",
    "Job_Title_Director",
    "Job_Title_Engineer",
    "Job_Title_Manager",
    "Location_Suburban",
    "Location_Urban",
];

/// An encoded row in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> [f64; N_FEATURES] {
        self.0
    }

    /// The same values as a labeled record.
    pub fn to_record(&self) -> FeatureRecord {
        let v = self.0;
        FeatureRecord {
            education: v[0],
            experience: v[1],
            age: v[2],
            job_title_director: v[3],
            job_title_engineer: v[4],
            job_title_manager: v[5],
            location_suburban: v[6],
            location_urban: v[7],
        }
    }
}

/// Labeled form of a `FeatureVector`, serialized with the training column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Education")]
    pub education: f64,
    #[serde(rename = "Experience")]
    pub experience: f64,
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Job_Title_Director")]
    pub job_title_director: f64,
    #[serde(rename = "Job_Title_Engineer")]
    pub job_title_engineer: f64,
    #[serde(rename = "Job_Title_Manager")]
    pub job_title_manager: f64,
    #[serde(rename = "Location_Suburban")]
    pub location_suburban: f64,
    #[serde(rename = "Location_Urban")]
    pub location_urban: f64,
}

impl From<FeatureRecord> for FeatureVector {
    fn from(r: FeatureRecord) -> Self {
        FeatureVector([
            r.education,
            r.experience,
            r.age,
            r.job_title_director,
            r.job_title_engineer,
            r.job_title_manager,
            r.location_suburban,
            r.location_urban,
        ])
    }
}

/// Ordinal code for an education level.
pub fn education_code(level: EducationLevel) -> u8 {
    match level {
        EducationLevel::HighSchool => 0,
        EducationLevel::Bachelors => 1,
        EducationLevel::Masters => 2,
        EducationLevel::PhD => 3,
    }
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}

/// Encode a profile into a feature row.
pub fn encode(profile: &EmployeeProfile) -> FeatureVector {
    let job = profile.job_title;
    let loc = profile.location;

    FeatureVector([
        f64::from(education_code(profile.education_level)),
        f64::from(profile.experience_years),
        f64::from(profile.age),
        flag(job == JobTitle::Director),
        flag(job == JobTitle::Engineer),
        flag(job == JobTitle::Manager),
        flag(loc == Location::Suburban),
        flag(loc == Location::Urban),
    ])
}

/// Encode raw labels as they arrive from a form or a CSV row.
///
/// Fails with `ErrorKind::UnrecognizedCategory` for any label outside the
/// fixed tables; there is no fallback value.
pub fn encode_labels(
    education: &str,
    experience_years: u32,
    age: u32,
    job_title: &str,
    location: &str,
) -> Result<FeatureVector, AppError> {
    let profile = EmployeeProfile {
        education_level: education.parse()?,
        experience_years,
        age,
        job_title: job_title.parse()?,
        location: location.parse()?,
    };
    Ok(encode(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn profile(
        education_level: EducationLevel,
        experience_years: u32,
        age: u32,
        job_title: JobTitle,
        location: Location,
    ) -> EmployeeProfile {
        EmployeeProfile {
            education_level,
            experience_years,
            age,
            job_title,
            location,
        }
    }

    #[test]
    fn education_is_ordinal() {
        let codes: Vec<u8> = EducationLevel::ALL.iter().map(|&e| education_code(e)).collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn bachelors_manager_suburban() {
        let p = profile(EducationLevel::Bachelors, 10, 35, JobTitle::Manager, Location::Suburban);
        assert_eq!(encode(&p).values(), [1.0, 10.0, 35.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn phd_director_rural() {
        let p = profile(EducationLevel::PhD, 20, 45, JobTitle::Director, Location::Rural);
        assert_eq!(encode(&p).values(), [3.0, 20.0, 45.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn labels_match_typed_encoding() {
        let v = encode_labels("Bachelor's", 10, 35, "Manager", "Suburban").unwrap();
        assert_eq!(v.values(), [1.0, 10.0, 35.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_education_label_is_an_error() {
        let err = encode_labels("", 10, 35, "Manager", "Suburban").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedCategory);
    }

    #[test]
    fn record_keeps_column_order() {
        let p = profile(EducationLevel::Masters, 3, 29, JobTitle::Engineer, Location::Urban);
        let v = encode(&p);
        assert_eq!(FeatureVector::from(v.to_record()), v);

        let json = serde_json::to_string(&v.to_record()).unwrap();
        let mut last = 0;
        for name in FEATURE_NAMES {
            let pos = json.find(&format!("\"{name}\"")).unwrap();
            assert!(pos >= last, "{name} out of order in {json}");
            last = pos;
        }
    }
}
