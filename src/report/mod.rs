//! Reporting: the exportable prediction summary and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the encoder/estimator code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{EmployeeProfile, FeatureImportance, PredictionResult};
use crate::encode::FeatureRecord;

pub mod format;

pub use format::*;

/// Everything a downstream report needs about one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryReport {
    pub generated_at: DateTime<Local>,
    pub model_kind: String,
    pub accuracy_r2: f64,
    pub profile: EmployeeProfile,
    pub features: FeatureRecord,
    pub result: PredictionResult,
    pub importances: Option<Vec<FeatureImportance>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::domain::{EducationLevel, JobTitle, Location};
    use crate::encode::encode;

    fn report() -> SalaryReport {
        let profile = EmployeeProfile {
            education_level: EducationLevel::PhD,
            experience_years: 20,
            age: 45,
            job_title: JobTitle::Director,
            location: Location::Rural,
        };
        SalaryReport {
            generated_at: Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            model_kind: "linear".to_string(),
            accuracy_r2: 0.83,
            features: encode(&profile).to_record(),
            profile,
            result: PredictionResult {
                point_estimate: 150000.0,
                lower_bound: 135000.0,
                upper_bound: 165000.0,
            },
            importances: None,
        }
    }

    #[test]
    fn text_report_has_labeled_fields() {
        let txt = format_report_text(&report());
        for needle in [
            "Predicted Salary: Rs. 150,000.00",
            "Lower Bound: Rs. 135,000",
            "Upper Bound: Rs. 165,000",
            "Model Accuracy (R2): 83.00%",
            "Education Level: PhD",
            "Experience: 20 years",
            "Age: 45",
            "Job Title: Director",
            "Location: Rural",
        ] {
            assert!(txt.contains(needle), "missing '{needle}' in:\n{txt}");
        }
        assert!(txt.starts_with("Employee Salary Prediction Report\nGenerated: 2025-01-02 03:04:05"));
    }

    #[test]
    fn json_report_uses_training_column_names() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["features"]["Education"], 3.0);
        assert_eq!(json["profile"]["education_level"], "PhD");
        assert_eq!(json["result"]["lower_bound"], 135000.0);
        assert!(json["importances"].is_null());
    }
}
