//! Built-in reference profiles and summary statistics over their predictions.
//!
//! The three profiles span the input space (junior urban engineer, mid-career
//! suburban manager, senior rural director) and give a quick sanity check of a
//! newly loaded model next to the user's own prediction.

use serde::Serialize;

use crate::domain::{EducationLevel, EmployeeProfile, JobTitle, Location};
use crate::encode::{FeatureRecord, encode};
use crate::error::AppError;
use crate::estimator::SalaryEstimator;
use crate::models::Predictor;

/// The fixed reference set.
pub fn reference_profiles() -> Vec<EmployeeProfile> {
    vec![
        EmployeeProfile {
            education_level: EducationLevel::HighSchool,
            experience_years: 2,
            age: 22,
            job_title: JobTitle::Engineer,
            location: Location::Urban,
        },
        EmployeeProfile {
            education_level: EducationLevel::Masters,
            experience_years: 10,
            age: 35,
            job_title: JobTitle::Manager,
            location: Location::Suburban,
        },
        EmployeeProfile {
            education_level: EducationLevel::PhD,
            experience_years: 20,
            age: 45,
            job_title: JobTitle::Director,
            location: Location::Rural,
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct SamplePrediction {
    pub features: FeatureRecord,
    pub predicted: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleInsights {
    pub avg_salary: f64,
    pub most_common_job_title: JobTitle,
    pub avg_experience: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleData {
    pub rows: Vec<SamplePrediction>,
    pub insights: SampleInsights,
}

/// Predict the reference set and summarize it.
pub fn score_samples<P: Predictor>(
    estimator: &SalaryEstimator<P>,
    profiles: &[EmployeeProfile],
) -> Result<SampleData, AppError> {
    let predicted = estimator.predict_batch(profiles)?;
    let rows = profiles
        .iter()
        .zip(&predicted)
        .map(|(p, &y)| SamplePrediction {
            features: encode(p).to_record(),
            predicted: y,
        })
        .collect();
    let insights = summarize(profiles, &predicted)
        .ok_or_else(|| AppError::invalid_input("No sample profiles to summarize."))?;
    Ok(SampleData { rows, insights })
}

/// Averages and the modal job title. Ties go to the title declared first.
pub fn summarize(profiles: &[EmployeeProfile], predicted: &[f64]) -> Option<SampleInsights> {
    if profiles.is_empty() || predicted.len() != profiles.len() {
        return None;
    }
    let n = profiles.len() as f64;
    let avg_salary = predicted.iter().sum::<f64>() / n;
    let avg_experience = profiles.iter().map(|p| f64::from(p.experience_years)).sum::<f64>() / n;

    let mut best = JobTitle::ALL[0];
    let mut best_count = 0usize;
    for title in JobTitle::ALL {
        let count = profiles.iter().filter(|p| p.job_title == title).count();
        if count > best_count {
            best = title;
            best_count = count;
        }
    }

    Some(SampleInsights {
        avg_salary,
        most_common_job_title: best,
        avg_experience,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_set_encodes_as_expected() {
        let rows: Vec<[f64; 8]> = reference_profiles().iter().map(|p| encode(p).values()).collect();
        assert_eq!(rows[0], [0.0, 2.0, 22.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rows[1], [2.0, 10.0, 35.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        assert_eq!(rows[2], [3.0, 20.0, 45.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn ties_pick_first_declared_title() {
        let profiles = reference_profiles();
        let insights = summarize(&profiles, &[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(insights.most_common_job_title, JobTitle::Director);
        assert_eq!(insights.avg_salary, 20.0);
        assert!((insights.avg_experience - 32.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn summarize_rejects_mismatched_lengths() {
        assert!(summarize(&reference_profiles(), &[1.0]).is_none());
        assert!(summarize(&[], &[]).is_none());
    }
}
