//! Shared prediction workflow used by every CLI subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! profile -> encode -> predict -> band -> importances -> reference samples
//!
//! The CLI can then focus on presentation (printing vs exporting).

use chrono::Local;
use tracing::info_span;

use crate::data::{SampleData, reference_profiles, score_samples};
use crate::domain::EmployeeProfile;
use crate::encode::encode;
use crate::error::AppError;
use crate::estimator::SalaryEstimator;
use crate::io::{BatchRow, IngestedProfiles};
use crate::models::Predictor;
use crate::report::SalaryReport;

/// All computed outputs of a single `salary predict` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: SalaryReport,
    pub samples: Option<SampleData>,
}

/// Execute the prediction pipeline for one profile.
///
/// Any encoder or predictor failure aborts the run; nothing partial is returned.
pub fn run_prediction<P: Predictor>(
    estimator: &SalaryEstimator<P>,
    profile: &EmployeeProfile,
    accuracy_r2: f64,
    with_samples: bool,
) -> Result<RunOutput, AppError> {
    let _span = info_span!("predict", job_title = profile.job_title.display_name()).entered();

    let result = estimator.estimate(profile)?;
    let importances = estimator.importances();

    let samples = if with_samples {
        Some(score_samples(estimator, &reference_profiles())?)
    } else {
        None
    };

    let report = SalaryReport {
        generated_at: Local::now(),
        model_kind: estimator.predictor().kind_name().to_string(),
        accuracy_r2,
        profile: profile.clone(),
        features: encode(profile).to_record(),
        result,
        importances,
    };

    Ok(RunOutput { report, samples })
}

/// Score every valid row of an ingested CSV with a single predictor call.
pub fn run_batch<P: Predictor>(
    estimator: &SalaryEstimator<P>,
    ingested: &IngestedProfiles,
) -> Result<Vec<BatchRow>, AppError> {
    let _span = info_span!("batch", rows = ingested.profiles.len()).entered();

    let profiles: Vec<EmployeeProfile> = ingested.profiles.iter().map(|(_, p)| p.clone()).collect();
    let predicted = estimator.predict_batch(&profiles)?;

    Ok(ingested
        .profiles
        .iter()
        .zip(predicted)
        .map(|((line, profile), point_estimate)| {
            let (lower_bound, upper_bound) = crate::estimator::derive_bounds(point_estimate);
            BatchRow {
                line: *line,
                profile: profile.clone(),
                result: crate::domain::PredictionResult {
                    point_estimate,
                    lower_bound,
                    upper_bound,
                },
            }
        })
        .collect())
}
