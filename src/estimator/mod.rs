//! Predictor adapter: encoded rows in, salary band out.
//!
//! `SalaryEstimator` owns the loaded predictor and is built once per process.
//! Every call is a pure function of its input and the (immutable) predictor.

use nalgebra::DMatrix;
use tracing::{debug, info};

use crate::domain::{EmployeeProfile, FeatureImportance, PredictionResult};
use crate::encode::{FEATURE_NAMES, FeatureVector, N_FEATURES, encode};
use crate::error::AppError;
use crate::models::Predictor;

/// Relative width of the band on each side of the point estimate.
pub const BAND_FRACTION: f64 = 0.10;

/// Multiplier for the lower bound.
pub const LOWER_FACTOR: f64 = 0.90;

/// `(point × 0.90, point × 1.10)`.
///
/// The upper bound is computed as `point + point × 0.10`; `100.0 * 1.1` is not
/// exactly `110.0` in binary floating point. The lower bound is the literal
/// product. No floor is applied: a negative estimate yields a negative band.
pub fn derive_bounds(point_estimate: f64) -> (f64, f64) {
    let lower = point_estimate * LOWER_FACTOR;
    let upper = point_estimate + point_estimate * BAND_FRACTION;
    (lower, upper)
}

pub struct SalaryEstimator<P> {
    predictor: P,
}

impl<P: Predictor> SalaryEstimator<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Single-row prediction.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, AppError> {
        let x = DMatrix::from_row_slice(1, N_FEATURES, features.as_slice());
        let out = self.predictor.predict(&x)?;
        let value = out
            .first()
            .copied()
            .ok_or_else(|| AppError::predictor("Predictor returned no value."))?;
        if !value.is_finite() {
            return Err(AppError::predictor("Predictor returned a non-finite value."));
        }
        debug!(value, "point estimate");
        Ok(value)
    }

    /// Encode, predict, and derive the band for one profile.
    pub fn estimate(&self, profile: &EmployeeProfile) -> Result<PredictionResult, AppError> {
        let features = encode(profile);
        debug!(?features, "encoded profile");
        let point_estimate = self.predict(&features)?;
        let (lower_bound, upper_bound) = derive_bounds(point_estimate);
        Ok(PredictionResult {
            point_estimate,
            lower_bound,
            upper_bound,
        })
    }

    /// One predictor call for many profiles, results in input order.
    pub fn predict_batch(&self, profiles: &[EmployeeProfile]) -> Result<Vec<f64>, AppError> {
        if profiles.is_empty() {
            return Ok(Vec::new());
        }
        let mut data = Vec::with_capacity(profiles.len() * N_FEATURES);
        for p in profiles {
            data.extend_from_slice(encode(p).as_slice());
        }
        let x = DMatrix::from_row_slice(profiles.len(), N_FEATURES, &data);
        let out = self.predictor.predict(&x)?;
        if out.len() != profiles.len() {
            return Err(AppError::predictor(format!(
                "Predictor returned {} values for {} rows.",
                out.len(),
                profiles.len()
            )));
        }
        if out.iter().any(|v| !v.is_finite()) {
            return Err(AppError::predictor("Predictor returned a non-finite value."));
        }
        Ok(out)
    }

    /// Absolute coefficients per feature, largest first.
    ///
    /// `None` when the model has no coefficients (tree ensembles) or when the
    /// coefficient count does not line up with the encoder's columns.
    pub fn importances(&self) -> Option<Vec<FeatureImportance>> {
        let Some(coefs) = self.predictor.coefficients() else {
            info!(model = self.predictor.kind_name(), "feature importance not available for this model");
            return None;
        };
        if coefs.len() != N_FEATURES {
            info!(n = coefs.len(), "coefficient count does not match feature columns; skipping importance");
            return None;
        }

        let mut out: Vec<FeatureImportance> = FEATURE_NAMES
            .iter()
            .zip(coefs)
            .map(|(name, c)| FeatureImportance {
                feature: (*name).to_string(),
                importance: c.abs(),
            })
            .collect();
        out.sort_by(|a, b| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Some(out)
    }
}
