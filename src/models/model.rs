//! The predictor seam.
//!
//! The estimator only ever talks to a `Predictor`. Concrete model families
//! live next to this file; `LoadedModel` is whatever the artifact loader
//! produced at startup.

use nalgebra::DMatrix;

use crate::error::AppError;
use crate::models::{ForestModel, LinearModel};

/// A fitted regression model, treated as a black box.
///
/// Implementations must be read-only: `predict` takes `&self` and the same
/// input always yields the same output.
pub trait Predictor {
    /// Short model family name for logs and reports.
    fn kind_name(&self) -> &'static str;

    /// Number of columns the model expects.
    fn n_features(&self) -> usize;

    /// Predict one value per row of `features`.
    fn predict(&self, features: &DMatrix<f64>) -> Result<Vec<f64>, AppError>;

    /// Per-feature coefficients, for models that have them.
    fn coefficients(&self) -> Option<&[f64]> {
        None
    }
}

/// Reject a matrix whose width does not match the model.
pub fn check_shape(features: &DMatrix<f64>, expected: usize) -> Result<(), AppError> {
    if features.ncols() != expected {
        return Err(AppError::predictor(format!(
            "Feature matrix has {} columns; model expects {expected}.",
            features.ncols()
        )));
    }
    Ok(())
}

/// A model deserialized from an artifact file.
#[derive(Debug, Clone)]
pub enum LoadedModel {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl Predictor for LoadedModel {
    fn kind_name(&self) -> &'static str {
        match self {
            LoadedModel::Linear(m) => m.kind_name(),
            LoadedModel::Forest(m) => m.kind_name(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            LoadedModel::Linear(m) => m.n_features(),
            LoadedModel::Forest(m) => m.n_features(),
        }
    }

    fn predict(&self, features: &DMatrix<f64>) -> Result<Vec<f64>, AppError> {
        match self {
            LoadedModel::Linear(m) => m.predict(features),
            LoadedModel::Forest(m) => m.predict(features),
        }
    }

    fn coefficients(&self) -> Option<&[f64]> {
        match self {
            LoadedModel::Linear(m) => m.coefficients(),
            LoadedModel::Forest(m) => m.coefficients(),
        }
    }
}
