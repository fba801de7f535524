//! Linear regression: `y = intercept + x · β`.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::models::model::{Predictor, check_shape};

#[derive(Debug, Clone)]
pub struct LinearModel {
    intercept: f64,
    coefficients: DVector<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self, AppError> {
        if coefficients.is_empty() {
            return Err(AppError::artifact("Linear model has no coefficients."));
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(AppError::artifact("Linear model parameters must be finite."));
        }
        Ok(Self {
            intercept,
            coefficients: DVector::from_vec(coefficients),
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Predictor for LinearModel {
    fn kind_name(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &DMatrix<f64>) -> Result<Vec<f64>, AppError> {
        check_shape(features, self.n_features())?;
        let y = features * &self.coefficients;
        Ok(y.iter().map(|v| v + self.intercept).collect())
    }

    fn coefficients(&self) -> Option<&[f64]> {
        Some(self.coefficients.as_slice())
    }
}
