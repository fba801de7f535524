//! Read model artifact JSON files.
//!
//! An artifact is the portable form of a trained predictor:
//! - the feature column names it was trained on (must equal `FEATURE_NAMES`)
//! - an optional R² score used as the reported accuracy
//! - the model family and its parameters
//!
//! Loading happens once at startup; a missing or mismatched artifact is a
//! startup error, never deferred to the first prediction.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::encode::{FEATURE_NAMES, N_FEATURES};
use crate::error::AppError;
use crate::models::{DecisionTree, ForestModel, LinearModel, LoadedModel, Predictor};

/// Artifact schema version understood by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Accuracy reported when an artifact carries no score.
pub const DEFAULT_MODEL_SCORE: f64 = 0.83;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2_score: Option<f64>,
    pub model: ModelParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelParams {
    Linear { intercept: f64, coefficients: Vec<f64> },
    Forest { trees: Vec<DecisionTree> },
}

/// A validated, ready-to-use model plus its metadata.
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    pub model: LoadedModel,
    pub r2_score: f64,
}

/// Load and validate a model artifact.
pub fn load_model(path: &Path) -> Result<LoadedArtifact, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::artifact(format!("Failed to open model artifact '{}': {e}", path.display()))
    })?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::artifact(format!("Invalid model artifact '{}': {e}", path.display())))?;

    let loaded = build_model(artifact)?;
    info!(
        path = %path.display(),
        model = loaded.model.kind_name(),
        r2 = loaded.r2_score,
        "loaded model artifact"
    );
    Ok(loaded)
}

/// Validate an in-memory artifact and build the predictor.
pub fn build_model(artifact: ModelArtifact) -> Result<LoadedArtifact, AppError> {
    if artifact.format_version != FORMAT_VERSION {
        return Err(AppError::artifact(format!(
            "Unsupported artifact format_version {} (expected {FORMAT_VERSION}).",
            artifact.format_version
        )));
    }
    check_feature_names(&artifact.feature_names)?;

    let model = match artifact.model {
        ModelParams::Linear {
            intercept,
            coefficients,
        } => {
            if coefficients.len() != N_FEATURES {
                return Err(AppError::artifact(format!(
                    "Linear model has {} coefficients; expected {N_FEATURES}.",
                    coefficients.len()
                )));
            }
            LoadedModel::Linear(LinearModel::new(intercept, coefficients)?)
        }
        ModelParams::Forest { trees } => LoadedModel::Forest(ForestModel::new(N_FEATURES, trees)?),
    };

    let r2_score = match artifact.r2_score {
        Some(s) if s.is_finite() => s,
        Some(_) => return Err(AppError::artifact("Artifact r2_score must be finite.")),
        None => DEFAULT_MODEL_SCORE,
    };

    Ok(LoadedArtifact { model, r2_score })
}

/// The artifact must list exactly the encoder's columns, in the same order.
fn check_feature_names(names: &[String]) -> Result<(), AppError> {
    let matches = names.len() == N_FEATURES && names.iter().zip(FEATURE_NAMES).all(|(a, b)| a == b);
    if !matches {
        return Err(AppError::artifact(format!(
            "Artifact feature columns {names:?} do not match encoder columns {FEATURE_NAMES:?}."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn linear(coefficients: Vec<f64>) -> ModelArtifact {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            feature_names: names(),
            r2_score: None,
            model: ModelParams::Linear {
                intercept: 1000.0,
                coefficients,
            },
        }
    }

    #[test]
    fn missing_score_falls_back_to_default() {
        let loaded = build_model(linear(vec![1.0; 8])).unwrap();
        assert_eq!(loaded.r2_score, DEFAULT_MODEL_SCORE);
        assert!(loaded.model.coefficients().is_some());
    }

    #[test]
    fn reordered_columns_are_rejected() {
        let mut artifact = linear(vec![1.0; 8]);
        artifact.feature_names.swap(6, 7);
        let err = build_model(artifact).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Artifact);
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        assert!(build_model(linear(vec![1.0; 9])).is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut artifact = linear(vec![1.0; 8]);
        artifact.format_version = 2;
        assert!(build_model(artifact).is_err());
    }

    #[test]
    fn parses_forest_json() {
        let json = r#"{
            "format_version": 1,
            "feature_names": ["Education","Experience","Age","Job_Title_Director",
                              "Job_Title_Engineer","Job_Title_Manager","Location_Suburban","Location_Urban"],
            "r2_score": 0.9,
            "model": {"kind": "forest", "trees": [{"nodes": [{"node": "leaf", "value": 50000.0}]}]}
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        let loaded = build_model(artifact).unwrap();
        assert_eq!(loaded.model.kind_name(), "forest");
        assert_eq!(loaded.r2_score, 0.9);
        assert!(loaded.model.coefficients().is_none());
    }
}
