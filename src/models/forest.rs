//! Regression tree ensembles.
//!
//! Each tree is a flat node array rooted at index 0. A split sends a row to
//! `left` when `x[feature] <= threshold`, otherwise to `right`. The ensemble
//! prediction is the mean of its trees. Trees expose no coefficients, so the
//! importance display is unavailable for this family.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::model::{Predictor, check_shape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Structural checks: non-empty, in-range indices, finite values.
    fn validate(&self, n_features: usize) -> Result<(), AppError> {
        if self.nodes.is_empty() {
            return Err(AppError::artifact("Tree has no nodes."));
        }
        let n = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(AppError::artifact(format!(
                            "Tree node {idx} splits on feature {feature}; only {n_features} features exist."
                        )));
                    }
                    // Children must point forward, which also rules out cycles.
                    if left <= idx || right <= idx || left >= n || right >= n {
                        return Err(AppError::artifact(format!(
                            "Tree node {idx} has invalid children ({left}, {right})."
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(AppError::artifact(format!("Tree node {idx} has a non-finite threshold.")));
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(AppError::artifact(format!("Tree leaf {idx} has a non-finite value.")));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForestModel {
    n_features: usize,
    trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn new(n_features: usize, trees: Vec<DecisionTree>) -> Result<Self, AppError> {
        if trees.is_empty() {
            return Err(AppError::artifact("Forest model has no trees."));
        }
        for tree in &trees {
            tree.validate(n_features)?;
        }
        Ok(Self { n_features, trees })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Predictor for ForestModel {
    fn kind_name(&self) -> &'static str {
        "forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &DMatrix<f64>) -> Result<Vec<f64>, AppError> {
        check_shape(features, self.n_features)?;
        let n_trees = self.trees.len() as f64;
        let mut out = Vec::with_capacity(features.nrows());
        let mut row = vec![0.0; self.n_features];
        for i in 0..features.nrows() {
            for (j, slot) in row.iter_mut().enumerate() {
                *slot = features[(i, j)];
            }
            let sum: f64 = self.trees.iter().map(|t| t.evaluate(&row)).sum();
            out.push(sum / n_trees);
        }
        Ok(out)
    }
}
