//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - categorical input enums (`EducationLevel`, `JobTitle`, `Location`)
//! - the per-request input record (`EmployeeProfile`)
//! - prediction outputs (`PredictionResult`, `FeatureImportance`)

pub mod types;

pub use types::*;
