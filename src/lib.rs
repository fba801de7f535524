//! `salary-predictor` library crate.
//!
//! The binary (`salary`) is a thin wrapper around this library so that:
//!
//! - the encoder and estimator are testable without spawning processes
//! - tests can swap in stub predictors behind the `Predictor` trait
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod encode;
pub mod error;
pub mod estimator;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
