//! Regression model implementations behind the `Predictor` trait.
//!
//! Models are loaded once at startup and only ever read afterwards.

pub mod forest;
pub mod linear;
pub mod model;

pub use forest::*;
pub use linear::*;
pub use model::*;
