//! Input/output helpers.
//!
//! - model artifact load + validation (`artifact`)
//! - CSV ingest of employee profiles (`profiles`)
//! - report and batch exports (`export`)

pub mod artifact;
pub mod export;
pub mod profiles;

pub use artifact::*;
pub use export::*;
pub use profiles::*;
