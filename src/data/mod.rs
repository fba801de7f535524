//! Built-in data: reference profiles used for the sample-predictions view.

pub mod sample;

pub use sample::{SampleData, SampleInsights, SamplePrediction, reference_profiles, score_samples, summarize};
