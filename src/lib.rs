//! A Rust library for matching patient visits to comorbidity code groups
//! with a parallel, chunked binary-search kernel.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
pub use config::MatcherConfig;
pub use error::{ComorbidError, Result};
pub use models::{DiagnosisCode, ResultMatrix};

// Matching entry points
pub use algorithm::comorbidity::{
    match_comorbidities, match_comorbidities_into, match_into_with, match_with,
};
