//! Domain models for comorbidity matching
//!
//! This module contains the data types shared by the matcher and its callers.

pub mod comorbidity;

// Re-export commonly used types
pub use comorbidity::{DiagnosisCode, ResultMatrix};
