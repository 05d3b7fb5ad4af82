//! Algorithm implementations for comorbidity analysis
//!
//! This module contains the parallel matching kernel that maps visits to
//! comorbidity groups.

pub mod comorbidity;
