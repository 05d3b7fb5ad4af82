//! Test utilities for testing and benchmarking
//!
//! This module provides utilities for testing and benchmarking the matcher.


// Re-export commonly used functions for convenience
pub use fixtures::{reference_match, synthetic_map, synthetic_visits};
