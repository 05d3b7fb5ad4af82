//! Utility modules for logging, progress reporting and test fixtures

pub mod logging;
pub mod test;
