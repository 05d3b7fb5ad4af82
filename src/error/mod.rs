//! Error handling for the comorbidity matcher.

use rayon::ThreadPoolBuildError;

/// Specialized error type for comorbidity matching
#[derive(Debug, thiserror::Error)]
pub enum ComorbidError {
    /// The matcher configuration cannot be used (zero chunk size, zero threads)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-provided output buffer does not have `visits * comorbidities` cells
    #[error("Output buffer has {actual} cells, expected {expected}")]
    BufferSize {
        /// Required number of cells
        expected: usize,
        /// Length of the buffer that was passed in
        actual: usize,
    },

    /// The visit x comorbidity cell count does not fit in `usize`
    #[error("Result matrix of {num_visits} visits x {num_comorbidities} comorbidities is too large")]
    MatrixTooLarge {
        /// Number of visits requested
        num_visits: usize,
        /// Number of comorbidities requested
        num_comorbidities: usize,
    },

    /// A dedicated worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

impl ComorbidError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type for comorbidity matching operations
pub type Result<T> = std::result::Result<T, ComorbidError>;
