//! Configuration for the comorbidity matcher.

use std::fmt;

use crate::error::{ComorbidError, Result};

/// Default number of visits processed per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Configuration for the comorbidity matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Number of visits handled by one parallel task
    pub chunk_size: usize,
    /// Number of worker threads; `None` uses the global rayon pool
    pub parallelism: Option<usize>,
    /// Whether to draw a progress bar while chunks complete
    pub show_progress: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallelism: None,
            show_progress: false,
        }
    }
}

impl MatcherConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of visits per chunk
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the number of worker threads
    #[must_use]
    pub fn with_parallelism(mut self, threads: Option<usize>) -> Self {
        self.parallelism = threads;
        self
    }

    /// Enable or disable the progress bar
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check that the configuration can be used to dispatch work
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ComorbidError::invalid_config(
                "chunk size must be a positive number of visits",
            ));
        }

        if self.parallelism == Some(0) {
            return Err(ComorbidError::invalid_config(
                "parallelism hint must be at least one thread",
            ));
        }

        Ok(())
    }

    /// Number of threads the matcher will run on
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.parallelism.unwrap_or_else(rayon::current_num_threads)
    }
}

impl fmt::Display for MatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matcher Configuration:")?;
        writeln!(f, "  Chunk Size: {}", self.chunk_size)?;
        match self.parallelism {
            Some(threads) => writeln!(f, "  Threads: {threads}")?,
            None => writeln!(f, "  Threads: global pool")?,
        }
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        Ok(())
    }
}
