//! Comorbidity matching
//!
//! This module determines, for each visit, which comorbidity code groups
//! contain at least one of the visit's diagnosis codes. It includes:
//!
//! 1. Chunk partitioning of the visit index space
//! 2. The per-chunk kernel using binary search over sorted groups
//! 3. Parallel dispatch with disjoint output slices per chunk
//!
//! Comorbidity groups must already be sorted ascending; building and
//! normalising them is the caller's job.

pub mod chunk;
pub mod matcher;

// Re-export key functions
pub use chunk::{Chunk, ChunkRange, chunk_ranges, visit_has_comorbidity};
pub use matcher::{match_comorbidities, match_comorbidities_into, match_into_with, match_with};
