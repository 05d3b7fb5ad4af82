//! Chunked work units for the comorbidity matcher
//!
//! A chunk covers a contiguous, inclusive range of visit indices and owns a
//! private boolean buffer for those rows. Workers fill the private buffer and
//! then copy it into the chunk's row range of the shared output.

use log::trace;

use crate::models::DiagnosisCode;

/// Inclusive range of visit indices handled by one task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    /// First visit index in the chunk
    pub begin: usize,
    /// Last visit index in the chunk (inclusive)
    pub end: usize,
}

impl ChunkRange {
    /// Range for the `index`-th chunk, or `None` if it would start past the last visit
    #[must_use]
    pub fn nth(index: usize, chunk_size: usize, num_visits: usize) -> Option<Self> {
        let begin = index.checked_mul(chunk_size)?;
        if chunk_size == 0 || begin >= num_visits {
            return None;
        }
        let end = begin.saturating_add(chunk_size - 1).min(num_visits - 1);
        Some(Self { begin, end })
    }

    /// Number of visits in the chunk
    pub(crate) const fn len(&self) -> usize {
        self.end - self.begin + 1
    }

    /// Offset of the chunk's first cell in the row-major output
    #[cfg(test)]
    const fn row_offset(&self, num_comorbidities: usize) -> usize {
        self.begin * num_comorbidities
    }
}

/// Partition `[0, num_visits)` into consecutive chunks of `chunk_size` visits
///
/// The final chunk is truncated to fit. Yields nothing when there are no
/// visits or the chunk size is zero.
pub fn chunk_ranges(num_visits: usize, chunk_size: usize) -> impl Iterator<Item = ChunkRange> {
    (0..).map_while(move |index| ChunkRange::nth(index, chunk_size, num_visits))
}

/// Whether any of `codes` occurs in the sorted `group`
///
/// Stops at the first code found.
#[inline]
pub fn visit_has_comorbidity(codes: &[DiagnosisCode], group: &[DiagnosisCode]) -> bool {
    codes.iter().any(|code| group.binary_search(code).is_ok())
}

/// A computed chunk: its range and the private result rows for it
#[derive(Debug)]
pub struct Chunk {
    range: ChunkRange,
    cells: Vec<bool>,
}

impl Chunk {
    /// Match every visit in `range` against every comorbidity group
    ///
    /// All groups are checked for each visit, even after some have matched.
    pub fn compute<V, G>(range: ChunkRange, visits: &[V], map: &[G]) -> Self
    where
        V: AsRef<[DiagnosisCode]>,
        G: AsRef<[DiagnosisCode]>,
    {
        debug_assert!(range.end < visits.len(), "chunk end out of bounds");
        trace!("chunk begin = {}, end = {}", range.begin, range.end);

        let num_comorbid = map.len();
        let mut cells = vec![false; range.len() * num_comorbid];

        for (row, visit) in visits[range.begin..=range.end].iter().enumerate() {
            let codes = visit.as_ref();
            for (cmb, group) in map.iter().enumerate() {
                if visit_has_comorbidity(codes, group.as_ref()) {
                    cells[row * num_comorbid + cmb] = true;
                }
            }
        }

        Self { range, cells }
    }

    #[cfg(test)]
    const fn range(&self) -> ChunkRange {
        self.range
    }

    #[cfg(test)]
    fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Copy the private rows into `dest`, the chunk's slice of the shared output
    pub fn merge_into(self, dest: &mut [bool]) {
        trace!("writing a chunk beginning at: {}", self.range.begin);
        dest.copy_from_slice(&self.cells);
    }
}
