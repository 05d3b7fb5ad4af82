//! Comorbidity data model
//!
//! Visits and comorbidity groups are plain slices of integer-encoded diagnosis
//! codes. The only owned type here is the `ResultMatrix`, the dense
//! visit x comorbidity membership table produced by the matcher.

use crate::error::{ComorbidError, Result};

/// Integer-encoded ICD diagnosis code
pub type DiagnosisCode = i32;

/// Number of cells in a `num_visits` x `num_comorbidities` matrix
///
/// Fails with `MatrixTooLarge` when the product does not fit in `usize`.
pub fn cell_count(num_visits: usize, num_comorbidities: usize) -> Result<usize> {
    num_visits
        .checked_mul(num_comorbidities)
        .ok_or(ComorbidError::MatrixTooLarge {
            num_visits,
            num_comorbidities,
        })
}

/// Dense row-major boolean matrix with one row per visit and one column per comorbidity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMatrix {
    data: Vec<bool>,
    num_visits: usize,
    num_comorbidities: usize,
}

impl ResultMatrix {
    /// Create a matrix with every cell set to `false`
    pub fn new_false(num_visits: usize, num_comorbidities: usize) -> Result<Self> {
        let cells = cell_count(num_visits, num_comorbidities)?;
        Ok(Self {
            data: vec![false; cells],
            num_visits,
            num_comorbidities,
        })
    }

    /// Wrap an already filled row-major buffer
    pub(crate) fn from_parts(data: Vec<bool>, num_visits: usize, num_comorbidities: usize) -> Self {
        debug_assert_eq!(data.len(), num_visits * num_comorbidities);
        Self {
            data,
            num_visits,
            num_comorbidities,
        }
    }

    /// Number of rows (visits)
    #[must_use]
    pub const fn num_visits(&self) -> usize {
        self.num_visits
    }

    /// Number of columns (comorbidities)
    #[must_use]
    pub const fn num_comorbidities(&self) -> usize {
        self.num_comorbidities
    }

    /// True when the matrix has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `visit` has `comorbidity`, or `None` if either index is out of range
    #[must_use]
    pub fn get(&self, visit: usize, comorbidity: usize) -> Option<bool> {
        if visit >= self.num_visits || comorbidity >= self.num_comorbidities {
            return None;
        }
        self.data
            .get(visit * self.num_comorbidities + comorbidity)
            .copied()
    }

    /// All comorbidity flags for one visit
    #[must_use]
    pub fn row(&self, visit: usize) -> Option<&[bool]> {
        if visit >= self.num_visits {
            return None;
        }
        let start = visit * self.num_comorbidities;
        self.data.get(start..start + self.num_comorbidities)
    }

    /// The flat row-major buffer
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Consume the matrix and return the flat row-major buffer
    #[must_use]
    pub fn into_vec(self) -> Vec<bool> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_false_dimensions() {
        let matrix = ResultMatrix::new_false(3, 4).unwrap();
        assert_eq!(matrix.num_visits(), 3);
        assert_eq!(matrix.num_comorbidities(), 4);
        assert_eq!(matrix.as_slice().len(), 12);
        assert!(matrix.as_slice().iter().all(|cell| !cell));
    }

    #[test]
    fn test_row_major_layout() {
        let mut matrix = ResultMatrix::new_false(2, 3).unwrap();
        matrix.as_mut_slice()[3 + 2] = true;

        assert_eq!(matrix.get(1, 2), Some(true));
        assert_eq!(matrix.get(0, 2), Some(false));
        assert_eq!(matrix.row(1), Some(&[false, false, true][..]));
    }

    #[test]
    fn test_out_of_range_access() {
        let matrix = ResultMatrix::new_false(2, 3).unwrap();
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.row(2), None);
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = ResultMatrix::new_false(5, 0).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.row(0), Some(&[][..]));
        assert!(matrix.into_vec().is_empty());
    }

    #[test]
    fn test_cell_count_overflow() {
        assert_eq!(cell_count(3, 4).unwrap(), 12);
        assert!(matches!(
            cell_count(usize::MAX, 2),
            Err(ComorbidError::MatrixTooLarge {
                num_visits: usize::MAX,
                num_comorbidities: 2
            })
        ));
        assert!(ResultMatrix::new_false(usize::MAX / 2 + 1, 2).is_err());
    }
}
