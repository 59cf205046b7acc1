//! Plain matrix value type
//!
//! Row-major `f64` grid, immutable once built. Arithmetic lives in
//! `matx-linalg` and serialization in `matx::encode`; this type only
//! guarantees its shape invariant.

use crate::MatxError;
use serde::Serialize;

/// Largest number of cells a matrix may hold (a 4096×4096 grid).
pub const MAX_CELLS: usize = 1 << 24;

/// Cell count for a rows × cols shape, bounded by [`MAX_CELLS`].
fn cell_count(rows: usize, cols: usize) -> Result<usize, MatxError> {
    rows.checked_mul(cols)
        .filter(|&count| count <= MAX_CELLS)
        .ok_or_else(|| MatxError::dimension_error(format!("{}×{} is too large", rows, cols)))
}

/// A rows × cols grid of `f64` (both ≥ 1), stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build from a flat row-major sequence.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatxError> {
        if rows == 0 || cols == 0 {
            return Err(MatxError::dimension_error(format!(
                "matrix must be at least 1×1, got {}×{}",
                rows, cols
            )));
        }
        let expected = cell_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatxError::shape_mismatch(expected, data.len()));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatxError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatxError::domain_error(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
        }
        Self::from_row_major(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// n×n identity matrix
    pub fn identity(n: usize) -> Result<Self, MatxError> {
        let count = cell_count(n, n)?;
        let mut data = Vec::new();
        data.try_reserve_exact(count)
            .map_err(|_| MatxError::dimension_error(format!("{}×{} is too large", n, n)))?;
        data.resize(count, 0.0);
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self::from_row_major(n, n, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Single row or single column
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }

    /// Flat row-major view
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Combine two equal-shape matrices element by element.
    pub fn zip_map(&self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Option<Matrix> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[test]
    fn test_row_major_layout() {
        let m = Matrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(0, 2), Some(3.0));
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
    }

    #[test]
    fn test_count_must_match_shape() {
        let err = Matrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.is(codes::SHAPE_MISMATCH));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = Matrix::from_row_major(0, 3, vec![]).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
        assert!(Matrix::identity(0).is_err());
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is(codes::DOMAIN_ERROR));
    }

    #[test]
    fn test_identity() {
        let i = Matrix::identity(3).unwrap();
        assert!(i.is_square());
        assert_eq!(i.get(1, 1), Some(1.0));
        assert_eq!(i.get(0, 1), Some(0.0));
        assert_eq!(i.as_slice().iter().sum::<f64>(), 3.0);
    }

    #[test]
    fn test_oversized_identity_rejected() {
        let err = Matrix::identity(usize::MAX).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
        let err = Matrix::identity(100_000).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
        assert!(Matrix::identity(4096).is_ok());
    }

    #[test]
    fn test_oversized_shape_rejected() {
        let err = Matrix::from_row_major(usize::MAX, 2, vec![]).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
        let err = Matrix::from_row_major(MAX_CELLS + 1, 1, vec![]).unwrap_err();
        assert!(err.is(codes::DIMENSION_ERROR));
    }

    #[test]
    fn test_zip_map_requires_same_shape() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![1.0], vec![2.0]]).unwrap();
        assert!(a.zip_map(&b, |x, y| x + y).is_none());
        let sum = a.zip_map(&a, |x, y| x + y).unwrap();
        assert_eq!(sum.as_slice(), &[2.0, 4.0]);
    }
}
