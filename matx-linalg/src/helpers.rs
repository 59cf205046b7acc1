//! Helper functions for matrix operations

use matx_core::{Matrix, MatxError, Value};
use nalgebra::DMatrix;

/// Extract a matrix argument
pub fn extract_matrix<'v>(value: &'v Value, func: &str, arg: &str) -> Result<&'v Matrix, MatxError> {
    match value {
        Value::Matrix(m) => Ok(m),
        Value::Error(e) => Err(e.clone()),
        _ => Err(MatxError::arg_type(func, arg, "Matrix", value.type_name())),
    }
}

/// Convert to nalgebra (row-major source, column-major target)
pub fn to_dmatrix(m: &Matrix) -> DMatrix<f64> {
    DMatrix::from_row_slice(m.rows(), m.cols(), m.as_slice())
}

/// Convert back from nalgebra
pub fn from_dmatrix(d: &DMatrix<f64>) -> Result<Matrix, MatxError> {
    let mut data = Vec::with_capacity(d.nrows() * d.ncols());
    for i in 0..d.nrows() {
        for j in 0..d.ncols() {
            data.push(d[(i, j)]);
        }
    }
    Matrix::from_row_major(d.nrows(), d.ncols(), data)
}

/// Check that two matrices have compatible dimensions for multiplication
pub fn check_matmul_dims(a: &Matrix, b: &Matrix, func: &str) -> Result<(), MatxError> {
    if a.cols() != b.rows() {
        return Err(MatxError::domain_error(format!(
            "{}: incompatible dimensions {}×{} and {}×{}",
            func,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that two matrices have the same dimensions
pub fn check_same_dims(a: &Matrix, b: &Matrix, func: &str) -> Result<(), MatxError> {
    if a.shape() != b.shape() {
        return Err(MatxError::domain_error(format!(
            "{}: matrices must have same dimensions: {}×{} vs {}×{}",
            func,
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// Check that a matrix is square
pub fn check_square(m: &Matrix, func: &str) -> Result<(), MatxError> {
    if !m.is_square() {
        return Err(MatxError::domain_error(format!(
            "{}: requires square matrix, got {}×{}",
            func,
            m.rows(),
            m.cols()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matx_core::codes;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_dmatrix_round_trip_keeps_row_order() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let d = to_dmatrix(&a);
        assert_eq!(d[(0, 2)], 3.0);
        assert_eq!(d[(1, 0)], 4.0);
        assert_eq!(from_dmatrix(&d).unwrap(), a);
    }

    #[test]
    fn test_extract_matrix() {
        let v = Value::Matrix(m(vec![vec![1.0]]));
        assert!(extract_matrix(&v, "det", "M").is_ok());
        let err = extract_matrix(&Value::Number(1.0), "det", "M").unwrap_err();
        assert!(err.is(codes::TYPE_ERROR));
        assert!(err.message.contains("det()"));
    }

    #[test]
    fn test_dimension_checks() {
        let a = m(vec![vec![1.0, 2.0]]);
        let b = m(vec![vec![1.0], vec![2.0]]);
        assert!(check_matmul_dims(&a, &b, "matmul").is_ok());
        assert!(check_matmul_dims(&a, &a, "matmul").is_err());
        assert!(check_same_dims(&a, &b, "add").is_err());
        assert!(check_square(&a, "det").is_err());
    }
}
