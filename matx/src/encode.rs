//! Element encoder
//!
//! Converts raw cell tokens into the tag grammar understood by the external
//! renderer (`@RT{..}`, `@DIV{..;..}`) and whole matrices into `@MATX{{..}}`.

use lazy_static::lazy_static;
use matx_core::{format_number, parse_number, Matrix, MatxError};
use regex::Regex;

lazy_static! {
    static ref SQRT_PATTERN: Regex = Regex::new(r"sqrt(\d+)").expect("sqrt pattern is valid");
}

/// Encode one cell token.
///
/// Every `sqrt<digits>` becomes `@RT{digits}`. Then, if the token splits on
/// its first `div` into two non-empty halves, each half is encoded again and
/// wrapped as `@DIV{left;right}`; otherwise the token is returned as is.
pub fn encode_cell(token: &str) -> String {
    let rewritten = SQRT_PATTERN.replace_all(token, "@RT{${1}}");
    match rewritten.split_once("div") {
        Some((left, right)) if !left.is_empty() && !right.is_empty() => {
            format!("@DIV{{{};{}}}", encode_cell(left), encode_cell(right))
        }
        _ => rewritten.into_owned(),
    }
}

/// Serialize a matrix as `@MATX{{c11;c12};{c21;c22}}`.
pub fn encode_matrix(matrix: &Matrix) -> String {
    let rows: Vec<String> = matrix
        .row_iter()
        .map(|row| {
            row.iter()
                .map(|&x| format_number(x))
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect();
    format!("@MATX{{{{{}}}}}", rows.join("};{"))
}

/// Build a rows × cols matrix from flat row-major tokens.
///
/// Each token goes through [`encode_cell`] before numeric conversion, so a
/// token that produced a `@RT`/`@DIV` tag fails here with `VALUE_ERROR`.
pub fn build_matrix(elements: &[&str], rows: usize, cols: usize) -> Result<Matrix, MatxError> {
    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| MatxError::dimension_error(format!("{}×{} is too large", rows, cols)))?;
    if elements.len() != expected {
        return Err(MatxError::shape_mismatch(expected, elements.len()));
    }

    let data = elements
        .iter()
        .map(|token| {
            let encoded = encode_cell(token);
            parse_number(&encoded).map_err(MatxError::from)
        })
        .collect::<Result<Vec<f64>, MatxError>>()?;

    Matrix::from_row_major(rows, cols, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matx_core::codes;

    #[test]
    fn test_encode_sqrt() {
        assert_eq!(encode_cell("sqrt9"), "@RT{9}");
        assert_eq!(encode_cell("sqrt2sqrt3"), "@RT{2}@RT{3}");
        // No digits, no rewrite
        assert_eq!(encode_cell("sqrtx"), "sqrtx");
    }

    #[test]
    fn test_encode_div() {
        assert_eq!(encode_cell("4div2"), "@DIV{4;2}");
        assert_eq!(encode_cell("sqrt4div2"), "@DIV{@RT{4};2}");
        assert_eq!(encode_cell("1divsqrt3"), "@DIV{1;@RT{3}}");
    }

    #[test]
    fn test_encode_div_splits_on_first_occurrence() {
        assert_eq!(encode_cell("1div2div3"), "@DIV{1;@DIV{2;3}}");
    }

    #[test]
    fn test_encode_div_needs_both_halves() {
        assert_eq!(encode_cell("div2"), "div2");
        assert_eq!(encode_cell("2div"), "2div");
        assert_eq!(encode_cell("sqrt5div"), "@RT{5}div");
    }

    #[test]
    fn test_literals_pass_through() {
        assert_eq!(encode_cell("3.25"), "3.25");
        assert_eq!(encode_cell("-7"), "-7");
    }

    #[test]
    fn test_encode_matrix() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(encode_matrix(&m), "@MATX{{1.0;2.0};{3.0;4.0}}");

        let single = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        assert_eq!(encode_matrix(&single), "@MATX{{0.5}}");

        let column = Matrix::from_rows(vec![vec![1.0], vec![-2.5], vec![1e-5]]).unwrap();
        assert_eq!(encode_matrix(&column), "@MATX{{1.0};{-2.5};{1e-05}}");
    }

    #[test]
    fn test_build_matrix_row_major() {
        let tokens = ["1", "2", "3", "4", "5", "6"];
        let m = build_matrix(&tokens, 2, 3).unwrap();
        for (k, token) in tokens.iter().enumerate() {
            let expected: f64 = token.parse().unwrap();
            assert_eq!(m.get(k / 3, k % 3), Some(expected));
        }
    }

    #[test]
    fn test_build_matrix_decimal_tokens() {
        let tokens = ["-0.5", "1e-3", ".25", "2"];
        let m = build_matrix(&tokens, 2, 2).unwrap();
        assert_eq!(m.as_slice(), &[-0.5, 0.001, 0.25, 2.0]);
        assert_eq!(encode_matrix(&m), "@MATX{{-0.5;0.001};{0.25;2.0}}");

        let single = build_matrix(&["-7.5"], 1, 1).unwrap();
        assert_eq!(single.get(0, 0), Some(-7.5));
        assert_eq!(encode_matrix(&single), "@MATX{{-7.5}}");
    }

    #[test]
    fn test_build_matrix_shape_mismatch() {
        let err = build_matrix(&["1", "2", "3"], 2, 2).unwrap_err();
        assert!(err.is(codes::SHAPE_MISMATCH));
    }

    #[test]
    fn test_build_matrix_rejects_tagged_tokens() {
        let err = build_matrix(&["sqrt4"], 1, 1).unwrap_err();
        assert!(err.is(codes::VALUE_ERROR));
        assert!(err.message.contains("@RT{4}"));

        let err = build_matrix(&["1", "abc"], 1, 2).unwrap_err();
        assert!(err.is(codes::VALUE_ERROR));
    }
}
