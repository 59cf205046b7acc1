//! Arithmetic operators
//!
//! `+ - * /` work element by element on equal-shape matrices and broadcast
//! a scalar across a matrix. `@` is the matrix product.

use crate::helpers::{check_matmul_dims, check_same_dims, from_dmatrix, to_dmatrix};
use matx_core::{Matrix, MatxError, Value};

/// Element-by-element operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elementwise {
    Add,
    Sub,
    Mul,
    Div,
}

impl Elementwise {
    pub fn symbol(self) -> &'static str {
        match self {
            Elementwise::Add => "+",
            Elementwise::Sub => "-",
            Elementwise::Mul => "*",
            Elementwise::Div => "/",
        }
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Elementwise::Add => a + b,
            Elementwise::Sub => a - b,
            Elementwise::Mul => a * b,
            Elementwise::Div => a / b,
        }
    }
}

/// Apply an elementwise operator with scalar broadcasting.
///
/// Scalar ÷ scalar by zero is an error; once a matrix is involved the
/// result follows IEEE rules and may contain `inf`/`nan`.
pub fn elementwise(op: Elementwise, left: &Value, right: &Value) -> Result<Value, MatxError> {
    match (left, right) {
        (Value::Error(e), _) | (_, Value::Error(e)) => Err(e.clone()),
        (Value::Number(a), Value::Number(b)) => {
            if op == Elementwise::Div && *b == 0.0 {
                return Err(MatxError::div_zero());
            }
            Ok(Value::Number(op.apply(*a, *b)))
        }
        (Value::Matrix(m), Value::Number(s)) => Ok(Value::Matrix(m.map(|x| op.apply(x, *s)))),
        (Value::Number(s), Value::Matrix(m)) => Ok(Value::Matrix(m.map(|x| op.apply(*s, x)))),
        (Value::Matrix(a), Value::Matrix(b)) => {
            check_same_dims(a, b, op.symbol())?;
            a.zip_map(b, |x, y| op.apply(x, y))
                .map(Value::Matrix)
                .ok_or_else(|| MatxError::internal("shape check passed but zip failed"))
        }
    }
}

/// Matrix product `left @ right`
pub fn matmul(left: &Value, right: &Value) -> Result<Value, MatxError> {
    match (left, right) {
        (Value::Error(e), _) | (_, Value::Error(e)) => Err(e.clone()),
        (Value::Matrix(a), Value::Matrix(b)) => matmul_matrices(a, b).map(Value::Matrix),
        (Value::Number(_), _) => Err(MatxError::type_error("Matrix on left of @", "Number")),
        (_, Value::Number(_)) => Err(MatxError::type_error("Matrix on right of @", "Number")),
    }
}

pub fn matmul_matrices(a: &Matrix, b: &Matrix) -> Result<Matrix, MatxError> {
    check_matmul_dims(a, b, "@")?;
    from_dmatrix(&(to_dmatrix(a) * to_dmatrix(b)))
}

/// Unary minus
pub fn negate(value: &Value) -> Result<Value, MatxError> {
    match value {
        Value::Error(e) => Err(e.clone()),
        Value::Number(n) => Ok(Value::Number(-n)),
        Value::Matrix(m) => Ok(Value::Matrix(m.map(|x| -x))),
    }
}
