//! Runtime values
//!
//! A value is a scalar, a matrix, or an error. Errors propagate through
//! computations instead of aborting them.

use crate::{Matrix, MatxError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Matrix(Matrix),
    Error(MatxError),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&MatxError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Matrix(_) => "Matrix",
            Value::Error(_) => "Error",
        }
    }

    /// Convert an error value into `Err`, anything else into `Ok`.
    pub fn into_result(self) -> Result<Value, MatxError> {
        match self {
            Value::Error(e) => Err(e),
            other => Ok(other),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl From<MatxError> for Value {
    fn from(e: MatxError) -> Self {
        Value::Error(e)
    }
}

impl From<Result<Value, MatxError>> for Value {
    fn from(r: Result<Value, MatxError>) -> Self {
        r.unwrap_or_else(Value::Error)
    }
}
