//! Matx Core - Fundamental types
//!
//! This crate provides the core types used throughout Matx:
//! - `Matrix`: Row-major f64 grid with a checked shape
//! - `Value`: Runtime values (number, matrix, error)
//! - `MatxError`: Structured, propagating errors
//! - `RegisterStore`: The configured set of named registers

mod error;
mod matrix;
mod number;
mod registers;
mod value;

pub use error::{codes, ErrorContext, MatxError, Severity};
pub use matrix::{Matrix, MAX_CELLS};
pub use number::{format_number, parse_dimension, parse_number, NumberError};
pub use registers::{RegisterProfile, RegisterSet, RegisterStore};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{Matrix, MatxError, RegisterStore, Severity, Value};
}
