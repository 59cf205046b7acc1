//! Number parsing and display
//!
//! Matrix cells are plain `f64`. Display follows the shortest round-trip
//! representation with a mandatory fractional part for integral values and
//! a signed, two-digit exponent (`1.0`, `1e+16`, `2.5e-07`), which is the
//! form the downstream renderer expects inside `@MATX{...}` blocks.

use thiserror::Error;

/// Error type for number parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("could not convert '{0}' to a number")]
    NotANumber(String),

    #[error("'{0}' is not a valid integer")]
    NotAnInteger(String),

    #[error("{0} is not a positive size")]
    NotPositive(i64),
}

/// Parse a single token as `f64`.
///
/// Accepts integers, decimals, scientific notation and the special values
/// `inf`/`nan` (case-insensitive). Surrounding whitespace is ignored.
pub fn parse_number(token: &str) -> Result<f64, NumberError> {
    let trimmed = token.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| NumberError::NotANumber(trimmed.to_string()))
}

/// Parse a matrix dimension or identity size: an integer ≥ 1.
pub fn parse_dimension(text: &str) -> Result<usize, NumberError> {
    let trimmed = text.trim();
    let n: i64 = trimmed
        .parse()
        .map_err(|_| NumberError::NotAnInteger(trimmed.to_string()))?;
    if n < 1 {
        return Err(NumberError::NotPositive(n));
    }
    usize::try_from(n).map_err(|_| NumberError::NotAnInteger(trimmed.to_string()))
}

/// Format an `f64` for display and for matrix encodings.
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug already picks the shortest round-trip digits and switches to
    // exponent form below 1e-4 and from 1e16 up; only the exponent differs.
    let s = format!("{:?}", x);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}
