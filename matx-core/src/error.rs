//! Structured errors
//!
//! Errors never crash the calculator. During evaluation they are values
//! that propagate through operators; at the session boundary they become
//! user-visible notices carrying the underlying cause.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIMENSION_ERROR: &str = "DIMENSION_ERROR";
    pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
    pub const VALUE_ERROR: &str = "VALUE_ERROR";
    pub const INVALID_REGISTER: &str = "INVALID_REGISTER";
    pub const EMPTY_REGISTER: &str = "EMPTY_REGISTER";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation continued without the offending part (e.g. a rejected store target)
    Warning,
    /// Operation failed, no state changed
    Error,
    /// Engine invariant broken
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Input text that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Zero-based character column in the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatxError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl MatxError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.input = Some(input.into());
        self
    }

    pub fn at_column(mut self, column: usize) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.column = Some(column);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Check expression syntax")
    }

    pub fn dimension_error(details: impl Into<String>) -> Self {
        Self::new(codes::DIMENSION_ERROR, details.into())
            .with_suggestion("Dimensions must be positive integers")
    }

    pub fn shape_mismatch(expected: usize, got: usize) -> Self {
        Self::new(
            codes::SHAPE_MISMATCH,
            format!("Number of elements doesn't match matrix size (expected {}, got {})", expected, got),
        )
    }

    pub fn value_error(token: &str) -> Self {
        Self::new(codes::VALUE_ERROR, format!("could not convert '{}' to a number", token))
            .with_suggestion("Please enter valid integers for dimensions and numbers.")
    }

    pub fn invalid_register(candidate: &str, accepted: &[char]) -> Self {
        let names: Vec<String> = accepted.iter().map(|c| format!("'reg {}'", c)).collect();
        Self::new(
            codes::INVALID_REGISTER,
            format!("Invalid register assignment '{}'", candidate),
        )
        .with_suggestion(format!("Use {}", names.join(", ")))
    }

    pub fn empty_register(name: char) -> Self {
        Self::new(codes::EMPTY_REGISTER, format!("register {} is empty", name))
            .with_suggestion(format!("Store a value with 'reg {}' first", name))
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use help to list available functions")
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::TYPE_ERROR,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, details.into())
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "division by zero")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for MatxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(col) = self.context.as_ref().and_then(|c| c.column) {
            write!(f, " at column {}", col + 1)?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MatxError {}

impl From<NumberError> for MatxError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::NotANumber(s) => Self::value_error(&s),
            NumberError::NotAnInteger(s) => {
                Self::dimension_error(format!("'{}' is not a valid integer", s))
            }
            NumberError::NotPositive(n) => {
                Self::dimension_error(format!("{} is not a positive size", n))
            }
        }
    }
}
