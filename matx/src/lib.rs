//! Matx - Register-based matrix calculator
//!
//! Two engines share one register store:
//! - the element encoder, turning typed cell tokens into `@MATX{{..}}`
//!   text for the external renderer
//! - the expression evaluator, computing results over registers with a
//!   small, closed grammar (`+ - * / @`, parentheses, det/solve/cross)
//!
//! [`Session`] wires both to a notice queue and an optional clipboard.

mod ast;
mod clipboard;
mod directive;
mod encode;
mod eval;
mod lexer;
mod messages;
mod parser;
mod session;

pub use ast::{BinOp, Expr, UnaryOp};
pub use clipboard::{Clipboard, MemoryClipboard};
pub use directive::{split_element_directive, split_expression_directive, DIRECTIVE_KEYWORD};
pub use encode::{build_matrix, encode_cell, encode_matrix};
pub use eval::Evaluator;
pub use lexer::{tokenize, Token, TokenKind};
pub use messages::{MessageQueue, Notice, NoticeKind};
pub use parser::parse_expr;
pub use session::Session;
pub use matx_plugin::{FunctionMeta, FunctionRegistry};

use matx_core::{format_number, MatxError, RegisterStore, Severity, Value};
use matx_plugin::EvalContext;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of evaluating one expression line
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Computed value, or the cause of failure
    pub result: Result<Value, MatxError>,
    /// Register the result was written to
    pub stored: Option<char>,
    /// Rejected store directive; evaluation still ran without a target
    pub directive_error: Option<MatxError>,
}

/// Expression engine
pub struct Matx {
    registry: Arc<FunctionRegistry>,
}

impl Matx {
    pub fn new(registry: FunctionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(matx_linalg::standard_registry())
    }

    /// Evaluate `input`, honouring a trailing `reg<X>` directive.
    ///
    /// Registers are only written when evaluation succeeds and the
    /// directive names a storable register.
    pub fn evaluate(&self, input: &str, registers: &mut RegisterStore) -> Evaluation {
        let (expression, remainder) = split_expression_directive(input);

        let mut directive_error = None;
        let target = match remainder.map(|r| registers.resolve_target(r)) {
            Some(Ok(name)) => Some(name),
            Some(Err(e)) => {
                warn!(error = %e, "store directive rejected");
                directive_error = Some(e.with_severity(Severity::Warning));
                None
            }
            None => None,
        };

        let result = self.eval_expression(expression, registers);

        let stored = match (&result, target) {
            (Ok(value), Some(name)) => match registers.store(name, value.clone()) {
                Ok(()) => {
                    info!(register = %name, "result stored");
                    Some(name)
                }
                Err(e) => {
                    return Evaluation {
                        result: Err(e),
                        stored: None,
                        directive_error,
                    }
                }
            },
            _ => None,
        };

        Evaluation {
            result,
            stored,
            directive_error,
        }
    }

    /// Parse and evaluate without any directive handling or store.
    pub fn eval_expression(&self, expression: &str, registers: &RegisterStore) -> Result<Value, MatxError> {
        let expr = parse_expr(expression)?;
        debug!(?expr, "parsed expression");

        let ctx = EvalContext::new(&self.registry, registers);
        Evaluator::new().eval_expr(&expr, &ctx).into_result()
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn list_functions(&self) -> Vec<FunctionMeta> {
        self.registry.list_functions()
    }

    pub fn help(&self, name: &str) -> Option<FunctionMeta> {
        self.registry.get_function(name).map(|f| f.meta())
    }
}

impl Default for Matx {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

/// Text shown for a value: matrices in their canonical encoding, scalars
/// in shortest round-trip form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Matrix(m) => encode_matrix(m),
        Value::Error(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matx_core::{codes, Matrix, RegisterProfile};

    fn identity_in_a() -> RegisterStore {
        let mut store = RegisterStore::default();
        store
            .store('A', Value::Matrix(Matrix::identity(2).unwrap()))
            .unwrap();
        store
    }

    fn doubled() -> Value {
        Value::Matrix(Matrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]]).unwrap())
    }

    #[test]
    fn test_evaluate_without_directive() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("A+A", &mut store);
        assert_eq!(eval.result, Ok(doubled()));
        assert_eq!(eval.stored, None);
        assert!(!store.is_set('B'));
    }

    #[test]
    fn test_evaluate_stores_into_target() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("A+Areg B", &mut store);
        assert_eq!(eval.result, Ok(doubled()));
        assert_eq!(eval.stored, Some('B'));
        assert_eq!(store.lookup('B'), Some(&doubled()));
    }

    #[test]
    fn test_directive_is_case_and_space_insensitive() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("det(A) reg  c ", &mut store);
        assert_eq!(eval.stored, Some('C'));
        assert_eq!(store.lookup('C'), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_unset_register_leaves_store_unchanged() {
        let mut store = identity_in_a();
        let before: Vec<(char, Option<Value>)> =
            store.iter().map(|(n, v)| (n, v.cloned())).collect();

        let eval = Matx::default().evaluate("A+Dreg B", &mut store);
        assert!(eval.result.unwrap_err().is(codes::EMPTY_REGISTER));
        assert_eq!(eval.stored, None);

        let after: Vec<(char, Option<Value>)> =
            store.iter().map(|(n, v)| (n, v.cloned())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_invalid_directive_still_evaluates() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("A+A reg Z", &mut store);
        let directive = eval.directive_error.unwrap();
        assert!(directive.is(codes::INVALID_REGISTER));
        assert_eq!(directive.severity, Severity::Warning);
        assert_eq!(eval.result, Ok(doubled()));
        assert_eq!(eval.stored, None);
    }

    #[test]
    fn test_bare_invalid_directive() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("reg Z", &mut store);
        assert!(eval.directive_error.unwrap().is(codes::INVALID_REGISTER));
        // Nothing left of the directive to evaluate
        assert!(eval.result.unwrap_err().is(codes::PARSE_ERROR));
    }

    #[test]
    fn test_identity_register_is_not_a_target() {
        let mut store = identity_in_a();
        let eval = Matx::default().evaluate("A reg I", &mut store);
        assert!(eval.directive_error.is_some());
        assert!(!store.is_set('I'));
    }

    #[test]
    fn test_profile_limits_registers() {
        let mut store = RegisterStore::new(RegisterProfile::Basic.register_set());
        store.store('A', Value::Number(2.0)).unwrap();
        let engine = Matx::default();
        assert!(engine.evaluate("A reg D", &mut store).directive_error.is_some());
        let eval = engine.evaluate("A * D", &mut store);
        assert!(eval.result.unwrap_err().is(codes::INVALID_REGISTER));
    }

    #[test]
    fn test_cross_through_engine() {
        let mut store = RegisterStore::default();
        store
            .store('A', Value::Matrix(Matrix::from_rows(vec![vec![1.0, 0.0, 0.0]]).unwrap()))
            .unwrap();
        store
            .store('B', Value::Matrix(Matrix::from_rows(vec![vec![0.0, 1.0, 0.0]]).unwrap()))
            .unwrap();
        let eval = Matx::default().evaluate("cross(A, B) reg C", &mut store);
        assert_eq!(display_value(&eval.result.unwrap()), "@MATX{{0.0;0.0;1.0}}");
        assert!(store.is_set('C'));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&Value::Number(-2.0)), "-2.0");
        assert_eq!(display_value(&Value::Number(1e16)), "1e+16");
        assert_eq!(display_value(&doubled()), "@MATX{{2.0;0.0};{0.0;2.0}}");
    }

    #[test]
    fn test_help() {
        let engine = Matx::default();
        assert_eq!(engine.help("solve").unwrap().usage, "solve(A, B)");
        assert!(engine.help("eval").is_none());
        assert_eq!(engine.list_functions().len(), 3);
    }
}
