//! Linear system solver

use crate::helpers::{check_square, extract_matrix, from_dmatrix, to_dmatrix};
use matx_core::{MatxError, Value};
use matx_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

// ============================================================================
// SOLVE - Solve linear system AX = B
// ============================================================================

pub struct SolveFn;

static SOLVE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("A", "Matrix", "Coefficient matrix (square, non-singular)"),
    ArgMeta::required("B", "Matrix", "Right-hand side with as many rows as A"),
];
static SOLVE_EXAMPLES: [&str; 2] = [
    "solve(A, B) → [[2], [1]] for A = [[2, 1], [1, 3]], B = [[5], [5]]",
    "solve(I, B) → B",
];

impl FunctionPlugin for SolveFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "solve",
            description: "Solve the linear system AX = B for X",
            usage: "solve(A, B)",
            args: &SOLVE_ARGS,
            returns: "Matrix",
            examples: &SOLVE_EXAMPLES,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(MatxError::arg_count("solve", 2, args.len()));
        }

        let a = match extract_matrix(&args[0], "solve", "A") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "solve", "B") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(a, "solve") {
            return Value::Error(e);
        }
        if b.rows() != a.rows() {
            return Value::Error(MatxError::domain_error(format!(
                "solve: B must have {} rows, got {}",
                a.rows(),
                b.rows()
            )));
        }

        let lu = to_dmatrix(a).lu();
        if !lu.is_invertible() {
            return Value::Error(MatxError::domain_error("Singular matrix"));
        }

        match lu.solve(&to_dmatrix(b)) {
            Some(x) => from_dmatrix(&x).map(Value::Matrix).into(),
            None => Value::Error(MatxError::domain_error("Singular matrix")),
        }
    }
}
