//! Matrix property functions

use crate::helpers::{check_square, extract_matrix, to_dmatrix};
use matx_core::{MatxError, Value};
use matx_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

// ============================================================================
// DET - Determinant of a square matrix
// ============================================================================

pub struct DetFn;

static DET_ARGS: [ArgMeta; 1] = [ArgMeta::required("M", "Matrix", "Square matrix")];
static DET_EXAMPLES: [&str; 2] = ["det(A) → -2.0 for A = [[1, 2], [3, 4]]", "det(I) → 1.0"];

impl FunctionPlugin for DetFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "det",
            description: "Determinant of a square matrix",
            usage: "det(M)",
            args: &DET_ARGS,
            returns: "Number",
            examples: &DET_EXAMPLES,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(MatxError::arg_count("det", 1, args.len()));
        }

        let matrix = match extract_matrix(&args[0], "det", "M") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        if let Err(e) = check_square(matrix, "det") {
            return Value::Error(e);
        }

        Value::Number(to_dmatrix(matrix).determinant())
    }
}
