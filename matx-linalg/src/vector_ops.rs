//! Vector operations

use crate::helpers::extract_matrix;
use matx_core::{Matrix, MatxError, Value};
use matx_plugin::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin};

// ============================================================================
// CROSS - Cross product of 3D vectors
// ============================================================================

pub struct CrossFn;

static CROSS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("a", "Matrix", "3D vector (1×3 or 3×1), or n×3 rows"),
    ArgMeta::required("b", "Matrix", "Same shape as a"),
];
static CROSS_EXAMPLES: [&str; 2] = [
    "cross(A, B) → [[0, 0, 1]] for A = [[1, 0, 0]], B = [[0, 1, 0]]",
    "cross(A, B) on two n×3 matrices crosses row by row",
];

impl FunctionPlugin for CrossFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cross",
            description: "Cross product of 3D vectors",
            usage: "cross(a, b)",
            args: &CROSS_ARGS,
            returns: "Matrix",
            examples: &CROSS_EXAMPLES,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 2 {
            return Value::Error(MatxError::arg_count("cross", 2, args.len()));
        }

        let a = match extract_matrix(&args[0], "cross", "a") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };
        let b = match extract_matrix(&args[1], "cross", "b") {
            Ok(m) => m,
            Err(e) => return Value::Error(e),
        };

        cross(a, b).map(Value::Matrix).into()
    }
}

fn cross3(u: &[f64], v: &[f64]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Cross product keeping the orientation of the inputs.
pub fn cross(a: &Matrix, b: &Matrix) -> Result<Matrix, MatxError> {
    if a.shape() != b.shape() {
        return Err(MatxError::domain_error(format!(
            "cross: shapes differ: {}×{} vs {}×{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }

    match a.shape() {
        // Column vector
        (3, 1) => Matrix::from_row_major(3, 1, cross3(a.as_slice(), b.as_slice()).to_vec()),
        // Row vector, or n row vectors stacked
        (rows, 3) => {
            let data: Vec<f64> = a
                .row_iter()
                .zip(b.row_iter())
                .flat_map(|(u, v)| cross3(u, v))
                .collect();
            Matrix::from_row_major(rows, 3, data)
        }
        _ => Err(MatxError::domain_error(format!(
            "cross: requires 3D vectors (1×3, 3×1 or n×3), got {}×{}",
            a.rows(),
            a.cols()
        ))),
    }
}
