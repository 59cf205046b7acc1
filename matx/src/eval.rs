//! Expression evaluator
//!
//! Walks the parsed tree against a read-only register store and the
//! function whitelist. Failures are `Value::Error` and propagate upward,
//! picking up a note at each operator they pass through.

use crate::ast::{BinOp, Expr, UnaryOp};
use matx_core::Value;
use matx_linalg::{elementwise, matmul, negate, Elementwise};
use matx_plugin::EvalContext;

pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn eval_expr(&self, expr: &Expr, ctx: &EvalContext) -> Value {
        match expr {
            Expr::Number(n) => Value::Number(*n),

            Expr::Register(name) => ctx.get_register(*name),

            Expr::BinaryOp(left, op, right) => {
                let l = self.eval_expr(left, ctx);
                let r = self.eval_expr(right, ctx);
                self.eval_binary_op(l, *op, r)
            }

            Expr::UnaryOp(op, inner) => {
                let v = self.eval_expr(inner, ctx);
                self.eval_unary_op(*op, v)
            }

            Expr::FunctionCall(name, args) => {
                let evaluated_args: Vec<Value> = args
                    .iter()
                    .map(|a| self.eval_expr(a, ctx))
                    .collect();

                // Unknown names report as such even when an argument failed
                if ctx.registry.contains(name) {
                    let failed = evaluated_args
                        .iter()
                        .enumerate()
                        .find_map(|(i, v)| v.as_error().map(|e| (i, e)));
                    if let Some((i, e)) = failed {
                        return Value::Error(
                            e.clone().with_note(format!("in argument {} of {}()", i + 1, name)),
                        );
                    }
                }

                ctx.call_function(name, &evaluated_args)
            }
        }
    }

    fn eval_binary_op(&self, left: Value, op: BinOp, right: Value) -> Value {
        // Propagate errors
        if let Value::Error(e) = &left {
            return Value::Error(e.clone().with_note("from left operand"));
        }
        if let Value::Error(e) = &right {
            return Value::Error(e.clone().with_note("from right operand"));
        }

        let result = match op {
            BinOp::Add => elementwise(Elementwise::Add, &left, &right),
            BinOp::Sub => elementwise(Elementwise::Sub, &left, &right),
            BinOp::Mul => elementwise(Elementwise::Mul, &left, &right),
            BinOp::Div => elementwise(Elementwise::Div, &left, &right),
            BinOp::MatMul => matmul(&left, &right),
        };
        result.into()
    }

    fn eval_unary_op(&self, op: UnaryOp, value: Value) -> Value {
        if let Value::Error(e) = &value {
            return Value::Error(e.clone());
        }

        match op {
            UnaryOp::Neg => negate(&value).into(),
            UnaryOp::Pos => value,
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
