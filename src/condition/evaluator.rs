// SPDX-License-Identifier: MIT

//! Predicate evaluator

use super::ast::{CompareOp, Expr, LogicalOp};
use crate::config::EvalOptions;
use crate::env::Environment;
use crate::value::Value;

/// Evaluate a predicate against an environment
///
/// Evaluation never fails: unbound variables, failed casts and mismatched
/// types all make the affected comparison false.
pub fn evaluate(expr: &Expr, env: &Environment, options: &EvalOptions) -> bool {
    match expr {
        Expr::Literal(value) => *value,
        Expr::Binary { left, op, right } => {
            let x = left.lookup_with(env, options);
            let y = right.lookup_with(env, options);
            let verdict = compare(&x, *op, &y);
            log::trace!("{} {} {} => {}", x, op, y, verdict);
            verdict
        }
        Expr::Logical { left, op, right } => match op {
            LogicalOp::And => evaluate(left, env, options) && evaluate(right, env, options),
            LogicalOp::Or => evaluate(left, env, options) || evaluate(right, env, options),
        },
    }
}

/// Apply a comparison operator to two resolved values.
///
/// Ordering operators need operands of the same variant; across variants
/// they are false, like every other comparison.
pub fn compare(x: &Value, op: CompareOp, y: &Value) -> bool {
    let ordered = x.is_comparable(y);
    match op {
        CompareOp::Eq => x.equal(y),
        CompareOp::NotEq => !x.equal(y),
        CompareOp::Lt => ordered && !x.equal(y) && x.less(y),
        CompareOp::Lte => ordered && (x.equal(y) || x.less(y)),
        CompareOp::Gt => ordered && !x.equal(y) && !x.less(y),
        CompareOp::Gte => ordered && (x.equal(y) || !x.less(y)),
        CompareOp::Almost => x.almost(y),
        CompareOp::StartsWith => x.starts_with(y),
        CompareOp::EndsWith => x.ends_with(y),
    }
}

impl Expr {
    /// Evaluate with default options
    pub fn compare(&self, env: &Environment) -> bool {
        evaluate(self, env, &EvalOptions::default())
    }

    /// Evaluate with explicit options
    pub fn compare_with(&self, env: &Environment, options: &EvalOptions) -> bool {
        evaluate(self, env, options)
    }
}
