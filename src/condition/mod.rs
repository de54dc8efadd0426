// SPDX-License-Identifier: MIT

//! Predicate compilation and evaluation
//!
//! Predicates are flat comparison chains like:
//! - `v0 == "world"`
//! - `n0 >= 1.0`
//! - `s0:integer >= 1 && name ^= "svc-"`

mod ast;
mod evaluator;
mod lexer;
mod parser;

pub use ast::{CompareOp, Expr, LogicalOp};
pub use evaluator::{compare, evaluate};
pub use lexer::{tokenize, Token};
pub use parser::parse;
