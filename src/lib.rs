// SPDX-License-Identifier: MIT

//! Embeddable predicate language
//!
//! Compile a comparison expression once with [`parse`], then evaluate it any
//! number of times against an [`Environment`]:
//!
//! ```
//! use predicate_rs::{parse, Environment};
//!
//! let expr = parse(r#"v0 == "world" && n0 >= 1.0"#).unwrap();
//!
//! let mut env = Environment::new();
//! env.set_text("v0", "world");
//! env.set_number("n0", 1.0);
//! assert!(expr.compare(&env));
//! ```
//!
//! `&&` and `||` have no relative precedence and there are no parentheses:
//! connectives nest to the right, so `a || b && c` means `a || (b && c)`.
//! This is deliberate.

pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod value;

pub use condition::{parse, CompareOp, Expr, LogicalOp};
pub use config::{EvalOptions, NumberText};
pub use env::Environment;
pub use error::{ConfigError, ExprError, Result};
pub use value::{Type, Value, Variable};
