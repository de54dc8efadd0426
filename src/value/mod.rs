// SPDX-License-Identifier: MIT

//! Runtime value model
//!
//! A [`Value`] is one of a closed set of variants. Comparison predicates are
//! only defined between two values of the same concrete variant; anything
//! else answers "not equal", "not less" and "no match" without failing.
//! [`Value::Absent`] propagates incomparability through evaluation.

mod cast;
mod types;

pub use cast::{format_general, format_timestamp, parse_timestamp, TIMESTAMP_LAYOUT};
pub use types::Type;

use chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;

use crate::config::EvalOptions;
use crate::env::Environment;

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No such value, or incomparable
    Absent,
    Number(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Deferred reference, resolved against an [`Environment`]
    Variable(Variable),
}

/// A named reference with an optional declared target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    dtype: Type,
}

impl Variable {
    /// Create a variable that resolves to its bound value's natural type
    pub fn new(name: impl Into<String>) -> Self {
        Self::typed(name, Type::Default)
    }

    /// Create a variable whose resolved value is cast to `dtype`
    pub fn typed(name: impl Into<String>, dtype: Type) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }

    /// Name looked up in the environment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type from the `:type` suffix, `Default` when there was none
    pub fn declared_type(&self) -> Type {
        self.dtype
    }

    /// Resolve against `env`, applying the declared cast if one was requested.
    /// The variable itself is never modified.
    pub fn resolve<'a>(&self, env: &'a Environment, options: &EvalOptions) -> Cow<'a, Value> {
        let value = env.lookup(&self.name);
        match self.dtype {
            Type::Default => Cow::Borrowed(value),
            dtype => Cow::Owned(value.cast_with(dtype, options)),
        }
    }
}

impl Value {
    /// Shorthand for `Value::Text`
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Untyped variable reference
    pub fn variable(name: impl Into<String>) -> Self {
        Value::Variable(Variable::new(name))
    }

    /// Variant tag. For a variable this is its declared type.
    pub fn value_type(&self) -> Type {
        match self {
            Value::Absent => Type::Null,
            Value::Number(_) => Type::Number,
            Value::Text(_) => Type::Varchar,
            Value::Timestamp(_) => Type::Datetime,
            Value::Variable(var) => var.dtype,
        }
    }

    /// True when both values are the same concrete variant
    pub fn is_comparable(&self, other: &Value) -> bool {
        matches!(
            (self, other),
            (Value::Number(_), Value::Number(_))
                | (Value::Text(_), Value::Text(_))
                | (Value::Timestamp(_), Value::Timestamp(_))
        )
    }

    /// Same variant and same payload. Absent never equals anything.
    pub fn equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }

    /// Strict ordering: numeric, lexicographic or chronological
    pub fn less(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a < b,
            (Value::Text(a), Value::Text(b)) => a < b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a < b,
            _ => false,
        }
    }

    /// Fuzzy match. Numbers match when `floor(self) == other`, text when
    /// `other` is a substring of `self`. Timestamps never match.
    pub fn almost(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.floor() == *b,
            (Value::Text(a), Value::Text(b)) => a.contains(b.as_str()),
            _ => false,
        }
    }

    /// Prefix test for text; greater-or-equal for numbers and timestamps
    pub fn starts_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.starts_with(b.as_str()),
            (Value::Number(_), Value::Number(_)) | (Value::Timestamp(_), Value::Timestamp(_)) => {
                self.equal(other) || !self.less(other)
            }
            _ => false,
        }
    }

    /// Suffix test for text; less-or-equal for numbers and timestamps
    pub fn ends_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.ends_with(b.as_str()),
            (Value::Number(_), Value::Number(_)) | (Value::Timestamp(_), Value::Timestamp(_)) => {
                self.equal(other) || self.less(other)
            }
            _ => false,
        }
    }

    /// Resolve against `env`. Concrete values resolve to themselves.
    pub fn lookup<'a>(&'a self, env: &'a Environment) -> Cow<'a, Value> {
        self.lookup_with(env, &EvalOptions::default())
    }

    /// Like [`Value::lookup`], with explicit options for declared casts
    pub fn lookup_with<'a>(
        &'a self,
        env: &'a Environment,
        options: &EvalOptions,
    ) -> Cow<'a, Value> {
        match self {
            Value::Variable(var) => var.resolve(env, options),
            _ => Cow::Borrowed(self),
        }
    }

    /// Convert to `target`. Unsupported conversions, and anything involving
    /// `Absent` or an unresolved variable, yield `Absent`.
    pub fn cast(&self, target: Type) -> Value {
        self.cast_with(target, &EvalOptions::default())
    }

    /// Like [`Value::cast`], with explicit options
    pub fn cast_with(&self, target: Type, options: &EvalOptions) -> Value {
        cast::cast(self, target, options)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Absent => write!(f, "invalid"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Variable(var) => write!(f, "{}", var.name),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}
