// SPDX-License-Identifier: MIT

//! Typed error handling for predicate-rs
//!
//! Parse-time failures are surfaced as [`ExprError`]. Value-level problems
//! (failed casts, mismatched types, unbound variables) are not errors: they
//! resolve to [`Value::Absent`](crate::Value::Absent) and compare false.

use thiserror::Error;

/// Errors produced while compiling a predicate or building AST nodes
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExprError {
    /// Trailing or unparsable tokens
    #[error("malformed input string: {0}")]
    Malformed(String),

    /// Unrecognized symbol where a comparison operator is required
    #[error("unsupported comparison operator: {0}")]
    UnsupportedOperator(String),

    /// A required operand is missing
    #[error("not a value: {0}")]
    NotFound(String),

    /// Operator symbol outside the closed operator set
    #[error("invalid operator: {0}")]
    InvalidOperator(String),
}

/// Errors raised while loading [`EvalOptions`](crate::EvalOptions)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Unknown options file format
    #[error("Unsupported options file: {0}")]
    UnsupportedFormat(String),
}

impl ExprError {
    /// Create a malformed input error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Create an unsupported operator error
    pub fn unsupported_operator(symbol: impl Into<String>) -> Self {
        Self::UnsupportedOperator(symbol.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an invalid operator error
    pub fn invalid_operator(symbol: impl Into<String>) -> Self {
        Self::InvalidOperator(symbol.into())
    }
}

/// Result alias for predicate compilation
pub type Result<T> = std::result::Result<T, ExprError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExprError::malformed("x").to_string(),
            "malformed input string: x"
        );
        assert_eq!(
            ExprError::unsupported_operator("=").to_string(),
            "unsupported comparison operator: ="
        );
        assert_eq!(ExprError::not_found("rhs").to_string(), "not a value: rhs");
        assert_eq!(
            ExprError::invalid_operator("??").to_string(),
            "invalid operator: ??"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
