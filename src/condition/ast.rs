// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for predicate expressions

use std::str::FromStr;

use crate::error::ExprError;
use crate::value::Value;

/// A compiled predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Fixed outcome; produced for empty source
    Literal(bool),
    /// Comparison: left op right
    Binary {
        left: Value,
        op: CompareOp,
        right: Value,
    },
    /// Two sub-expressions joined by a connective
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// ==
    Eq,
    /// !=
    NotEq,
    /// >
    Gt,
    /// >=
    Gte,
    /// <
    Lt,
    /// <=
    Lte,
    /// ~=
    Almost,
    /// ^=
    StartsWith,
    /// $=
    EndsWith,
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// &&
    And,
    /// ||
    Or,
}

impl Expr {
    /// Build a comparison node
    pub fn binary(left: impl Into<Value>, op: CompareOp, right: impl Into<Value>) -> Self {
        Expr::Binary {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Join two expressions with a connective
    pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Self {
        Expr::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

impl CompareOp {
    /// Source form of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Almost => "~=",
            CompareOp::StartsWith => "^=",
            CompareOp::EndsWith => "$=",
        }
    }
}

impl LogicalOp {
    /// Source form of the connective
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

impl FromStr for CompareOp {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(CompareOp::Eq),
            "!=" => Ok(CompareOp::NotEq),
            ">" => Ok(CompareOp::Gt),
            ">=" => Ok(CompareOp::Gte),
            "<" => Ok(CompareOp::Lt),
            "<=" => Ok(CompareOp::Lte),
            "~=" => Ok(CompareOp::Almost),
            "^=" => Ok(CompareOp::StartsWith),
            "$=" => Ok(CompareOp::EndsWith),
            other => Err(ExprError::invalid_operator(other)),
        }
    }
}

impl FromStr for LogicalOp {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "&&" => Ok(LogicalOp::And),
            "||" => Ok(LogicalOp::Or),
            other => Err(ExprError::invalid_operator(other)),
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Binary { left, op, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Logical { left, op, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}
