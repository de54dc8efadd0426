// SPDX-License-Identifier: MIT

//! Recursive-descent parser
//!
//! ```text
//! Expr       := Comparison ( LogicalOp Expr )?
//! Comparison := Operand CompareOp Operand
//! Operand    := Identifier ( ':' TypeName )?  |  StringLiteral  |  NumberLiteral
//! ```
//!
//! Connectives chain by right recursion only: `a || b && c` is `a || (b && c)`.
//! There is no precedence between `&&` and `||` and no grouping syntax.

use super::ast::{CompareOp, Expr, LogicalOp};
use super::lexer::{tokenize, Token};
use crate::error::{ExprError, Result};
use crate::value::{Type, Value, Variable};

static EOF: Token = Token::Eof;

/// Compile predicate source into an expression tree.
/// Empty (or all-whitespace) source compiles to the always-true literal.
pub fn parse(source: &str) -> Result<Expr> {
    if source.trim().is_empty() {
        return Ok(Expr::Literal(true));
    }

    match compile(source) {
        Ok(expr) => {
            log::debug!("compiled predicate: {}", expr);
            Ok(expr)
        }
        Err(e) => {
            log::debug!("failed to compile predicate '{}': {}", source, e);
            Err(e)
        }
    }
}

fn compile(source: &str) -> Result<Expr> {
    let mut parser = Parser::new(tokenize(source)?);
    let expr = parser.expression()?;
    match parser.peek() {
        Token::Eof => Ok(expr),
        token => Err(ExprError::malformed(format!("unexpected trailing input: {}", token))),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<Expr> {
        let left = self.comparison()?;

        let op = match self.peek() {
            Token::Symbol(s) if s.starts_with('&') || s.starts_with('|') => {
                s.parse::<LogicalOp>().map_err(|_| {
                    ExprError::malformed(format!("expected logical operator, found {}", s))
                })?
            }
            _ => return Ok(left),
        };
        self.advance();

        let right = self.expression()?;
        Ok(Expr::logical(left, op, right))
    }

    fn comparison(&mut self) -> Result<Expr> {
        let left = self
            .operand()?
            .ok_or_else(|| ExprError::not_found(format!("left operand, found {}", self.peek())))?;

        let op = match self.advance() {
            Token::Symbol(s) => s
                .parse::<CompareOp>()
                .map_err(|_| ExprError::unsupported_operator(s))?,
            token => return Err(ExprError::unsupported_operator(token.to_string())),
        };

        let right = self
            .operand()?
            .ok_or_else(|| ExprError::not_found(format!("right operand, found {}", self.peek())))?;

        Ok(Expr::Binary { left, op, right })
    }

    /// Consume one operand, or nothing if the next token cannot start one
    fn operand(&mut self) -> Result<Option<Value>> {
        let value = match self.peek().clone() {
            Token::Ident(name) => {
                self.advance();
                if *self.peek() == Token::Colon {
                    self.advance();
                    match self.advance() {
                        Token::Ident(type_name) => {
                            Value::Variable(Variable::typed(name, Type::from_keyword(&type_name)))
                        }
                        token => {
                            return Err(ExprError::malformed(format!(
                                "expected type name after '{}:', found {}",
                                name, token
                            )))
                        }
                    }
                } else {
                    Value::Variable(Variable::new(name))
                }
            }
            Token::Text(s) => {
                self.advance();
                Value::Text(s)
            }
            Token::Timestamp(t) => {
                self.advance();
                Value::Timestamp(t)
            }
            Token::Number(n) => {
                self.advance();
                Value::Number(n)
            }
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}
