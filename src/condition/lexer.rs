// SPDX-License-Identifier: MIT

//! Scanner for predicate source text

use chrono::{DateTime, Utc};

use crate::error::{ExprError, Result};

/// A scanned token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    /// Double-quoted literal that is not an RFC 3339 timestamp
    Text(String),
    /// Double-quoted literal holding an RFC 3339 timestamp
    Timestamp(DateTime<Utc>),
    Number(f64),
    /// `:` introducing a cast suffix
    Colon,
    /// Operator or any other punctuation
    Symbol(String),
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Text(s) => write!(f, "\"{}\"", s),
            Token::Timestamp(t) => write!(f, "\"{}\"", t.to_rfc3339()),
            Token::Number(n) => write!(f, "{}", n),
            Token::Colon => write!(f, ":"),
            Token::Symbol(s) => write!(f, "{}", s),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Scan `source` into tokens, terminated by [`Token::Eof`]
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn next_token(&mut self) -> Result<Token> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        if c.is_alphabetic() || c == '_' {
            return Ok(self.ident());
        }
        if self.at_number() {
            return Ok(self.number());
        }
        if c == '"' {
            return self.string();
        }

        self.pos += 1;
        let token = match c {
            ':' if self.at_cast_suffix() => Token::Colon,
            '=' | '!' | '>' | '<' | '~' | '^' | '$' if self.peek() == Some('=') => {
                self.pos += 1;
                Token::Symbol(format!("{}=", c))
            }
            '&' | '|' if self.peek() == Some(c) => {
                self.pos += 1;
                Token::Symbol(format!("{}{}", c, c))
            }
            other => Token::Symbol(other.to_string()),
        };
        Ok(token)
    }

    fn at_number(&self) -> bool {
        let digit_at = |offset| self.peek_at(offset).is_some_and(|c| c.is_ascii_digit());
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => digit_at(1),
            Some('-') => digit_at(1) || (self.peek_at(1) == Some('.') && digit_at(2)),
            _ => false,
        }
    }

    fn ident(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        Token::Ident(self.chars[start..self.pos].iter().collect())
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        self.digits();
        if self.peek() == Some('.') {
            self.pos += 1;
            self.digits();
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+') | Some('-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.digits();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Token::Number(text.parse().unwrap_or(0.0))
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn string(&mut self) -> Result<Token> {
        self.pos += 1;
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(ExprError::malformed("unterminated string literal")),
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some(escaped @ ('"' | '\\')) => text.push(escaped),
                    Some(other) => {
                        text.push('\\');
                        text.push(other);
                    }
                    None => return Err(ExprError::malformed("unterminated string literal")),
                },
                Some(c) => text.push(c),
            }
        }

        match parse_rfc3339_strict(&text) {
            Some(t) => Ok(Token::Timestamp(t)),
            None => Ok(Token::Text(text)),
        }
    }

    /// A `:` just consumed is a cast suffix only when it sits directly
    /// between an identifier and a type name, with no whitespace.
    fn at_cast_suffix(&self) -> bool {
        let before = self.pos.checked_sub(2).and_then(|i| self.chars.get(i));
        before.is_some_and(|c| c.is_alphanumeric() || *c == '_')
            && self.peek().is_some_and(|c| c.is_alphabetic() || c == '_')
    }
}

/// Parse `YYYY-MM-DDTHH:MM:SS[.fff](Z|+HH:MM|-HH:MM)`. The separator must be an
/// uppercase `T` and the zone an uppercase `Z` or a numeric offset.
fn parse_rfc3339_strict(text: &str) -> Option<DateTime<Utc>> {
    let bytes = text.as_bytes();
    if bytes.get(10) != Some(&b'T') {
        return None;
    }
    let zone_ok = match bytes.last() {
        Some(b'Z') => true,
        _ => {
            let zone = bytes.len().checked_sub(6).map(|i| &bytes[i..])?;
            matches!(zone[0], b'+' | b'-')
                && zone[1].is_ascii_digit()
                && zone[2].is_ascii_digit()
                && zone[3] == b':'
                && zone[4].is_ascii_digit()
                && zone[5].is_ascii_digit()
        }
    };
    if !zone_ok {
        return None;
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
