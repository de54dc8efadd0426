// SPDX-License-Identifier: MIT

//! Type tags and declared-type keywords

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value type tag
///
/// `Null`, `Varchar`, `Number` and `Datetime` describe concrete values. The
/// remaining tags only appear as the declared type of a variable (`name:type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Null,
    /// Use the resolved value's natural type
    Default,
    Varchar,
    Number,
    Integer,
    Real,
    Datetime,
}

static KEYWORDS: Lazy<HashMap<&'static str, Type>> = Lazy::new(|| {
    HashMap::from([
        ("varchar", Type::Varchar),
        ("string", Type::Varchar),
        ("real", Type::Number),
        ("number", Type::Number),
        ("integer", Type::Integer),
        ("int", Type::Integer),
        ("datetime", Type::Datetime),
        ("moment", Type::Datetime),
    ])
});

impl Type {
    /// Map a cast suffix keyword to its type. Matching is case-sensitive and
    /// unknown names fall back to `Varchar`.
    pub fn from_keyword(name: &str) -> Type {
        KEYWORDS.get(name).copied().unwrap_or(Type::Varchar)
    }

    /// Position of the tag in declaration order
    pub fn ordinal(self) -> u8 {
        match self {
            Type::Null => 0,
            Type::Default => 1,
            Type::Varchar => 2,
            Type::Number => 3,
            Type::Integer => 4,
            Type::Real => 5,
            Type::Datetime => 6,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Null => "null",
            Type::Default => "default",
            Type::Varchar => "varchar",
            Type::Number => "number",
            Type::Integer => "integer",
            Type::Real => "real",
            Type::Datetime => "datetime",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(Type::from_keyword("varchar"), Type::Varchar);
        assert_eq!(Type::from_keyword("string"), Type::Varchar);
        assert_eq!(Type::from_keyword("real"), Type::Number);
        assert_eq!(Type::from_keyword("number"), Type::Number);
        assert_eq!(Type::from_keyword("integer"), Type::Integer);
        assert_eq!(Type::from_keyword("datetime"), Type::Datetime);
        assert_eq!(Type::from_keyword("moment"), Type::Datetime);
    }

    #[test]
    fn test_unknown_keyword_falls_back_to_varchar() {
        assert_eq!(Type::from_keyword("blob"), Type::Varchar);
        // case-sensitive
        assert_eq!(Type::from_keyword("Number"), Type::Varchar);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(Type::Null.ordinal(), 0);
        assert_eq!(Type::Varchar.ordinal(), 2);
        assert_eq!(Type::Datetime.ordinal(), 6);
    }
}
