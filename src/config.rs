// SPDX-License-Identifier: MIT

//! Evaluation options
//!
//! Options are plain serde types so hosts can keep them next to the rest of
//! their configuration, in YAML or JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// How a Number is rendered when cast to Text
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NumberText {
    /// Format the number itself with 6 significant digits
    #[default]
    Value,
    /// Format the ordinal of the target type tag instead of the number.
    /// Kept for compatibility with rule sets written against the legacy engine.
    TypeOrdinal,
}

/// Options applied while resolving and casting values during evaluation
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EvalOptions {
    /// Number to Text cast behaviour
    #[serde(default)]
    pub number_text: NumberText,
}

impl EvalOptions {
    /// Options reproducing the legacy Number to Text cast
    pub fn legacy() -> Self {
        Self {
            number_text: NumberText::TypeOrdinal,
        }
    }

    /// Parse options from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse options from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load options from a `.yaml`, `.yml` or `.json` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats_value() {
        assert_eq!(EvalOptions::default().number_text, NumberText::Value);
    }

    #[test]
    fn test_from_yaml() {
        let opts = EvalOptions::from_yaml("number_text: type_ordinal").unwrap();
        assert_eq!(opts, EvalOptions::legacy());

        let opts = EvalOptions::from_yaml("{}").unwrap();
        assert_eq!(opts, EvalOptions::default());
    }

    #[test]
    fn test_from_json() {
        let opts = EvalOptions::from_json(r#"{"number_text": "value"}"#).unwrap();
        assert_eq!(opts.number_text, NumberText::Value);
    }

    #[test]
    fn test_invalid_variant_returns_error() {
        let result = EvalOptions::from_yaml("number_text: sometimes");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let name = format!("predicate-rs-options-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "number_text = 'value'").unwrap();
        let result = EvalOptions::load(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_yaml_file() {
        let name = format!("predicate-rs-options-{}.yaml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "number_text: type_ordinal\n").unwrap();
        let opts = EvalOptions::load(&path).unwrap();
        assert_eq!(opts.number_text, NumberText::TypeOrdinal);
        let _ = fs::remove_file(&path);
    }
}
