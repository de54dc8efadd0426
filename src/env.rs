// SPDX-License-Identifier: MIT

//! Variable bindings that predicates are evaluated against

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value as Json;
use std::collections::HashMap;

use crate::value::Value;

static ABSENT: Value = Value::Absent;

/// Name to value mapping, populated through typed setters
///
/// Lookups never fail: an unbound name resolves to [`Value::Absent`]. There is
/// no internal locking, so concurrent evaluation needs either a shared
/// reference with no writers or one environment per caller.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    fields: HashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from a JSON object. Strings become Text and
    /// numbers become Number; other members are skipped.
    pub fn from_json(json: &Json) -> Self {
        let mut env = Self::new();
        let Some(object) = json.as_object() else {
            log::debug!("ignoring non-object environment source");
            return env;
        };
        for (name, value) in object {
            match value {
                Json::String(s) => env.set_text(name.as_str(), s.as_str()),
                Json::Number(n) => match n.as_f64() {
                    Some(n) => env.set_number(name.as_str(), n),
                    None => log::debug!("skipping unrepresentable number '{}'", name),
                },
                _ => log::debug!("skipping non-scalar member '{}'", name),
            }
        }
        env
    }

    /// Bind `name` to a Text value, replacing any prior binding
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), Value::Text(value.into()));
    }

    /// Bind `name` to a Number value, replacing any prior binding
    pub fn set_number(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), Value::Number(value));
    }

    /// Bind `name` to a Timestamp value, replacing any prior binding
    pub fn set_timestamp<Tz: TimeZone>(&mut self, name: impl Into<String>, value: DateTime<Tz>) {
        self.fields
            .insert(name.into(), Value::Timestamp(value.with_timezone(&Utc)));
    }

    /// Get a bound value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a bound value, or `Absent` when unbound
    pub fn lookup(&self, name: &str) -> &Value {
        self.fields.get(name).unwrap_or(&ABSENT)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when nothing is bound
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
