// SPDX-License-Identifier: MIT

//! Casting between value variants

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use super::{Type, Value};
use crate::config::{EvalOptions, NumberText};

/// Offset-naive layout used by explicit Text <-> Timestamp casts.
/// The fractional part is optional when parsing.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";

const SIGNIFICANT_DIGITS: usize = 6;

pub(super) fn cast(value: &Value, target: Type, options: &EvalOptions) -> Value {
    match value {
        Value::Absent | Value::Variable(_) => Value::Absent,
        Value::Number(n) => cast_number(*n, target, options),
        Value::Text(s) => cast_text(s, target),
        Value::Timestamp(t) => cast_timestamp(t, target),
    }
}

fn cast_number(n: f64, target: Type, options: &EvalOptions) -> Value {
    match target {
        Type::Default | Type::Number | Type::Real => Value::Number(n),
        Type::Integer => Value::Number(n.trunc()),
        Type::Varchar => {
            let source = match options.number_text {
                NumberText::Value => n,
                NumberText::TypeOrdinal => f64::from(target.ordinal()),
            };
            Value::Text(format_general(source, SIGNIFICANT_DIGITS))
        }
        Type::Null | Type::Datetime => Value::Absent,
    }
}

fn cast_text(s: &str, target: Type) -> Value {
    match target {
        Type::Default | Type::Varchar => Value::Text(s.to_string()),
        Type::Number | Type::Real => match s.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => failed(s, target),
        },
        Type::Integer => match s.parse::<f64>() {
            Ok(n) => Value::Number(n.trunc()),
            Err(_) => failed(s, target),
        },
        Type::Datetime => match parse_timestamp(s) {
            Some(t) => Value::Timestamp(t),
            None => failed(s, target),
        },
        Type::Null => Value::Absent,
    }
}

fn cast_timestamp(t: &DateTime<Utc>, target: Type) -> Value {
    match target {
        Type::Default | Type::Datetime => Value::Timestamp(*t),
        Type::Varchar => Value::Text(format_timestamp(t)),
        Type::Number | Type::Integer | Type::Real => Value::Number(t.timestamp() as f64),
        Type::Null => Value::Absent,
    }
}

fn failed(s: &str, target: Type) -> Value {
    log::trace!("cast of {:?} to {} failed", s, target);
    Value::Absent
}

/// Parse `YYYY-MM-DD HH:MM:SS[.ffffff]` as a UTC instant
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_LAYOUT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format an instant as `YYYY-MM-DD HH:MM:SS[.ffffff]`, dropping trailing
/// zeros from the microseconds and the dot when there are none.
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    let mut out = t.format("%Y-%m-%d %H:%M:%S").to_string();
    let micros = t.nanosecond() % 1_000_000_000 / 1_000;
    if micros > 0 {
        let fraction = format!("{:06}", micros);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

/// Shortest-style `%g` formatting with `precision` significant digits:
/// scientific notation when the exponent is below -4 or at least
/// `precision`, fixed notation otherwise, trailing zeros removed.
pub fn format_general(v: f64, precision: usize) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return v.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, v)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
