//! Integration tests for predicate compilation and evaluation
//!
//! These tests drive the public API end to end: compile once, evaluate against
//! one or more environments.

use chrono::{TimeZone, Utc};
use predicate_rs::{parse, EvalOptions, Environment, ExprError, NumberText};
use serde_json::json;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_env() -> Environment {
    let mut env = Environment::new();
    env.set_text("v0", "world");
    env.set_number("n0", 1.0);
    env
}

// ============================================================================
// Compilation
// ============================================================================

#[test]
fn test_empty_source_is_always_true() -> anyhow::Result<()> {
    init_logging();
    let expr = parse("")?;
    assert!(expr.compare(&Environment::new()));
    assert!(expr.compare(&sample_env()));
    Ok(())
}

#[test]
fn test_error_kinds_are_distinct() {
    init_logging();
    assert!(matches!(
        parse("v0 ?= 1"),
        Err(ExprError::UnsupportedOperator(_))
    ));
    assert!(matches!(parse("v0 =="), Err(ExprError::NotFound(_))));
    assert!(matches!(parse("v0 == 1 1"), Err(ExprError::Malformed(_))));
}

#[test]
fn test_display_uses_operator_symbols() -> anyhow::Result<()> {
    let expr = parse(r#"v0 == "world" && n0 >= 1.0"#)?;
    assert_eq!(expr.to_string(), "v0 == world && n0 >= 1");
    Ok(())
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn test_reference_predicates() -> anyhow::Result<()> {
    init_logging();
    let env = sample_env();

    assert!(parse(r#"v0 == "world" && n0 >= 1.0"#)?.compare(&env));
    assert!(parse(r#"v0 != "world" || n0 == 1.0"#)?.compare(&env));
    assert!(!parse("v0 >= 1.0")?.compare(&env));
    Ok(())
}

#[test]
fn test_declared_type_cast() -> anyhow::Result<()> {
    let mut env = Environment::new();
    env.set_text("s0", "1.0");
    assert!(parse("s0:integer >= 1.0")?.compare(&env));
    Ok(())
}

#[test]
fn test_unbound_variable_is_false() -> anyhow::Result<()> {
    assert!(!parse("missing == 1.0")?.compare(&Environment::new()));
    Ok(())
}

#[test]
fn test_reevaluate_against_changing_environments() -> anyhow::Result<()> {
    let expr = parse("load < 0.75 && region ^= \"eu-\"")?;

    let mut env = Environment::new();
    env.set_text("region", "eu-west-1");
    env.set_number("load", 0.5);
    assert!(expr.compare(&env));

    env.set_number("load", 0.9);
    assert!(!expr.compare(&env));

    env.set_number("load", 0.1);
    env.set_text("region", "us-east-1");
    assert!(!expr.compare(&env));
    Ok(())
}

#[test]
fn test_timestamp_literal_and_cast() -> anyhow::Result<()> {
    let mut env = Environment::new();
    env.set_timestamp("created", Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    env.set_text("updated", "2024-06-02 08:30:00.5");

    assert!(parse(r#"created > "2024-01-01T00:00:00Z""#)?.compare(&env));
    assert!(parse(r#"created == "2024-06-01T14:00:00+02:00""#)?.compare(&env));
    assert!(parse(r#"updated:datetime > "2024-06-02T08:30:00Z""#)?.compare(&env));
    assert!(parse(r#"updated:moment < "2024-06-02T08:30:01Z""#)?.compare(&env));

    // without the cast the value stays text and is incomparable with a timestamp
    assert!(!parse(r#"updated > "2024-06-02T08:30:00Z""#)?.compare(&env));
    Ok(())
}

#[test]
fn test_environment_from_json() -> anyhow::Result<()> {
    let env = Environment::from_json(&json!({"intent": "search", "confidence": 0.85}));
    assert!(parse(r#"intent == "search" && confidence > 0.8"#)?.compare(&env));
    Ok(())
}

#[test]
fn test_options_from_yaml() -> anyhow::Result<()> {
    let options = EvalOptions::from_yaml("number_text: type_ordinal")?;
    assert_eq!(options.number_text, NumberText::TypeOrdinal);

    let mut env = Environment::new();
    env.set_number("n0", 7.0);
    let expr = parse(r#"n0:string == "7""#)?;
    assert!(expr.compare(&env));
    assert!(!expr.compare_with(&env, &options));
    Ok(())
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_expression_across_threads() -> anyhow::Result<()> {
    let expr = Arc::new(parse("s0:number >= 10 && name $= \"-prod\"")?);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let expr = Arc::clone(&expr);
            std::thread::spawn(move || {
                let mut env = Environment::new();
                env.set_text("s0", (i * 5).to_string());
                env.set_text("name", if i % 2 == 0 { "api-prod" } else { "api-dev" });
                (i, expr.compare(&env))
            })
        })
        .collect();

    for handle in handles {
        let (i, verdict) = handle.join().expect("worker panicked");
        assert_eq!(verdict, i * 5 >= 10 && i % 2 == 0, "worker {}", i);
    }
    Ok(())
}
