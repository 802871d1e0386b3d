#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::test_support::registry;
use fml_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn engine() -> Engine {
    Engine::builder().registry(registry()).build()
}

// === Statements ===

#[test]
fn one_result_per_statement() {
    let engine = engine();
    let mut bindings = Bindings::new().with("x", 2_i64);
    let results = engine
        .evaluate("site", "x += 5;; x * 2 ;  ", &mut bindings)
        .unwrap();
    assert_eq!(results, vec![Value::Int(7), Value::Int(14)]);
    assert_eq!(bindings.value("x"), Some(Value::Int(7)));
}

#[test]
fn soft_failures_yield_null_and_a_diagnostic() {
    let engine = engine();
    let mut bindings = Bindings::new().with("x", 1_i64);
    let evaluation = engine
        .evaluate_detailed("site", "x + ; nope + 1; x.Foo; 1 ? 2 : 3; x + 1", &mut bindings)
        .unwrap();
    assert_eq!(
        evaluation.results,
        vec![Value::Null, Value::Null, Value::Null, Value::Null, Value::Int(2)]
    );
    let codes: Vec<ErrorCode> = evaluation.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E1002, ErrorCode::E2001, ErrorCode::E2003, ErrorCode::E3001]
    );
    assert!(evaluation.diagnostics[2]
        .notes
        .contains(&"in statement `x.Foo`".to_string()));
    assert!(!evaluation.is_clean());
}

#[test]
fn runtime_errors_abort_the_call() {
    let engine = engine();
    let mut bindings = Bindings::new().with("x", 1_i64);
    let err = engine
        .evaluate("site", "x = 5; x / 0; x = 9", &mut bindings)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6001);
    assert_eq!(err.statement.as_deref(), Some("x / 0"));
    assert_eq!(bindings.value("x"), Some(Value::Int(5)));
}

// === Caching ===

#[test]
fn compile_is_cached_per_site_and_signature() {
    let engine = engine();
    let ints = Bindings::new().with("x", 1_i64);
    let floats = Bindings::new().with("x", 1.0);

    let first = engine.compile("site", "x", &ints);
    assert!(Arc::ptr_eq(&first, &engine.compile("site", "x", &ints)));
    assert!(!Arc::ptr_eq(&first, &engine.compile("other", "x", &ints)));
    assert!(!Arc::ptr_eq(&first, &engine.compile("site", "x", &floats)));
    assert_eq!(engine.cache_stats().entries, 3);

    engine.clear_cache();
    assert_eq!(engine.cache_stats().entries, 0);
    assert!(!Arc::ptr_eq(&first, &engine.compile("site", "x", &ints)));
}

#[test]
fn cache_can_be_disabled() {
    let engine = Engine::builder()
        .config(EngineConfig {
            cache_enabled: false,
            ..EngineConfig::default()
        })
        .build();
    let bindings = Bindings::new();
    let first = engine.compile("site", "1", &bindings);
    assert!(!Arc::ptr_eq(&first, &engine.compile("site", "1", &bindings)));
    assert_eq!(engine.cache_stats(), CacheStats::default());
}

#[test]
fn hop_limit_comes_from_the_config() {
    let engine = Engine::builder()
        .config(EngineConfig {
            max_chain_hops: 2,
            ..EngineConfig::default()
        })
        .build();
    let mut bindings = Bindings::new().with("s", "a");
    let evaluation = engine
        .evaluate_detailed("site", "s.Trim().Trim(); s.Trim().Trim().Trim()", &mut bindings)
        .unwrap();
    assert_eq!(evaluation.results, vec![Value::string("a"), Value::Null]);
    assert_eq!(evaluation.diagnostics[0].code, ErrorCode::E1004);
}

// === Guards and loops ===

#[test]
fn check_passes_only_on_true() {
    let engine = engine();
    let mut bindings = Bindings::new().with("hp", 10_i64);
    engine.check("site", "hp > 0; hp < 100", &mut bindings).unwrap();

    let err = engine.check("site", "hp > 0; hp > 50", &mut bindings).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6008);
    assert_eq!(err.statement.as_deref(), Some("hp > 50"));

    // A soft failure yields null, which is not true.
    let err = engine.check("site", "missing", &mut bindings).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6008);
}

#[test]
fn run_while_counts_iterations() {
    let engine = engine();
    let mut bindings = Bindings::new().with("i", 0_i64).with("sum", 0_i64);
    let iterations = engine
        .run_while("loop", "i < 10", "sum += i; i += 1", &mut bindings)
        .unwrap();
    assert_eq!(iterations, 10);
    assert_eq!(bindings.value("sum"), Some(Value::Int(45)));
}

#[test]
fn run_while_stops_at_the_iteration_limit() {
    let engine = engine();
    let mut bindings = Bindings::new().with("i", 0_i64);
    let err = engine
        .run_while("loop", "true", "i += 1", &mut bindings)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6007);
    assert_eq!(bindings.value("i"), Some(Value::Int(1000)));
}

#[test]
fn run_while_needs_a_bool_condition() {
    let engine = engine();
    let mut bindings = Bindings::new();
    let err = engine.run_while("loop", "1", "2", &mut bindings).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}
