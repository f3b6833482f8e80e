//! Shared helpers for the integration suite.
//!
//! These mirror a subset of `fuzzlang::test_util` without requiring the
//! `test-support` feature, so the integration tests compile against the
//! published library surface.

#![expect(
    dead_code,
    reason = "each integration test pulls in the subset of helpers it needs"
)]

use fuzzlang::{MacroDef, Symbol, SymbolTable, Value, parse_macro_body};

/// Build a table seeded with the constant pool plus scalar variables.
///
/// # Panics
/// Panics when a name collides with an existing binding.
#[track_caller]
pub fn table_with(bindings: &[(&str, f64)]) -> SymbolTable {
    let mut table = SymbolTable::with_constants();
    for (name, degree) in bindings {
        table
            .define(*name, Symbol::Variable(Value::Scalar(*degree)))
            .unwrap_or_else(|e| panic!("binding {name:?} failed: {e}"));
    }
    table
}

/// Parse `body` against `params` and install the macro under `name`.
///
/// # Panics
/// Panics when the body fails to parse or the name is taken.
#[track_caller]
pub fn define_macro(table: &mut SymbolTable, name: &str, params: &[&str], body: &str) {
    let tree = parse_macro_body(body, params, table)
        .unwrap_or_else(|e| panic!("macro body {body:?} failed to parse: {e}"));
    let params = params.iter().map(|p| (*p).to_string()).collect();
    table
        .define(name, Symbol::Macro(MacroDef { params, body: tree }))
        .unwrap_or_else(|e| panic!("macro {name:?} failed to install: {e}"));
}

/// Unwrap a scalar result.
///
/// # Panics
/// Panics when the value is a vector.
#[track_caller]
pub fn scalar(value: &Value) -> f64 {
    value
        .as_scalar()
        .unwrap_or_else(|| panic!("expected a scalar, got {value:?}"))
}

/// Assert two degrees are equal within floating-point tolerance.
///
/// # Panics
/// Panics when the values differ by 1e-9 or more.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
