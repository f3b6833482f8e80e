//! Helpers for constructing expression nodes and symbol tables in tests.
//!
//! These functions reduce boilerplate when asserting over [`Expr`] trees
//! and when a test needs a table populated with macros or bindings.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::parser::parse_macro_body;
use crate::quantifier::QuantifierKind;
use crate::symbols::{MacroDef, Symbol, SymbolTable};

/// Construct a numeric [`Expr::Literal`].
#[must_use]
pub fn num(n: f64) -> Expr {
    Expr::Literal(n)
}

/// Construct an [`Expr::Variable`].
#[must_use]
pub fn var(name: &str) -> Expr {
    Expr::Variable(name.to_string())
}

/// Construct a unary application.
#[must_use]
pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

/// Construct a binary application.
#[must_use]
pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Construct an unexpanded [`Expr::MacroCall`].
#[must_use]
pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::MacroCall {
        name: name.to_string(),
        args,
    }
}

/// Construct an [`Expr::List`] literal.
#[must_use]
pub fn list(items: Vec<Expr>) -> Expr {
    Expr::List(items)
}

/// Construct a quantified predicate.
#[must_use]
pub fn quant(kind: QuantifierKind, var: &str, domain: Expr, predicate: Expr) -> Expr {
    Expr::Quantifier {
        kind,
        var: var.to_string(),
        domain: Box::new(domain),
        predicate: Box::new(predicate),
    }
}

/// Parse `body` with `params` in scope and define it as a macro.
///
/// # Panics
/// Panics if the body does not parse or the name is already defined.
#[track_caller]
pub fn define_macro(table: &mut SymbolTable, name: &str, params: &[&str], body: &str) {
    let body = parse_macro_body(body, params, table)
        .unwrap_or_else(|e| panic!("macro body for {name:?} failed to parse: {e}"));
    let params = params.iter().map(|param| (*param).to_string()).collect();
    table
        .define(name, Symbol::Macro(MacroDef { params, body }))
        .unwrap_or_else(|e| panic!("macro {name:?} failed to define: {e}"));
}

/// Assert that two floats lie within `1e-9` of each other.
///
/// # Panics
/// Panics if the values differ by more than the tolerance.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}",
    );
}
