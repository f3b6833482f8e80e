//! End-to-end sessions through [`fuzzlang::evaluate_str`]: seed a table,
//! evaluate propositions, rebind, clear, and start over.

mod test_util;

use fuzzlang::{
    Error, EvalError, ExpansionError, ParseError, Symbol, SymbolTable, Value, evaluate_str,
};
use rstest::{fixture, rstest};
use test_util::{assert_close, define_macro, table_with};

#[fixture]
fn session() -> SymbolTable {
    let mut table = table_with(&[("tall", 0.8), ("young", 0.3)]);
    define_macro(&mut table, "halfof", &["x"], "x * 0.5");
    table
}

fn eval_scalar(src: &str, table: &SymbolTable) -> f64 {
    evaluate_str(src, table)
        .unwrap_or_else(|e| panic!("evaluation failure for {src:?}: {e}"))
        .as_scalar()
        .unwrap_or_else(|| panic!("expected a scalar for {src:?}"))
}

#[rstest]
#[case("tall and not young", 0.7)]
#[case("halfof(4) + 1", 3.0)]
#[case("0.2 < 0.8", 1.0)]
#[case("pi > 3 and pi < 4", 1.0)]
#[case("tall -> young", 0.3)]
#[case("halfof(tall) or young", 0.4)]
fn propositions_evaluate_against_the_session(
    session: SymbolTable,
    #[case] src: &str,
    #[case] expected: f64,
) {
    assert_close(eval_scalar(src, &session), expected);
}

#[rstest]
fn macros_compose_with_quantifiers(mut session: SymbolTable) {
    define_macro(&mut session, "support", &["xs"], "most(x, xs, x > 0.5)");
    assert_close(
        eval_scalar("support([0.9, 0.6, 0.2])", &session),
        4.0 / 9.0,
    );
}

#[rstest]
fn vector_results_survive_the_pipeline(session: SymbolTable) {
    let value = evaluate_str("[halfof(1), tall]", &session)
        .unwrap_or_else(|e| panic!("evaluation failure: {e}"));
    assert_eq!(value, Value::Vector(vec![0.5, 0.8]));
}

#[rstest]
fn each_stage_reports_through_the_shared_error(session: SymbolTable) {
    let parse = evaluate_str("tall and", &session)
        .err()
        .unwrap_or_else(|| panic!("expected a parse failure"));
    assert!(matches!(parse, Error::Parse(ParseError::UnexpectedToken { .. })));

    let expansion = evaluate_str("halfof(1, 2)", &session)
        .err()
        .unwrap_or_else(|| panic!("expected an expansion failure"));
    assert_eq!(
        expansion,
        Error::Expansion(ExpansionError::ArityMismatch {
            name: "halfof".to_string(),
            expected: 1,
            found: 2,
        }),
    );

    let eval = evaluate_str("1 / 0", &session)
        .err()
        .unwrap_or_else(|| panic!("expected an evaluation failure"));
    assert_eq!(eval, Error::Eval(EvalError::DivisionByZero));
}

#[rstest]
fn error_messages_name_the_failure_site(session: SymbolTable) {
    let err = evaluate_str("0.5 ?", &session)
        .err()
        .unwrap_or_else(|| panic!("expected a lex failure"));
    assert_eq!(err.to_string(), "unrecognised character \"?\" at byte 4");

    let err = evaluate_str("ghost", &session)
        .err()
        .unwrap_or_else(|| panic!("expected a parse failure"));
    assert_eq!(err.to_string(), "unknown identifier \"ghost\" at byte 0");
}

#[rstest]
fn sessions_rebind_and_clear(mut session: SymbolTable) {
    assert_close(eval_scalar("tall", &session), 0.8);

    session
        .rebind("tall", Symbol::Variable(Value::Scalar(0.4)))
        .unwrap_or_else(|e| panic!("rebind failed: {e}"));
    assert_close(eval_scalar("tall and not young", &session), 0.4);

    session.clear();
    let err = evaluate_str("tall", &session)
        .err()
        .unwrap_or_else(|| panic!("expected a failure after clear"));
    assert_eq!(
        err,
        Error::Parse(ParseError::UnknownIdentifier {
            name: "tall".to_string(),
            position: 0,
        }),
    );

    // The constant pool is gone too; the name is free again.
    assert!(evaluate_str("pi", &session).is_err());
    session
        .define("pi", Symbol::Variable(Value::Scalar(3.0)))
        .unwrap_or_else(|e| panic!("define failed: {e}"));
    assert_close(eval_scalar("pi", &session), 3.0);
}

#[rstest]
fn cleared_sessions_accept_fresh_macros(mut session: SymbolTable) {
    session.clear();
    define_macro(&mut session, "halfof", &["x"], "x / 2");
    assert_close(eval_scalar("halfof(5)", &session), 2.5);
}
