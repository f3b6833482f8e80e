//! Evaluation of macro-free expression trees.
//!
//! [`Evaluator`] folds an expression to a [`Value`] under Zadeh semantics:
//! `and` is minimum, `or` is maximum, `not x` is `1 - x`, and `->` is the
//! Kleene-Dienes implication `max(1 - l, r)`. Connective operands must lie
//! in the unit interval and are never clamped; arithmetic is ordinary IEEE
//! arithmetic except that an exact zero divisor is rejected. Comparisons
//! produce the crisp degrees `1` and `0`. Quantifiers aggregate the
//! predicate's degrees with the ordered weights of their kind.

use log::debug;
use thiserror::Error;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::quantifier::QuantifierKind;
use crate::symbols::{Symbol, SymbolTable};
use crate::value::Value;

/// Raised when an expression cannot be folded to a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A name resolved neither to a bound variable nor to a value binding.
    #[error("unknown variable {name:?}")]
    UnknownVariable { name: String },
    /// A macro call node survived into evaluation.
    #[error("macro call {name:?} survived expansion")]
    LeftoverMacro { name: String },
    /// A connective operand or predicate result fell outside `[0, 1]`.
    #[error("value {value} escapes the unit interval")]
    OutOfRange { value: f64 },
    /// The right operand of `/` was exactly zero.
    #[error("division by zero")]
    DivisionByZero,
    /// A quantifier's domain held no elements.
    #[error("quantifier {kind} over an empty domain")]
    EmptyDomain { kind: QuantifierKind },
    /// A vector appeared where a single number was required.
    #[error("expected a scalar operand")]
    ExpectedScalar,
    /// A quantifier's domain evaluated to a scalar.
    #[error("quantifier {kind} requires a vector domain")]
    ExpectedVector { kind: QuantifierKind },
    /// Evaluation visited more nodes than the configured budget allows.
    #[error("evaluation budget of {limit} nodes exhausted")]
    BudgetExhausted { limit: usize },
}

/// Folds expressions to values against a symbol table.
///
/// Quantifiers bind their variable on an internal scope stack, innermost
/// binding first, before the symbol table is consulted. The optional node
/// budget is shared across every call on the same instance.
pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
    scopes: Vec<(String, Value)>,
    budget: Option<usize>,
    visited: usize,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            scopes: Vec::new(),
            budget: None,
            visited: 0,
        }
    }

    /// Like [`Evaluator::new`] but giving up after `limit` visited nodes.
    #[must_use]
    pub fn with_budget(symbols: &'a SymbolTable, limit: usize) -> Self {
        Self {
            budget: Some(limit),
            ..Self::new(symbols)
        }
    }

    /// Fold `expr` to a single [`Value`].
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] when a name is unbound, a macro call
    /// survived expansion, a connective operand escapes the unit interval,
    /// a divisor is zero, a quantifier domain is not a non-empty vector,
    /// or the node budget runs out.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        self.charge()?;
        match expr {
            Expr::Literal(n) => Ok(Value::Scalar(*n)),
            Expr::Variable(name) => self.lookup(name),
            Expr::Unary { op, operand } => self.eval_unary(*op, operand),
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs),
            Expr::MacroCall { name, .. } => Err(EvalError::LeftoverMacro { name: name.clone() }),
            Expr::Quantifier {
                kind,
                var,
                domain,
                predicate,
            } => self.eval_quantifier(*kind, var, domain, predicate),
            Expr::List(items) => self.eval_list(items),
        }
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some((_, value)) = self.scopes.iter().rev().find(|(bound, _)| bound == name) {
            return Ok(value.clone());
        }
        match self.symbols.resolve(name) {
            Ok(Symbol::Variable(value) | Symbol::Constant(value)) => Ok(value.clone()),
            _ => Err(EvalError::UnknownVariable {
                name: name.to_string(),
            }),
        }
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> Result<Value, EvalError> {
        let x = self.scalar_operand(operand)?;
        let result = match op {
            UnaryOp::Not => 1.0 - unit_degree(x)?,
            UnaryOp::Neg => -x,
        };
        Ok(Value::Scalar(result))
    }

    #[expect(
        clippy::float_cmp,
        reason = "crisp equality and the zero-divisor check are exact by definition"
    )]
    fn eval_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Value, EvalError> {
        let l = self.scalar_operand(lhs)?;
        let r = self.scalar_operand(rhs)?;
        let result = match op {
            BinaryOp::And => unit_degree(l)?.min(unit_degree(r)?),
            BinaryOp::Or => unit_degree(l)?.max(unit_degree(r)?),
            BinaryOp::Implies => (1.0 - unit_degree(l)?).max(unit_degree(r)?),
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div => {
                if r == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                l / r
            }
            BinaryOp::Pow => l.powf(r),
            BinaryOp::Lt => crisp(l < r),
            BinaryOp::Lte => crisp(l <= r),
            BinaryOp::Gt => crisp(l > r),
            BinaryOp::Gte => crisp(l >= r),
            BinaryOp::Eq => crisp(l == r),
            BinaryOp::Neq => crisp(l != r),
        };
        Ok(Value::Scalar(result))
    }

    fn eval_quantifier(
        &mut self,
        kind: QuantifierKind,
        var: &str,
        domain: &Expr,
        predicate: &Expr,
    ) -> Result<Value, EvalError> {
        let domain = self.evaluate(domain)?;
        let Some(elements) = domain.as_vector() else {
            return Err(EvalError::ExpectedVector { kind });
        };
        if elements.is_empty() {
            return Err(EvalError::EmptyDomain { kind });
        }
        let mut degrees = Vec::with_capacity(elements.len());
        for &element in elements {
            self.scopes.push((var.to_string(), Value::Scalar(element)));
            let degree = self.scalar_operand(predicate);
            self.scopes.pop();
            degrees.push(unit_degree(degree?)?);
        }
        degrees.sort_by(|a, b| b.total_cmp(a));
        let weights = kind.weights(degrees.len());
        let score = weights
            .iter()
            .zip(&degrees)
            .map(|(weight, degree)| weight * degree)
            .sum::<f64>();
        debug!("aggregated {kind} over {} degrees to {score}", degrees.len());
        Ok(Value::Scalar(score))
    }

    fn eval_list(&mut self, items: &[Expr]) -> Result<Value, EvalError> {
        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            elements.push(self.scalar_operand(item)?);
        }
        Ok(Value::Vector(elements))
    }

    fn scalar_operand(&mut self, expr: &Expr) -> Result<f64, EvalError> {
        self.evaluate(expr)?
            .as_scalar()
            .ok_or(EvalError::ExpectedScalar)
    }

    fn charge(&mut self) -> Result<(), EvalError> {
        self.visited += 1;
        if let Some(limit) = self.budget
            && self.visited > limit
        {
            return Err(EvalError::BudgetExhausted { limit });
        }
        Ok(())
    }
}

/// Check that a connective operand or predicate result is a degree.
fn unit_degree(x: f64) -> Result<f64, EvalError> {
    if (0.0..=1.0).contains(&x) {
        Ok(x)
    } else {
        Err(EvalError::OutOfRange { value: x })
    }
}

fn crisp(outcome: bool) -> f64 {
    if outcome { 1.0 } else { 0.0 }
}

/// Evaluate `expr` with a fresh, unlimited [`Evaluator`].
///
/// # Errors
///
/// Returns an [`EvalError`] under the same conditions as
/// [`Evaluator::evaluate`].
pub fn evaluate(expr: &Expr, symbols: &SymbolTable) -> Result<Value, EvalError> {
    Evaluator::new(symbols).evaluate(expr)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{EvalError, Evaluator, evaluate};
    use crate::parser::parse_str;
    use crate::quantifier::QuantifierKind;
    use crate::symbols::{Symbol, SymbolTable};
    use crate::test_util::{call, num, var};
    use crate::value::Value;

    #[fixture]
    fn table() -> SymbolTable {
        let mut table = SymbolTable::with_constants();
        table
            .define("tall", Symbol::Variable(Value::Scalar(0.8)))
            .unwrap_or_else(|e| panic!("define failed: {e}"));
        table
            .define("crowd", Symbol::Variable(Value::Vector(vec![0.9, 0.6, 0.2])))
            .unwrap_or_else(|e| panic!("define failed: {e}"));
        table
    }

    fn eval_scalar(src: &str, table: &SymbolTable) -> f64 {
        let parsed =
            parse_str(src, table).unwrap_or_else(|e| panic!("parse failed for {src:?}: {e}"));
        evaluate(&parsed, table)
            .unwrap_or_else(|e| panic!("evaluation failed for {src:?}: {e}"))
            .as_scalar()
            .unwrap_or_else(|| panic!("expected a scalar for {src:?}"))
    }

    fn eval_err(src: &str, table: &SymbolTable) -> EvalError {
        let parsed =
            parse_str(src, table).unwrap_or_else(|e| panic!("parse failed for {src:?}: {e}"));
        evaluate(&parsed, table)
            .err()
            .unwrap_or_else(|| panic!("expected an evaluation failure for {src:?}"))
    }

    #[rstest]
    #[case("1 + 2 * 3", 7.0)]
    #[case("(1 + 2) * 3", 9.0)]
    #[case("10 / 4", 2.5)]
    #[case("2 ^ 3 ^ 2", 512.0)]
    #[case("-2 ^ 2", -4.0)]
    #[case("-2 * 3", -6.0)]
    fn arithmetic_follows_precedence(table: SymbolTable, #[case] src: &str, #[case] expected: f64) {
        assert_eq!(eval_scalar(src, &table), expected);
    }

    #[rstest]
    #[case("0.2 and 0.7", 0.2)]
    #[case("0.2 or 0.7", 0.7)]
    #[case("not 0.4", 0.6)]
    #[case("0.3 -> 0.9", 0.9)]
    #[case("tall and not tall", 0.2)]
    fn connectives_follow_zadeh_semantics(
        table: SymbolTable,
        #[case] src: &str,
        #[case] expected: f64,
    ) {
        let actual = eval_scalar(src, &table);
        assert!(
            (actual - expected).abs() < 1e-12,
            "{src:?} evaluated to {actual}, expected {expected}"
        );
    }

    #[rstest]
    #[case("0.2 < 0.8", 1.0)]
    #[case("0.8 <= 0.8", 1.0)]
    #[case("0.2 > 0.8", 0.0)]
    #[case("1 == 2", 0.0)]
    #[case("1 != 2", 1.0)]
    fn comparisons_are_crisp(table: SymbolTable, #[case] src: &str, #[case] expected: f64) {
        assert_eq!(eval_scalar(src, &table), expected);
    }

    #[rstest]
    fn connective_operand_outside_unit_interval_is_rejected(table: SymbolTable) {
        assert_eq!(
            eval_err("1.5 and 0.2", &table),
            EvalError::OutOfRange { value: 1.5 },
        );
    }

    #[rstest]
    fn zero_divisor_is_rejected(table: SymbolTable) {
        assert_eq!(eval_err("1 / 0", &table), EvalError::DivisionByZero);
    }

    #[rstest]
    fn list_literal_builds_a_vector(table: SymbolTable) {
        let parsed = parse_str("[0.1, 0.2]", &table)
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let value = evaluate(&parsed, &table).unwrap_or_else(|e| panic!("evaluation failed: {e}"));
        assert_eq!(value, Value::Vector(vec![0.1, 0.2]));
    }

    #[rstest]
    fn nested_vector_is_rejected(table: SymbolTable) {
        assert_eq!(eval_err("[[1], 2]", &table), EvalError::ExpectedScalar);
    }

    #[rstest]
    #[case("all(x, [0.9, 0.6], x)", 0.6)]
    #[case("some(x, [0.9, 0.6], x)", 0.9)]
    #[case("all(x, crowd, x)", 0.2)]
    fn extreme_quantifiers_match_min_and_max(
        table: SymbolTable,
        #[case] src: &str,
        #[case] expected: f64,
    ) {
        let actual = eval_scalar(src, &table);
        assert!(
            (actual - expected).abs() < 1e-12,
            "{src:?} evaluated to {actual}, expected {expected}"
        );
    }

    #[rstest]
    fn bound_variable_shadows_table_binding(table: SymbolTable) {
        // `tall` is 0.8 in the table but rebound per element here.
        assert!((eval_scalar("all(tall, [0.2], tall)", &table) - 0.2).abs() < 1e-12);
    }

    #[rstest]
    #[case("all(x, [], x)", EvalError::EmptyDomain { kind: QuantifierKind::All })]
    #[case("few(x, 0.5, x)", EvalError::ExpectedVector { kind: QuantifierKind::Few })]
    #[case("all(x, [2], x)", EvalError::OutOfRange { value: 2.0 })]
    fn quantifier_domains_are_validated(
        table: SymbolTable,
        #[case] src: &str,
        #[case] expected: EvalError,
    ) {
        assert_eq!(eval_err(src, &table), expected);
    }

    #[rstest]
    fn unknown_variable_is_rejected(table: SymbolTable) {
        // Built by hand; the parser would reject the name first.
        let err = evaluate(&var("ghost"), &table)
            .err()
            .unwrap_or_else(|| panic!("expected an evaluation failure"));
        assert_eq!(
            err,
            EvalError::UnknownVariable {
                name: "ghost".to_string(),
            },
        );
    }

    #[rstest]
    fn leftover_macro_is_rejected(table: SymbolTable) {
        let err = evaluate(&call("halfof", vec![num(4.0)]), &table)
            .err()
            .unwrap_or_else(|| panic!("expected an evaluation failure"));
        assert_eq!(
            err,
            EvalError::LeftoverMacro {
                name: "halfof".to_string(),
            },
        );
    }

    #[rstest]
    fn budget_limits_visited_nodes(table: SymbolTable) {
        let parsed = parse_str("1 + 2 * 3", &table)
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let mut evaluator = Evaluator::with_budget(&table, 2);
        let err = evaluator
            .evaluate(&parsed)
            .err()
            .unwrap_or_else(|| panic!("expected a budget failure"));
        assert_eq!(err, EvalError::BudgetExhausted { limit: 2 });
    }
}
