//! Expression AST for fuzzy propositions.
//!
//! The parser builds this tree, the expander rewrites [`Expr::MacroCall`]
//! nodes away, and the evaluator folds the rest to a value. Each node
//! exclusively owns its children; sharing and cycles are unrepresentable.

use crate::quantifier::QuantifierKind;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Fuzzy complement, `1 - x`.
    Not,
    /// Arithmetic negation.
    Neg,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Zadeh t-norm (minimum).
    And,
    /// Zadeh t-conorm (maximum).
    Or,
    /// Kleene-Dienes implication, `max(1 - l, r)`.
    Implies,
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation, right-associative.
    Pow,
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    Neq,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Literal(f64),
    /// Reference to a symbol-table binding or an enclosing bound variable.
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Macro invocation; expansion removes every one of these.
    MacroCall {
        name: String,
        args: Vec<Expr>,
    },
    /// Quantified predicate over a domain of degrees. `var` is bound per
    /// element while `predicate` is evaluated.
    Quantifier {
        kind: QuantifierKind,
        var: String,
        domain: Box<Expr>,
        predicate: Box<Expr>,
    },
    /// Literal sequence of element expressions.
    List(Vec<Expr>),
}

impl Expr {
    /// Display the expression as a simple S-expression for tests.
    #[must_use]
    pub fn to_sexpr(&self) -> String {
        match self {
            Self::Literal(n) => n.to_string(),
            Self::Variable(name) => name.clone(),
            Self::Unary { op, operand } => {
                let op_str = match op {
                    UnaryOp::Not => "not",
                    UnaryOp::Neg => "-",
                };
                format!("({} {})", op_str, operand.to_sexpr())
            }
            Self::Binary { op, lhs, rhs } => {
                let op_str = match op {
                    BinaryOp::And => "and",
                    BinaryOp::Or => "or",
                    BinaryOp::Implies => "->",
                    BinaryOp::Add => "+",
                    BinaryOp::Sub => "-",
                    BinaryOp::Mul => "*",
                    BinaryOp::Div => "/",
                    BinaryOp::Pow => "^",
                    BinaryOp::Lt => "<",
                    BinaryOp::Lte => "<=",
                    BinaryOp::Gt => ">",
                    BinaryOp::Gte => ">=",
                    BinaryOp::Eq => "==",
                    BinaryOp::Neq => "!=",
                };
                format!("({} {} {})", op_str, lhs.to_sexpr(), rhs.to_sexpr())
            }
            Self::MacroCall { name, args } => {
                let args_str = args
                    .iter()
                    .map(Self::to_sexpr)
                    .collect::<Vec<_>>()
                    .join(" ");
                if args_str.is_empty() {
                    format!("(call {name})")
                } else {
                    format!("(call {name} {args_str})")
                }
            }
            Self::Quantifier {
                kind,
                var,
                domain,
                predicate,
            } => format!(
                "({} {} {} {})",
                kind.word(),
                var,
                domain.to_sexpr(),
                predicate.to_sexpr()
            ),
            Self::List(items) => {
                let items_str = items
                    .iter()
                    .map(Self::to_sexpr)
                    .collect::<Vec<_>>()
                    .join(" ");
                if items_str.is_empty() {
                    "(list)".to_string()
                } else {
                    format!("(list {items_str})")
                }
            }
        }
    }
}
