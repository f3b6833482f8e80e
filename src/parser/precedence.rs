//! Operator precedence tables for fuzzy proposition expressions.
//!
//! Binding powers for prefix and infix operators live here so the grammar
//! has a single source of truth. Implication and exponentiation are
//! right-associative (`r_bp < l_bp`); everything else is left-associative.
//! Prefix `not` sits below the comparisons so `not a < b` negates the
//! comparison, while prefix minus sits between `* /` and `^` so `-2 ^ 2`
//! negates the power and `-2 * 3` negates only the literal.

use crate::ast::{BinaryOp, UnaryOp};
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy)]
struct PrefixEntry {
    bp: u8,
    op: UnaryOp,
}

#[derive(Debug, Clone, Copy)]
struct InfixEntry {
    l_bp: u8,
    r_bp: u8,
    op: BinaryOp,
}

const PREFIX_TABLE: &[(TokenKind, PrefixEntry)] = &[
    (
        TokenKind::KwNot,
        PrefixEntry {
            bp: 25,
            op: UnaryOp::Not,
        },
    ),
    (
        TokenKind::Minus,
        PrefixEntry {
            bp: 55,
            op: UnaryOp::Neg,
        },
    ),
];

const INFIX_TABLE: &[(TokenKind, InfixEntry)] = &[
    (
        TokenKind::Arrow,
        InfixEntry {
            l_bp: 6,
            r_bp: 5,
            op: BinaryOp::Implies,
        },
    ),
    (
        TokenKind::KwOr,
        InfixEntry {
            l_bp: 10,
            r_bp: 11,
            op: BinaryOp::Or,
        },
    ),
    (
        TokenKind::KwAnd,
        InfixEntry {
            l_bp: 20,
            r_bp: 21,
            op: BinaryOp::And,
        },
    ),
    (
        TokenKind::Lt,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Lt,
        },
    ),
    (
        TokenKind::Lte,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Lte,
        },
    ),
    (
        TokenKind::Gt,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Gt,
        },
    ),
    (
        TokenKind::Gte,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Gte,
        },
    ),
    (
        TokenKind::EqEq,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Eq,
        },
    ),
    (
        TokenKind::Neq,
        InfixEntry {
            l_bp: 30,
            r_bp: 31,
            op: BinaryOp::Neq,
        },
    ),
    (
        TokenKind::Plus,
        InfixEntry {
            l_bp: 40,
            r_bp: 41,
            op: BinaryOp::Add,
        },
    ),
    (
        TokenKind::Minus,
        InfixEntry {
            l_bp: 40,
            r_bp: 41,
            op: BinaryOp::Sub,
        },
    ),
    (
        TokenKind::Star,
        InfixEntry {
            l_bp: 50,
            r_bp: 51,
            op: BinaryOp::Mul,
        },
    ),
    (
        TokenKind::Slash,
        InfixEntry {
            l_bp: 50,
            r_bp: 51,
            op: BinaryOp::Div,
        },
    ),
    (
        TokenKind::Caret,
        InfixEntry {
            l_bp: 61,
            r_bp: 60,
            op: BinaryOp::Pow,
        },
    ),
];

/// Lookup the binding power and [`UnaryOp`] for a prefix operator.
pub(super) fn prefix_binding_power(kind: TokenKind) -> Option<(u8, UnaryOp)> {
    PREFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.bp, entry.op)))
}

/// Lookup the binding powers and [`BinaryOp`] for an infix operator.
pub(super) fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8, BinaryOp)> {
    INFIX_TABLE
        .iter()
        .find_map(|(k, entry)| (kind == *k).then_some((entry.l_bp, entry.r_bp, entry.op)))
}
