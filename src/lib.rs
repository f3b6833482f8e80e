//! Library crate for fuzzlang, a fuzzy proposition language.
//!
//! Source text flows through four stages: [`tokenize`] produces tokens,
//! [`parse`] builds an [`Expr`], [`expand`] rewrites macro calls away, and
//! [`evaluate`] folds the result to a [`Value`] under Zadeh connective and
//! ordered-weight quantifier semantics. [`evaluate_str`] drives the whole
//! pipeline against one [`SymbolTable`].

#![forbid(unsafe_code)]

pub mod ast;
pub mod eval;
pub mod expand;
pub mod parser;
pub mod quantifier;
pub mod symbols;
pub mod token;
pub mod tokenizer;
pub mod value;

// Only expose test utilities to tests and opt-in consumers.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_util;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use eval::{EvalError, Evaluator, evaluate};
pub use expand::{Expander, ExpansionError, expand};
pub use parser::{ParseError, parse, parse_macro_body, parse_str};
pub use quantifier::QuantifierKind;
pub use symbols::{MacroDef, NotFoundError, RedefinitionError, Symbol, SymbolTable};
pub use token::{Span, Token, TokenKind};
pub use tokenizer::{LexError, Tokens, tokenize};
pub use value::Value;

use thiserror::Error;

/// Error from any stage of [`evaluate_str`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Expansion(#[from] ExpansionError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Tokenise, parse, expand, and evaluate `src` in one call.
///
/// # Errors
///
/// Returns the first failing stage's error.
///
/// # Examples
///
/// ```rust
/// use fuzzlang::{SymbolTable, Value, evaluate_str};
///
/// let table = SymbolTable::with_constants();
/// let value = evaluate_str("not 0.5 and 0.75", &table)
///     .unwrap_or_else(|e| panic!("pipeline failed: {e}"));
/// assert_eq!(value, Value::Scalar(0.5));
/// ```
pub fn evaluate_str(src: &str, symbols: &SymbolTable) -> Result<Value, Error> {
    let parsed = parser::parse_str(src, symbols)?;
    let expanded = expand::expand(&parsed, symbols)?;
    Ok(eval::evaluate(&expanded, symbols)?)
}
