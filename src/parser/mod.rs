//! Pratt parser producing expression trees.
//!
//! This module contains the entry points for parsing fuzzy proposition
//! source. [`parse_str`] tokenises and parses a complete expression;
//! [`parse_macro_body`] does the same for a macro definition body, where
//! the macro's parameters are in scope as variables. Identifiers are
//! resolved during parsing: every name must be a bound variable, a
//! symbol-table entry, or a macro applied to arguments, so later stages
//! never meet a name the source spelled wrong.

use log::debug;
use thiserror::Error;

use crate::ast::Expr;
use crate::symbols::SymbolTable;
use crate::tokenizer::{LexError, Tokens, tokenize};

mod infix;
mod pratt;
mod precedence;
mod prefix;
mod token_stream;

use pratt::Pratt;

/// Raised when source text cannot be shaped into an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer hit an unrecognised character.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A token appeared where the grammar required something else.
    #[error("expected {expected} but found {found} at byte {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },
    /// A complete expression was parsed but tokens remained.
    #[error("unexpected trailing input at byte {position}")]
    TrailingInput { position: usize },
    /// A call form named something that is not a defined macro.
    #[error("unknown macro {name:?} at byte {position}")]
    UnknownMacro { name: String, position: usize },
    /// A macro name appeared without an argument list.
    #[error("macro {name:?} requires an argument list at byte {position}")]
    MacroWithoutArguments { name: String, position: usize },
    /// A bare name resolved to nothing.
    #[error("unknown identifier {name:?} at byte {position}")]
    UnknownIdentifier { name: String, position: usize },
    /// A call supplied no arguments to a macro that declares parameters.
    #[error("macro {name:?} takes {expected} arguments but none were given at byte {position}")]
    EmptyArguments {
        name: String,
        expected: usize,
        position: usize,
    },
}

/// Parse a token stream into a single expression.
///
/// The whole stream must form one expression; anything left over after it
/// is an error.
///
/// # Errors
///
/// Returns a [`ParseError`] on lexical failure, malformed syntax, an
/// unresolved identifier, or trailing input.
pub fn parse<'a>(tokens: Tokens<'a>, symbols: &'a SymbolTable) -> Result<Expr, ParseError> {
    debug!("parsing {} bytes", tokens.source().len());
    let mut parser = Pratt::new(tokens, symbols);
    let expr = parser.parse_expr(0)?;
    parser.finish()?;
    Ok(expr)
}

/// Tokenise and parse a source string into a single expression.
///
/// # Errors
///
/// Returns a [`ParseError`] on lexical failure, malformed syntax, an
/// unresolved identifier, or trailing input.
///
/// # Examples
///
/// ```rust
/// use fuzzlang::parser::parse_str;
/// use fuzzlang::symbols::SymbolTable;
///
/// let table = SymbolTable::with_constants();
/// let expr = parse_str("not 0.4", &table).unwrap_or_else(|e| panic!("parse failed: {e}"));
/// assert_eq!(expr.to_sexpr(), "(not 0.4)");
/// ```
pub fn parse_str(src: &str, symbols: &SymbolTable) -> Result<Expr, ParseError> {
    parse(tokenize(src), symbols)
}

/// Parse the body of a macro definition.
///
/// Each name in `params` is treated as a bound variable for the duration
/// of the parse, so a body may mention its parameters without them being
/// defined in `symbols`. The resulting tree is suitable for storing in a
/// [`crate::symbols::MacroDef`].
///
/// # Errors
///
/// Returns a [`ParseError`] on lexical failure, malformed syntax, an
/// identifier that is neither a parameter nor defined in `symbols`, or
/// trailing input.
pub fn parse_macro_body(
    src: &str,
    params: &[&str],
    symbols: &SymbolTable,
) -> Result<Expr, ParseError> {
    let mut parser = Pratt::with_scope(tokenize(src), symbols, params);
    let expr = parser.parse_expr(0)?;
    parser.finish()?;
    Ok(expr)
}
