//! Lexical analysis for fuzzy proposition source.
//!
//! [`tokenize`] converts raw text into a lazy stream of [`Token`]s. The
//! `logos` crate recognises the raw shapes (longest match first, so `<=`
//! wins over `<`); a static keyword map then reclassifies the reserved
//! connective and quantifier words that the identifier rule would otherwise
//! swallow.

use logos::Logos;
use phf::phf_map;
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// Raised when no token rule matches the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised character {slice:?} at byte {position}")]
pub struct LexError {
    /// Offending source slice.
    pub slice: String,
    /// Byte offset where the slice starts.
    pub position: usize,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token("->")]
    Arrow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("<=")]
    Lte,
    #[token("<")]
    Lt,
    #[token(">=")]
    Gte,
    #[token(">")]
    Gt,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
}

/// Maps reserved identifier lexemes to their keyword [`TokenKind`].
///
/// A static map avoids a long match statement and allows O(1) lookups.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::KwAnd,
    "or" => TokenKind::KwOr,
    "not" => TokenKind::KwNot,
    "all" => TokenKind::KwAll,
    "some" => TokenKind::KwSome,
    "most" => TokenKind::KwMost,
    "few" => TokenKind::KwFew,
};

fn keyword_kind(ident: &str) -> Option<TokenKind> {
    KEYWORDS.get(ident).copied()
}

/// Lazy token stream produced by [`tokenize`].
///
/// Yields each significant token in source order, then one final
/// [`TokenKind::Eof`] token, then `None`. Whitespace is skipped. The first
/// unrecognised slice yields a [`LexError`] and ends the stream. The stream
/// is finite and cannot be restarted; call [`tokenize`] again to re-scan.
pub struct Tokens<'a> {
    lexer: logos::Lexer<'a, RawToken>,
    done: bool,
}

impl<'a> Tokens<'a> {
    /// Full source text backing this stream.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.lexer.source()
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some(result) = self.lexer.next() else {
                self.done = true;
                let end = self.lexer.source().len();
                return Some(Ok(Token {
                    kind: TokenKind::Eof,
                    text: "",
                    span: end..end,
                }));
            };
            let span = self.lexer.span();
            let text = self.lexer.slice();
            let Ok(raw) = result else {
                self.done = true;
                return Some(Err(LexError {
                    slice: text.to_string(),
                    position: span.start,
                }));
            };
            let kind = match raw {
                RawToken::Whitespace => continue,
                RawToken::Ident => keyword_kind(text).unwrap_or(TokenKind::Ident),
                RawToken::Number => TokenKind::Number,
                RawToken::LParen => TokenKind::LParen,
                RawToken::RParen => TokenKind::RParen,
                RawToken::LBracket => TokenKind::LBracket,
                RawToken::RBracket => TokenKind::RBracket,
                RawToken::Comma => TokenKind::Comma,
                RawToken::Arrow => TokenKind::Arrow,
                RawToken::Plus => TokenKind::Plus,
                RawToken::Minus => TokenKind::Minus,
                RawToken::Star => TokenKind::Star,
                RawToken::Slash => TokenKind::Slash,
                RawToken::Caret => TokenKind::Caret,
                RawToken::Lte => TokenKind::Lte,
                RawToken::Lt => TokenKind::Lt,
                RawToken::Gte => TokenKind::Gte,
                RawToken::Gt => TokenKind::Gt,
                RawToken::EqEq => TokenKind::EqEq,
                RawToken::Neq => TokenKind::Neq,
            };
            return Some(Ok(Token { kind, text, span }));
        }
    }
}

/// Tokenise the source into a lazy, finite stream.
///
/// # Examples
///
/// ```rust
/// use fuzzlang::{TokenKind, tokenize};
///
/// let kinds: Vec<TokenKind> = tokenize("tall and 0.3")
///     .map(|t| t.map(|tok| tok.kind))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Ident,
///         TokenKind::KwAnd,
///         TokenKind::Number,
///         TokenKind::Eof,
///     ],
/// );
/// ```
#[must_use]
pub fn tokenize(src: &str) -> Tokens<'_> {
    Tokens {
        lexer: RawToken::lexer(src),
        done: false,
    }
}
