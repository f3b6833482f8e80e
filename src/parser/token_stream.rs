//! Fail-fast token stream for the Pratt parser.
//!
//! Provides lookahead and expectation helpers over the lazy [`Tokens`]
//! iterator. Lexical failures surface as [`ParseError::Lex`] through the
//! same `Result` channel as grammar failures, so the parser stops at the
//! first problem of either kind.

use std::iter::Peekable;

use crate::token::{Span, Token, TokenKind};
use crate::tokenizer::Tokens;

use super::ParseError;

pub(super) struct TokenStream<'a> {
    iter: Peekable<Tokens<'a>>,
    end: usize,
}

fn describe(token: &Token<'_>) -> String {
    if token.kind == TokenKind::Eof {
        "end of input".to_string()
    } else {
        format!("{:?}", token.text)
    }
}

impl<'a> TokenStream<'a> {
    pub(super) fn new(tokens: Tokens<'a>) -> Self {
        Self {
            end: tokens.source().len(),
            iter: tokens.peekable(),
        }
    }

    /// Consume and return the next token. Past the final [`TokenKind::Eof`]
    /// token this keeps returning synthetic `Eof` tokens rather than
    /// panicking.
    pub(super) fn next_tok(&mut self) -> Result<Token<'a>, ParseError> {
        match self.iter.next() {
            Some(Ok(token)) => Ok(token),
            Some(Err(err)) => Err(ParseError::Lex(err)),
            None => Ok(Token {
                kind: TokenKind::Eof,
                text: "",
                span: self.eof_span(),
            }),
        }
    }

    pub(super) fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        match self.iter.peek() {
            Some(Ok(token)) => Ok(token.kind),
            Some(Err(err)) => Err(ParseError::Lex(err.clone())),
            None => Ok(TokenKind::Eof),
        }
    }

    /// Consume the next token when it matches `kind`.
    ///
    /// # Errors
    /// Fails with [`ParseError::UnexpectedToken`] naming `kind` otherwise.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.peek_kind()? == kind {
            self.next_tok()
        } else {
            Err(self.unexpected(&format!("{kind:?}")))
        }
    }

    /// Build a [`ParseError::UnexpectedToken`] describing the upcoming
    /// token without consuming it.
    pub(super) fn unexpected(&mut self, expected: &str) -> ParseError {
        let (found, position) = match self.iter.peek() {
            Some(Ok(token)) => (describe(token), token.span.start),
            _ => ("end of input".to_string(), self.end),
        };
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            position,
        }
    }

    pub(super) fn eof_span(&self) -> Span {
        self.end..self.end
    }
}
