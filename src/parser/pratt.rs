//! Core Pratt parser state and loop.
//!
//! The [`Pratt`] struct carries the token stream, the symbol table used to
//! classify identifiers, and the transient scope stack for quantifier bound
//! variables and macro-body parameters.

use crate::ast::Expr;
use crate::symbols::SymbolTable;
use crate::token::TokenKind;
use crate::tokenizer::Tokens;

use super::ParseError;
use super::token_stream::TokenStream;

pub(super) struct Pratt<'a> {
    pub(super) ts: TokenStream<'a>,
    pub(super) symbols: &'a SymbolTable,
    pub(super) scopes: Vec<String>,
}

impl<'a> Pratt<'a> {
    pub(super) fn new(tokens: Tokens<'a>, symbols: &'a SymbolTable) -> Self {
        Self {
            ts: TokenStream::new(tokens),
            symbols,
            scopes: Vec::new(),
        }
    }

    /// Parser whose transient scope is pre-loaded with `params`, for macro
    /// bodies whose parameters are not symbol-table entries.
    pub(super) fn with_scope(
        tokens: Tokens<'a>,
        symbols: &'a SymbolTable,
        params: &[&str],
    ) -> Self {
        let mut parser = Self::new(tokens, symbols);
        parser
            .scopes
            .extend(params.iter().map(|p| (*p).to_string()));
        parser
    }

    pub(super) fn parse_expr(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let lhs = self.parse_prefix()?;
        self.parse_infix(lhs, min_bp)
    }

    /// Comma-separated expressions up to (not consuming) `terminator`.
    /// Rejects trailing commas.
    pub(super) fn parse_comma_separated(
        &mut self,
        terminator: TokenKind,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.ts.peek_kind()? == terminator {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr(0)?);
            if self.ts.peek_kind()? != TokenKind::Comma {
                break;
            }
            self.ts.next_tok()?;
            if self.ts.peek_kind()? == terminator {
                return Err(self.ts.unexpected("an expression after ','"));
            }
        }
        Ok(items)
    }

    /// Require the end-of-input token; anything else is trailing input.
    pub(super) fn finish(&mut self) -> Result<(), ParseError> {
        let token = self.ts.next_tok()?;
        if token.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(ParseError::TrailingInput {
                position: token.span.start,
            })
        }
    }

    pub(super) fn in_scope(&self, name: &str) -> bool {
        self.scopes.iter().any(|scoped| scoped == name)
    }
}
