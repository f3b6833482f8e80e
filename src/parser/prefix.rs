//! Parsing of primaries and prefix operators for the Pratt parser.
//!
//! Identifier classification happens here: a name is a macro call only when
//! it resolves to a macro definition and is followed by `(`; a bare macro
//! name is an error rather than a variable, and a name that resolves
//! nowhere (table or transient scope) is rejected at parse time.

use crate::ast::Expr;
use crate::quantifier::QuantifierKind;
use crate::symbols::Symbol;
use crate::token::{Token, TokenKind};

use super::ParseError;
use super::pratt::Pratt;
use super::precedence::prefix_binding_power;

impl<'a> Pratt<'a> {
    pub(super) fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.ts.next_tok()?;
        match token.kind {
            TokenKind::Number => parse_number(&token),
            TokenKind::Ident => self.parse_identifier(&token),
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::LBracket => self.parse_list(),
            TokenKind::KwAll | TokenKind::KwSome | TokenKind::KwMost | TokenKind::KwFew => {
                self.parse_quantifier(&token)
            }
            kind => {
                let Some((bp, op)) = prefix_binding_power(kind) else {
                    return Err(unexpected_at("an expression", &token));
                };
                let operand = self.parse_expr(bp)?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
        }
    }

    fn parse_identifier(&mut self, token: &Token<'a>) -> Result<Expr, ParseError> {
        if self.ts.peek_kind()? == TokenKind::LParen {
            return self.parse_macro_call(token);
        }
        let name = token.text;
        if self.in_scope(name) {
            return Ok(Expr::Variable(name.to_string()));
        }
        match self.symbols.resolve(name) {
            Ok(Symbol::Macro(_)) => Err(ParseError::MacroWithoutArguments {
                name: name.to_string(),
                position: token.span.start,
            }),
            Ok(_) => Ok(Expr::Variable(name.to_string())),
            Err(_) => Err(ParseError::UnknownIdentifier {
                name: name.to_string(),
                position: token.span.start,
            }),
        }
    }

    fn parse_macro_call(&mut self, token: &Token<'a>) -> Result<Expr, ParseError> {
        let name = token.text;
        // A bound variable shadows a same-named macro, making the call form
        // invalid here.
        let param_count = if self.in_scope(name) {
            None
        } else {
            match self.symbols.resolve(name) {
                Ok(Symbol::Macro(def)) => Some(def.params.len()),
                _ => None,
            }
        };
        let Some(param_count) = param_count else {
            return Err(ParseError::UnknownMacro {
                name: name.to_string(),
                position: token.span.start,
            });
        };
        self.ts.next_tok()?; // '(' already peeked
        let args = self.parse_comma_separated(TokenKind::RParen)?;
        self.ts.expect(TokenKind::RParen)?;
        if args.is_empty() && param_count > 0 {
            return Err(ParseError::EmptyArguments {
                name: name.to_string(),
                expected: param_count,
                position: token.span.start,
            });
        }
        Ok(Expr::MacroCall {
            name: name.to_string(),
            args,
        })
    }

    fn parse_parenthesized(&mut self) -> Result<Expr, ParseError> {
        let inner = self.parse_expr(0)?;
        self.ts.expect(TokenKind::RParen)?;
        Ok(inner)
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let items = self.parse_comma_separated(TokenKind::RBracket)?;
        self.ts.expect(TokenKind::RBracket)?;
        Ok(Expr::List(items))
    }

    fn parse_quantifier(&mut self, token: &Token<'a>) -> Result<Expr, ParseError> {
        let Some(kind) = QuantifierKind::from_token(token.kind) else {
            unreachable!("caller matched a quantifier keyword")
        };
        self.ts.expect(TokenKind::LParen)?;
        let var_token = self.ts.expect(TokenKind::Ident)?;
        let var = var_token.text.to_string();
        self.ts.expect(TokenKind::Comma)?;
        let domain = self.parse_expr(0)?;
        self.ts.expect(TokenKind::Comma)?;
        // The bound variable is visible only inside the predicate.
        self.scopes.push(var.clone());
        let predicate = self.parse_expr(0);
        self.scopes.pop();
        let predicate = predicate?;
        self.ts.expect(TokenKind::RParen)?;
        Ok(Expr::Quantifier {
            kind,
            var,
            domain: Box::new(domain),
            predicate: Box::new(predicate),
        })
    }
}

fn parse_number(token: &Token<'_>) -> Result<Expr, ParseError> {
    #[expect(
        clippy::expect_used,
        reason = "the number rule only matches digit sequences f64 accepts"
    )]
    let value = token
        .text
        .parse::<f64>()
        .expect("number token failed to parse");
    Ok(Expr::Literal(value))
}

fn unexpected_at(expected: &str, token: &Token<'_>) -> ParseError {
    let found = if token.kind == TokenKind::Eof {
        "end of input".to_string()
    } else {
        format!("{:?}", token.text)
    };
    ParseError::UnexpectedToken {
        expected: expected.to_string(),
        found,
        position: token.span.start,
    }
}
