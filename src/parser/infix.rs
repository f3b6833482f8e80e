//! Infix operator handling for the Pratt parser.

use crate::ast::Expr;

use super::ParseError;
use super::pratt::Pratt;
use super::precedence::infix_binding_power;

impl Pratt<'_> {
    pub(super) fn parse_infix(&mut self, mut lhs: Expr, min_bp: u8) -> Result<Expr, ParseError> {
        loop {
            let op_kind = self.ts.peek_kind()?;
            let Some((l_bp, r_bp, op)) = infix_binding_power(op_kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.ts.next_tok()?;
            let rhs = self.parse_expr(r_bp)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }
}
