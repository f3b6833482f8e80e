//! Lexical token shapes for fuzzy proposition source.
//!
//! A [`Token`] pairs a [`TokenKind`] with the raw source slice and its byte
//! range so later stages can report positions without re-scanning.

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

/// Kind of a lexical token.
///
/// The reserved connective words (`and`, `or`, `not`) and quantifier words
/// (`all`, `some`, `most`, `few`) are classified here rather than left as
/// identifiers; see the keyword map in [`crate::tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal, integer or decimal.
    Number,
    /// Variable or macro name.
    Ident,
    /// `and` connective.
    KwAnd,
    /// `or` connective.
    KwOr,
    /// `not` connective.
    KwNot,
    /// `all` quantifier.
    KwAll,
    /// `some` quantifier.
    KwSome,
    /// `most` quantifier.
    KwMost,
    /// `few` quantifier.
    KwFew,
    /// `->` implication.
    Arrow,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `==`
    EqEq,
    /// `!=`
    Neq,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// End of input; the final token of every stream.
    Eof,
}

impl TokenKind {
    /// Whether this kind is an operator, the keyword connectives included.
    #[must_use]
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Self::KwAnd
                | Self::KwOr
                | Self::KwNot
                | Self::Arrow
                | Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Caret
                | Self::Lt
                | Self::Lte
                | Self::Gt
                | Self::Gte
                | Self::EqEq
                | Self::Neq
        )
    }

    /// Whether this kind is a quantifier keyword.
    #[must_use]
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            Self::KwAll | Self::KwSome | Self::KwMost | Self::KwFew
        )
    }
}

/// A single lexical unit with its source slice and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Classified kind.
    pub kind: TokenKind,
    /// Raw lexeme; empty for [`TokenKind::Eof`].
    pub text: &'a str,
    /// Byte range of `text` within the source.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::TokenKind;

    #[rstest]
    #[case(TokenKind::KwAnd, true, false)]
    #[case(TokenKind::KwNot, true, false)]
    #[case(TokenKind::Arrow, true, false)]
    #[case(TokenKind::Lte, true, false)]
    #[case(TokenKind::Caret, true, false)]
    #[case(TokenKind::KwAll, false, true)]
    #[case(TokenKind::KwMost, false, true)]
    #[case(TokenKind::Ident, false, false)]
    #[case(TokenKind::Number, false, false)]
    #[case(TokenKind::LParen, false, false)]
    #[case(TokenKind::Eof, false, false)]
    fn classifies_coarse_kinds(
        #[case] kind: TokenKind,
        #[case] operator: bool,
        #[case] quantifier: bool,
    ) {
        assert_eq!(kind.is_operator(), operator);
        assert_eq!(kind.is_quantifier(), quantifier);
    }
}
