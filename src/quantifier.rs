//! Quantifier kinds and their aggregation weight vectors.
//!
//! Each linguistic quantifier is driven by a regular increasing monotone
//! (RIM) generator `Q` on [0,1] with `Q(0) = 0` and `Q(1) = 1`. For a
//! domain of `n` degrees sorted descending, the weight of sorted position
//! `i` is `Q(i/n) - Q((i-1)/n)`, so every vector sums to 1 by telescoping.
//! New quantifier kinds are added by extending [`QUANTIFIER_TABLE`], not by
//! touching call sites.

use std::fmt;

use crate::token::TokenKind;

/// Linguistic quantifier kinds accepted in quantifier forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// Every element; all weight on the minimum degree.
    All,
    /// At least one element; all weight on the maximum degree.
    Some,
    /// A large proportion; weights grow toward the minimum (`Q(r) = r²`).
    Most,
    /// A small number; weights concentrate near the maximum (`Q(r) = √r`).
    Few,
}

struct QuantifierEntry {
    kind: QuantifierKind,
    word: &'static str,
    generator: fn(f64) -> f64,
}

const QUANTIFIER_TABLE: &[QuantifierEntry] = &[
    QuantifierEntry {
        kind: QuantifierKind::All,
        word: "all",
        generator: rim_all,
    },
    QuantifierEntry {
        kind: QuantifierKind::Some,
        word: "some",
        generator: rim_some,
    },
    QuantifierEntry {
        kind: QuantifierKind::Most,
        word: "most",
        generator: rim_most,
    },
    QuantifierEntry {
        kind: QuantifierKind::Few,
        word: "few",
        generator: rim_few,
    },
];

fn rim_all(r: f64) -> f64 {
    if r < 1.0 { 0.0 } else { 1.0 }
}

fn rim_some(r: f64) -> f64 {
    if r > 0.0 { 1.0 } else { 0.0 }
}

fn rim_most(r: f64) -> f64 {
    r * r
}

fn rim_few(r: f64) -> f64 {
    r.sqrt()
}

impl QuantifierKind {
    /// Map a keyword token onto its quantifier kind.
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::KwAll => Some(Self::All),
            TokenKind::KwSome => Some(Self::Some),
            TokenKind::KwMost => Some(Self::Most),
            TokenKind::KwFew => Some(Self::Few),
            _ => None,
        }
    }

    /// Surface keyword for this kind.
    #[must_use]
    pub fn word(self) -> &'static str {
        self.entry().word
    }

    /// Aggregation weights for a domain of `n` elements, indexed by sorted
    /// position (position 0 holds the largest degree). Non-negative, sums
    /// to 1 for `n > 0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "domain cardinalities sit far below f64's integer range"
    )]
    pub fn weights(self, n: usize) -> Vec<f64> {
        let q = self.entry().generator;
        let n_f = n as f64;
        (1..=n)
            .map(|i| {
                let i_f = i as f64;
                q(i_f / n_f) - q((i_f - 1.0) / n_f)
            })
            .collect()
    }

    fn entry(self) -> &'static QuantifierEntry {
        #[expect(clippy::expect_used, reason = "table covers every quantifier kind")]
        QUANTIFIER_TABLE
            .iter()
            .find(|entry| entry.kind == self)
            .expect("quantifier kind missing from table")
    }
}

impl fmt::Display for QuantifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
