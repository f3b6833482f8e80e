//! Runtime values produced by evaluation.

/// Result of evaluating an expression: a plain number or fuzzy degree, or a
/// sequence of degrees (quantifier domains, list literals).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number; fuzzy degrees are scalars in [0,1].
    Scalar(f64),
    /// An ordered sequence of degrees.
    Vector(Vec<f64>),
}

impl Value {
    /// The scalar inside, or `None` for a sequence.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(n) => Some(*n),
            Self::Vector(_) => None,
        }
    }

    /// The sequence inside, or `None` for a scalar.
    #[must_use]
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Vector(items) => Some(items),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Scalar(n)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Self::Vector(items)
    }
}
