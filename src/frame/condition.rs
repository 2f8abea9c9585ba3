//! Comparison operators used by [`DataFrame::filter`](super::DataFrame::filter).

use crate::error::{Error, Result};

/// How a column value is compared against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// Strictly less than (`<<` or `<`).
    Less,
    /// `<=`
    LessEqual,
    /// Exactly equal (`==`).
    Equal,
    /// `>=`
    GreaterEqual,
    /// Strictly greater than (`>>` or `>`).
    Greater,
}

impl Comparison {
    /// Evaluate `lhs <op> rhs`. Comparisons involving NaN are false.
    #[inline]
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Less => lhs < rhs,
            Self::LessEqual => lhs <= rhs,
            #[allow(clippy::float_cmp)]
            Self::Equal => lhs == rhs,
            Self::GreaterEqual => lhs >= rhs,
            Self::Greater => lhs > rhs,
        }
    }

    /// Canonical two-character token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Less => "<<",
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::GreaterEqual => ">=",
            Self::Greater => ">>",
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for Comparison {
    type Err = Error;

    /// Tokens must match exactly; surrounding whitespace is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "<<" | "<" => Ok(Self::Less),
            "<=" => Ok(Self::LessEqual),
            "==" => Ok(Self::Equal),
            ">=" => Ok(Self::GreaterEqual),
            ">>" | ">" => Ok(Self::Greater),
            other => Err(Error::InvalidCondition(other.to_string())),
        }
    }
}
