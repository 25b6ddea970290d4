//! Error types for formula parsing and oxidation-number inference.
//!
//! Parsing failures are reported through [`ParseError`], which always carries
//! enough context to point at the offending part of the input. [`Error`] is
//! the crate-level error returned by the one-shot entry points.
//!
//! An unsolvable charge system is *not* an error: see
//! [`Solution::Unsolved`](crate::engine::Solution::Unsolved).

use thiserror::Error;

/// Errors produced while turning formula text into an atom-group tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained no element groups at all.
    #[error("formula contains no element groups")]
    EmptyInput,

    /// A character that belongs to no token of the formula grammar.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    /// A count that does not follow an element or a closing parenthesis.
    #[error("count '{text}' at position {pos} does not follow an element group")]
    DanglingCount { pos: usize, text: String },

    /// A count of zero, or one too large to represent.
    #[error("invalid count '{text}' at position {pos}")]
    InvalidCount { pos: usize, text: String },

    /// A `(` without a matching `)`.
    #[error("unclosed parenthesis at position {pos}")]
    UnclosedParen { pos: usize },

    /// A `)` without a matching `(`.
    #[error("unmatched closing parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },

    /// A parenthesized group with nothing inside it.
    #[error("empty group at position {pos}")]
    EmptyGroup { pos: usize },

    /// The charge annotation could not be read as an integer.
    #[error("invalid charge annotation '{0}'")]
    InvalidCharge(String),
}

/// Errors returned by the crate's top-level operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The formula text could not be parsed.
    #[error("failed to parse formula: {0}")]
    Parse(#[from] ParseError),

    /// A group built with a multiplicity of zero.
    #[error("group '{symbol}' has a count of zero")]
    ZeroCount {
        /// Symbol or label of the offending group.
        symbol: String,
    },

    /// Summing `count × oxidation number` left the `i32` range.
    #[error("charge arithmetic overflowed while balancing '{context}'")]
    ChargeOverflow {
        /// Label of the group level being balanced.
        context: String,
    },
}

impl Error {
    /// Creates a [`ChargeOverflow`](Error::ChargeOverflow) error.
    pub fn charge_overflow(context: impl Into<String>) -> Self {
        Self::ChargeOverflow {
            context: context.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
