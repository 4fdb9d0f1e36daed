//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building or applying folding substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldingError {
    /// The folding sequence or configuration was rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A character outside every curve alphabet.
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Character position in the input.
        position: usize,
    },

    /// The next word would be longer than the configured limit.
    ///
    /// `requested` saturates at `usize::MAX` when the exact length overflows.
    #[error("word of {requested} symbols exceeds the limit of {limit}")]
    ResourceLimitExceeded {
        /// Predicted length of the word that was refused.
        requested: usize,
        /// Configured maximum word length.
        limit: usize,
    },

    /// An invariant that should be unreachable did not hold.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, FoldingError>;
