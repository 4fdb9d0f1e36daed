//! Resource limits and the curve configuration record.

use crate::error::Result;
use crate::sequence::FoldingSequence;

/// Default maximum word length: 2^24 symbols.
pub const DEFAULT_MAX_WORD_LENGTH: usize = 1 << 24;

/// Bounds applied to every iterated substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Largest word any generation step may produce.
    pub max_word_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        }
    }
}

/// Everything needed to build a [`FoldingCurve`](crate::FoldingCurve).
///
/// With the `serde` feature this deserializes from e.g. TOML:
///
/// ```toml
/// sequence = "+-+"
///
/// [limits]
/// max_word_length = 1000000
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurveConfig {
    /// Folding sequence literal, bare (`+-`) or expanded (`A+B-A`).
    pub sequence: String,
    /// Resource limits.
    pub limits: Limits,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sequence: "+".into(),
            limits: Limits::default(),
        }
    }
}

impl CurveConfig {
    /// Parses the configured sequence.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`](crate::FoldingError::InvalidConfiguration)
    /// if the literal is not a valid folding sequence.
    pub fn folding_sequence(&self) -> Result<FoldingSequence> {
        self.sequence.parse()
    }
}
