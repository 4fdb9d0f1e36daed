//! Folding sequences: the single configuration input of a curve family.
//!
//! A sequence is a non-empty list of fold directions. It can be written as
//! the bare folds (`"+"`, `"+-+"`) or in the expanded form of its first rule
//! (`"A+B"`, `"A+B-A+B"`), in which letters alternate `A, B, A, …` and one
//! fold sits between consecutive letters.

use core::fmt;
use core::str::FromStr;

use crate::error::{FoldingError, Result};
use crate::symbol::Symbol;

/// One binary folding choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fold {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl Fold {
    /// The turn symbol for this fold.
    #[must_use]
    pub const fn symbol(self) -> Symbol {
        match self {
            Fold::Plus => Symbol::Plus,
            Fold::Minus => Symbol::Minus,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Fold::Plus),
            '-' => Some(Fold::Minus),
            _ => None,
        }
    }
}

/// A validated, non-empty sequence of folds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FoldingSequence {
    folds: Vec<Fold>,
}

impl FoldingSequence {
    /// Builds a sequence from explicit folds.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] if `folds` is empty.
    pub fn new(folds: Vec<Fold>) -> Result<Self> {
        if folds.is_empty() {
            return Err(FoldingError::InvalidConfiguration(
                "folding sequence is empty".into(),
            ));
        }
        Ok(Self { folds })
    }

    /// The Heighway dragon, `+`.
    #[must_use]
    pub fn heighway() -> Self {
        Self {
            folds: vec![Fold::Plus],
        }
    }

    /// The folds, in order.
    #[must_use]
    pub fn folds(&self) -> &[Fold] {
        &self.folds
    }

    /// Number of folds `m`; the first rule has `m + 1` letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.folds.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    fn parse_expanded(s: &str) -> Result<Vec<Fold>> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 3 || chars.len() % 2 == 0 {
            return Err(FoldingError::InvalidConfiguration(format!(
                "expanded rule \"{s}\" must have the form A?B?A… with at least one fold"
            )));
        }
        let mut folds = Vec::with_capacity(chars.len() / 2);
        for (i, c) in chars.iter().enumerate() {
            if i % 2 == 0 {
                let expected = if (i / 2) % 2 == 0 { 'A' } else { 'B' };
                if *c != expected {
                    return Err(FoldingError::InvalidConfiguration(format!(
                        "expanded rule \"{s}\": expected '{expected}' at position {i}, found '{c}'"
                    )));
                }
            } else {
                let fold = Fold::from_char(*c).ok_or_else(|| {
                    FoldingError::InvalidConfiguration(format!(
                        "expanded rule \"{s}\": expected '+' or '-' at position {i}, found '{c}'"
                    ))
                })?;
                folds.push(fold);
            }
        }
        Ok(folds)
    }
}

impl FromStr for FoldingSequence {
    type Err = FoldingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(FoldingError::InvalidConfiguration(
                "folding sequence is empty".into(),
            ));
        }
        let folds = if s.starts_with('A') {
            Self::parse_expanded(s)?
        } else {
            s.chars()
                .enumerate()
                .map(|(i, c)| {
                    Fold::from_char(c).ok_or_else(|| {
                        FoldingError::InvalidConfiguration(format!(
                            "invalid fold '{c}' at position {i}; folds are '+' or '-'"
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };
        Self::new(folds)
    }
}

impl fmt::Display for FoldingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fold in &self.folds {
            write!(f, "{}", fold.symbol())?;
        }
        Ok(())
    }
}
