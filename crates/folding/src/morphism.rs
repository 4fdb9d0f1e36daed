//! The primary folding substitution `P0` and its iteration.
//!
//! For a folding sequence `σ_0 … σ_{m-1}` the image of `A` interleaves the
//! folds with alternating letters:
//!
//! ```text
//! P0(A) = A σ_0 B σ_1 A σ_2 B …      (m + 1 letters)
//! P0(B) = invert(P0(A))
//! ```
//!
//! Turns are fixed points of `P0`. Keeping `P0(B)` the involutive dual of
//! `P0(A)` is what makes the generated curve self-similar; the boundary
//! derivation in [`crate::boundary`] depends on it.

use tracing::debug;

use crate::error::Result;
use crate::limits::Limits;
use crate::sequence::FoldingSequence;
use crate::substitution::SubstitutionTable;
use crate::symbol::Symbol;
use crate::word::{invert, Word};

/// Builds `P0(A)` from a folding sequence.
///
/// ```
/// use folding_curves::morphism::rule_a;
/// use folding_curves::FoldingSequence;
///
/// let seq: FoldingSequence = "+-".parse().unwrap();
/// assert_eq!(rule_a(&seq).to_string(), "A+B-A");
/// ```
#[must_use]
pub fn rule_a(sequence: &FoldingSequence) -> Word {
    let mut symbols = Vec::with_capacity(2 * sequence.len() + 1);
    symbols.push(Symbol::A);
    for (i, fold) in sequence.folds().iter().enumerate() {
        symbols.push(fold.symbol());
        symbols.push(if i % 2 == 0 { Symbol::B } else { Symbol::A });
    }
    Word::from_symbols(symbols)
}

/// The primary substitution `P0 = {A → rule_A, B → rule_B}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldingMorphism {
    rule_a: Word,
    rule_b: Word,
    table: SubstitutionTable,
}

impl FoldingMorphism {
    /// Derives `P0` from `sequence`.
    #[must_use]
    pub fn new(sequence: &FoldingSequence) -> Self {
        let rule_a = rule_a(sequence);
        let rule_b = invert(&rule_a);
        let table = SubstitutionTable::identity()
            .with(Symbol::A, rule_a.clone())
            .with(Symbol::B, rule_b.clone());
        Self {
            rule_a,
            rule_b,
            table,
        }
    }

    /// `P0(A)`.
    #[must_use]
    pub fn rule_a(&self) -> &Word {
        &self.rule_a
    }

    /// `P0(B) = invert(P0(A))`.
    #[must_use]
    pub fn rule_b(&self) -> &Word {
        &self.rule_b
    }

    /// The full substitution table, identity on every non-letter.
    #[must_use]
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// One application of `P0` to `word`.
    #[must_use]
    pub fn apply(&self, word: &Word) -> Word {
        self.table.apply(word)
    }
}

/// Iterates `P0` under a word-length limit.
#[derive(Debug, Clone, Copy)]
pub struct FoldingApplier<'a> {
    morphism: &'a FoldingMorphism,
    limits: Limits,
}

impl<'a> FoldingApplier<'a> {
    /// Wraps `morphism` with `limits`.
    #[must_use]
    pub fn new(morphism: &'a FoldingMorphism, limits: Limits) -> Self {
        Self { morphism, limits }
    }

    /// `P0^n(A)`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::ResourceLimitExceeded`](crate::FoldingError::ResourceLimitExceeded)
    /// if any intermediate generation would exceed the configured length.
    pub fn generation(&self, n: usize) -> Result<Word> {
        self.iterate(&Word::single(Symbol::A), n)
    }

    /// `P0^n(seed)` for any primary-alphabet seed.
    ///
    /// Stops early once a step leaves the word unchanged, so seeds without
    /// letters return at once for any `n`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::ResourceLimitExceeded`](crate::FoldingError::ResourceLimitExceeded)
    /// as for [`generation`](Self::generation).
    pub fn iterate(&self, seed: &Word, n: usize) -> Result<Word> {
        let mut word = seed.clone();
        for step in 1..=n {
            let next = self
                .morphism
                .table()
                .apply_bounded(&word, self.limits.max_word_length)?;
            if next == word {
                debug!(generation = step, length = word.len(), "reached fixed point");
                break;
            }
            word = next;
            debug!(generation = step, length = word.len(), "applied folding morphism");
        }
        Ok(word)
    }
}
