//! Immutable words and the involution algebra on them.
//!
//! A [`Word`] is a data container: every rewrite in this crate builds a fresh
//! word instead of editing one in place. The algebra consists of three
//! involutions:
//!
//! - [`switch`] exchanges `A↔B`, `+↔-` and `R↔L`, fixing `S` and the turn
//!   markers `a`, `v`; the lowercase side letters `r`, `l`, `s` are case
//!   markers and pass through unchanged
//! - [`reverse`] reverses the sequence
//! - [`invert`] is `reverse ∘ switch`, the walk traversed backwards
//!
//! ```
//! use folding_curves::word::{invert, Word};
//!
//! let w: Word = "A+B".parse().unwrap();
//! assert_eq!(invert(&w).to_string(), "A-B");
//! assert_eq!(invert(&invert(&w)), w);
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::{FoldingError, Result};
use crate::symbol::{Alphabet, Symbol};

/// An ordered sequence of symbols.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Word(Vec<Symbol>);

impl Word {
    /// The empty word.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// A word of one symbol.
    #[must_use]
    pub fn single(symbol: Symbol) -> Self {
        Self(vec![symbol])
    }

    /// Wraps an owned symbol vector.
    #[must_use]
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Parses a word and checks that every symbol lies in `alphabet`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidSymbol`] for an unknown character or one outside
    /// `alphabet`.
    pub fn parse_in(s: &str, alphabet: Alphabet) -> Result<Self> {
        let word: Word = s.parse()?;
        match word.0.iter().position(|sym| !alphabet.contains(*sym)) {
            Some(position) => Err(FoldingError::InvalidSymbol {
                symbol: word.0[position].as_char(),
                position,
            }),
            None => Ok(word),
        }
    }

    /// The symbols of this word.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    /// Number of symbols.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty word.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the symbols by value.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Symbol> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }

    /// First symbol, if any.
    #[must_use]
    pub fn first(&self) -> Option<Symbol> {
        self.0.first().copied()
    }

    /// Last symbol, if any.
    #[must_use]
    pub fn last(&self) -> Option<Symbol> {
        self.0.last().copied()
    }

    /// A new word made of `self` followed by `other`.
    #[must_use]
    pub fn concat(&self, other: &Word) -> Word {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&other.0);
        Word(out)
    }

    /// Occurrences of `symbol`.
    #[must_use]
    pub fn count(&self, symbol: Symbol) -> usize {
        self.0.iter().filter(|s| **s == symbol).count()
    }

    /// Occurrence count of every symbol, indexed by [`Symbol::index`].
    #[must_use]
    pub fn counts(&self) -> [usize; Symbol::COUNT] {
        let mut counts = [0usize; Symbol::COUNT];
        for s in &self.0 {
            counts[s.index()] += 1;
        }
        counts
    }

    /// True if every symbol belongs to `alphabet`.
    #[must_use]
    pub fn is_over(&self, alphabet: Alphabet) -> bool {
        self.0.iter().all(|s| alphabet.contains(*s))
    }

    /// Consumes the word and returns its symbols.
    #[must_use]
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.0
    }
}

impl FromStr for Word {
    type Err = FoldingError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(position, c)| Symbol::from_char(c, position))
            .collect::<Result<Vec<_>>>()
            .map(Word)
    }
}

impl FromIterator<Symbol> for Word {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Word(iter.into_iter().collect())
    }
}

impl From<Vec<Symbol>> for Word {
    fn from(symbols: Vec<Symbol>) -> Self {
        Word(symbols)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.as_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word(\"{}\")", self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Word {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Word {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Involutions
// ============================================================================

/// Switch a single symbol: `A↔B`, `+↔-`, `R↔L`; identity elsewhere,
/// including `r`, `l` and `s`.
#[must_use]
pub const fn switch_symbol(symbol: Symbol) -> Symbol {
    match symbol {
        Symbol::A => Symbol::B,
        Symbol::B => Symbol::A,
        Symbol::Plus => Symbol::Minus,
        Symbol::Minus => Symbol::Plus,
        Symbol::R => Symbol::L,
        Symbol::L => Symbol::R,
        other => other,
    }
}

/// Switch every symbol of `w`.
#[must_use]
pub fn switch(w: &Word) -> Word {
    w.iter().map(switch_symbol).collect()
}

/// Reverse the order of `w`.
#[must_use]
pub fn reverse(w: &Word) -> Word {
    w.iter().rev().collect()
}

/// `reverse(switch(w))`: the same walk traversed from its far end.
#[must_use]
pub fn invert(w: &Word) -> Word {
    w.iter().rev().map(switch_symbol).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn switch_primary() {
        assert_eq!(switch(&w("A+B-")), w("B-A+"));
    }

    #[test]
    fn switch_fixes_straights_and_markers() {
        assert_eq!(switch(&w("RLSavrls")), w("LRSavrls"));
    }

    #[test]
    fn switch_leaves_lowercase_side_letters() {
        assert_eq!(switch(&w("rls")), w("rls"));
        assert_eq!(invert(&w("Rrl")), w("lrL"));
    }

    #[test]
    fn invert_heighway_rule() {
        assert_eq!(invert(&w("A+B")), w("A-B"));
        assert_eq!(invert(&w("A+B-A")), w("B+A-B"));
    }

    #[test]
    fn parse_in_rejects_foreign_symbols() {
        assert_eq!(
            Word::parse_in("A+R", Alphabet::Primary),
            Err(FoldingError::InvalidSymbol {
                symbol: 'R',
                position: 2
            })
        );
        assert!(Word::parse_in("RaLvS", Alphabet::Intermediate).is_ok());
    }

    #[test]
    fn counts_and_concat() {
        let joined = w("A+").concat(&w("B"));
        assert_eq!(joined, w("A+B"));
        assert_eq!(joined.count(Symbol::Plus), 1);
        assert_eq!(joined.counts()[Symbol::A.index()], 1);
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(w("RrSsLl").to_string(), "RrSsLl");
    }
}
