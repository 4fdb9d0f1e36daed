//! Context-free substitution tables.
//!
//! A [`SubstitutionTable`] maps every [`Symbol`] to a replacement [`Word`].
//! It starts as the identity and individual images are overridden, so the
//! mapping is total by construction. Applying it is one left-to-right pass.

use crate::error::{FoldingError, Result};
use crate::symbol::Symbol;
use crate::word::Word;

/// Total map from symbols to replacement words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    images: [Word; Symbol::COUNT],
}

impl SubstitutionTable {
    /// The identity substitution.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            images: Symbol::ALL.map(Word::single),
        }
    }

    /// Returns a copy of this table with `symbol` rewritten to `image`.
    #[must_use]
    pub fn with(mut self, symbol: Symbol, image: Word) -> Self {
        self.images[symbol.index()] = image;
        self
    }

    /// The image of `symbol`.
    #[inline]
    #[must_use]
    pub fn image(&self, symbol: Symbol) -> &Word {
        &self.images[symbol.index()]
    }

    /// Length of the word `apply(word)` would produce, or `None` on overflow.
    #[must_use]
    pub fn image_len(&self, word: &Word) -> Option<usize> {
        let counts = word.counts();
        Symbol::ALL.iter().try_fold(0usize, |acc, s| {
            counts[s.index()]
                .checked_mul(self.image(*s).len())
                .and_then(|n| acc.checked_add(n))
        })
    }

    /// Replaces every symbol of `word` by its image.
    #[must_use]
    pub fn apply(&self, word: &Word) -> Word {
        let len = self.image_len(word).unwrap_or(0);
        let mut out = Vec::with_capacity(len);
        for s in word.iter() {
            out.extend_from_slice(self.image(s).as_slice());
        }
        Word::from_symbols(out)
    }

    /// [`apply`](Self::apply), refusing results longer than `limit`.
    ///
    /// The length is computed from symbol counts before anything is allocated.
    ///
    /// # Errors
    ///
    /// [`FoldingError::ResourceLimitExceeded`] if the image would hold more
    /// than `limit` symbols.
    pub fn apply_bounded(&self, word: &Word, limit: usize) -> Result<Word> {
        let requested = self.image_len(word).unwrap_or(usize::MAX);
        if requested > limit {
            return Err(FoldingError::ResourceLimitExceeded { requested, limit });
        }
        Ok(self.apply(word))
    }

    /// `(symbol, image)` pairs for every symbol not mapped to itself.
    pub fn rewritten(&self) -> impl Iterator<Item = (Symbol, &Word)> + '_ {
        Symbol::ALL.iter().filter_map(move |s| {
            let image = self.image(*s);
            (image.as_slice() != [*s]).then_some((*s, image))
        })
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::identity()
    }
}
