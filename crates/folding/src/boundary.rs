//! Boundary substitution `P1`, derived from the folding rule `P0(A)`.
//!
//! The boundary of a folding curve subdivides self-similarly, and its
//! substitution can be read off the folding rule in five steps:
//!
//! 1. **Marking.** Rewrite `P0(A)` into the intermediate alphabet, once for
//!    each side ([`create_left`], [`create_right`]). Letters become corners
//!    and turns become the markers `a` (left turn) and `v` (right turn).
//! 2. **Reduction.** Collapse backtracking with a local rewriting system
//!    until no rule fires ([`reduce_backtracking`]).
//! 3. **Stripping.** Drop the remaining markers ([`remove_markers`]).
//! 4. **Parity seeds.** Read the first and last letters of `P0(A)`
//!    ([`initial_cases`]).
//! 5. **Case alternation.** Assign each corner to the even or odd side of the
//!    boundary loop ([`alternate_cases`]).
//!
//! # Reduction rules
//!
//! ```text
//! X v Y → Z       for X, Y ∈ {R, L, S}:
//!   RvR → S   LvL → S   RvL → v   LvR → v   SvS → v
//!   SvR → L   SvL → R   RvS → L   LvS → R
//! aa → a   vv → a   av → v   va → v
//! ```
//!
//! Every rule shortens the word, so the fixed point is reached after at most
//! `len + 1` passes.

use tracing::{debug, trace};

use crate::error::{FoldingError, Result};
use crate::limits::Limits;
use crate::substitution::SubstitutionTable;
use crate::symbol::Symbol;
use crate::word::{invert, Word};

// ============================================================================
// Marking
// ============================================================================

/// `A, B → R`, `+ → a`, `- → v`; identity elsewhere.
#[must_use]
pub fn create_left(p0a: &Word) -> Word {
    p0a.iter()
        .map(|s| match s {
            Symbol::A | Symbol::B => Symbol::R,
            Symbol::Plus => Symbol::LeftMarker,
            Symbol::Minus => Symbol::RightMarker,
            other => other,
        })
        .collect()
}

/// `A, B → L`, `+ → v`, `- → a`; identity elsewhere.
#[must_use]
pub fn create_right(p0a: &Word) -> Word {
    p0a.iter()
        .map(|s| match s {
            Symbol::A | Symbol::B => Symbol::L,
            Symbol::Plus => Symbol::RightMarker,
            Symbol::Minus => Symbol::LeftMarker,
            other => other,
        })
        .collect()
}

// ============================================================================
// Reduction
// ============================================================================

/// The `X v Y` rule for a pair of base-path letters.
const fn collapse_corner(x: Symbol, y: Symbol) -> Option<Symbol> {
    match (x, y) {
        (Symbol::R, Symbol::R) | (Symbol::L, Symbol::L) => Some(Symbol::S),
        (Symbol::R, Symbol::L) | (Symbol::L, Symbol::R) | (Symbol::S, Symbol::S) => {
            Some(Symbol::RightMarker)
        }
        (Symbol::S, Symbol::R) | (Symbol::R, Symbol::S) => Some(Symbol::L),
        (Symbol::S, Symbol::L) | (Symbol::L, Symbol::S) => Some(Symbol::R),
        _ => None,
    }
}

/// The two-marker rule.
const fn collapse_markers(x: Symbol, y: Symbol) -> Option<Symbol> {
    match (x, y) {
        (Symbol::LeftMarker, Symbol::LeftMarker) | (Symbol::RightMarker, Symbol::RightMarker) => {
            Some(Symbol::LeftMarker)
        }
        (Symbol::LeftMarker, Symbol::RightMarker) | (Symbol::RightMarker, Symbol::LeftMarker) => {
            Some(Symbol::RightMarker)
        }
        _ => None,
    }
}

/// One left-to-right pass of non-overlapping rewrites.
///
/// At each position the three-letter rule is tried before the marker rule.
/// Returns true if anything was rewritten.
fn reduce_pass(input: &[Symbol], out: &mut Vec<Symbol>) -> bool {
    out.clear();
    let mut changed = false;
    let mut i = 0;
    while i < input.len() {
        if let &[x, Symbol::RightMarker, y, ..] = &input[i..] {
            if let Some(z) = collapse_corner(x, y) {
                out.push(z);
                i += 3;
                changed = true;
                continue;
            }
        }
        if let &[x, y, ..] = &input[i..] {
            if let Some(z) = collapse_markers(x, y) {
                out.push(z);
                i += 2;
                changed = true;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    changed
}

/// Rewrites `w` to its normal form under the reduction rules.
///
/// # Errors
///
/// [`FoldingError::InternalInvariantViolation`] if the fixed point is not
/// reached within `len + 1` passes, which the length-decreasing rules rule
/// out.
///
/// ```
/// use folding_curves::boundary::reduce_backtracking;
/// use folding_curves::Word;
///
/// let w: Word = "RaRvS".parse().unwrap();
/// assert_eq!(reduce_backtracking(&w).unwrap().to_string(), "RaL");
/// ```
pub fn reduce_backtracking(w: &Word) -> Result<Word> {
    let cap = w.len() + 1;
    let mut current = w.as_slice().to_vec();
    let mut next = Vec::with_capacity(current.len());
    for pass in 1..=cap {
        if !reduce_pass(&current, &mut next) {
            debug!(passes = pass, length = current.len(), "reduction reached normal form");
            return Ok(Word::from_symbols(current));
        }
        trace!(pass, length = next.len(), "reduction pass");
        core::mem::swap(&mut current, &mut next);
    }
    Err(FoldingError::InternalInvariantViolation(format!(
        "reduction of a {}-symbol word did not terminate within {cap} passes",
        w.len()
    )))
}

/// Deletes the turn markers `a` and `v`, keeping only `R`, `L`, `S`.
#[must_use]
pub fn remove_markers(w: &Word) -> Word {
    w.iter().filter(|s| s.is_base_path()).collect()
}

// ============================================================================
// Case alternation
// ============================================================================

/// Side of the boundary loop a corner belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    /// Emitted uppercase.
    Even,
    /// Emitted lowercase.
    Odd,
}

impl Parity {
    /// The other parity.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    /// `0` for even, `1` for odd.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

/// Starting parities `(p0, p1)` read from `P0(A)`.
///
/// `p0` (used for `R`, `L`, `S`) is even when `P0(A)` starts with `A`;
/// `p1` (used for `r`, `l`, `s`) is odd when it ends with `A`.
#[must_use]
pub fn initial_cases(p0a: &Word) -> (Parity, Parity) {
    let p0 = if p0a.first() == Some(Symbol::A) {
        Parity::Even
    } else {
        Parity::Odd
    };
    let p1 = if p0a.last() == Some(Symbol::A) {
        Parity::Odd
    } else {
        Parity::Even
    };
    (p0, p1)
}

/// Cases a base path from `start`: uppercase while even, lowercase while
/// odd. `R` and `L` flip the parity after being emitted; `S` does not.
///
/// ```
/// use folding_curves::boundary::{alternate_cases, Parity};
/// use folding_curves::Word;
///
/// let base: Word = "RSLR".parse().unwrap();
/// assert_eq!(alternate_cases(Parity::Even, &base).to_string(), "RslR");
/// ```
#[must_use]
pub fn alternate_cases(start: Parity, base: &Word) -> Word {
    base.iter()
        .scan(start, |parity, s| {
            let cased = match parity {
                Parity::Even => s,
                Parity::Odd => s.to_lowercase(),
            };
            if matches!(s, Symbol::R | Symbol::L) {
                *parity = parity.flipped();
            }
            Some(cased)
        })
        .collect()
}

// ============================================================================
// P1
// ============================================================================

/// The boundary substitution over `{R, L, S, r, l, s}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMorphism {
    table: SubstitutionTable,
    parities: (Parity, Parity),
}

impl BoundaryMorphism {
    /// Derives `P1` from `P0(A)`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InternalInvariantViolation`] if a reduction fails to
    /// terminate.
    pub fn derive(p0a: &Word) -> Result<Self> {
        let right_reduced = reduce_backtracking(&create_left(p0a))?;
        let left_reduced = reduce_backtracking(&create_right(p0a))?;
        let right_inverted = invert(&right_reduced);
        let left_inverted = invert(&left_reduced);
        let (p0, p1) = initial_cases(p0a);

        let image_r = alternate_cases(p0, &remove_markers(&right_reduced));
        let image_l = alternate_cases(p0, &remove_markers(&left_reduced));
        let image_lower_r = alternate_cases(p1, &remove_markers(&left_inverted));
        let image_lower_l = alternate_cases(p1, &remove_markers(&right_inverted));

        let turn = Word::single(Symbol::RightMarker);
        let straight = reduce_backtracking(&right_reduced.concat(&turn).concat(&left_inverted))?;
        let image_s = alternate_cases(p0, &remove_markers(&straight));
        let straight = reduce_backtracking(&left_inverted.concat(&turn).concat(&right_reduced))?;
        let image_lower_s = alternate_cases(p1, &remove_markers(&straight));

        debug!(
            p0a = %p0a,
            r = image_r.len(),
            l = image_l.len(),
            s = image_s.len(),
            lower_r = image_lower_r.len(),
            lower_l = image_lower_l.len(),
            lower_s = image_lower_s.len(),
            "derived boundary morphism"
        );

        let table = SubstitutionTable::identity()
            .with(Symbol::R, image_r)
            .with(Symbol::L, image_l)
            .with(Symbol::S, image_s)
            .with(Symbol::LowerR, image_lower_r)
            .with(Symbol::LowerL, image_lower_l)
            .with(Symbol::LowerS, image_lower_s);
        Ok(Self {
            table,
            parities: (p0, p1),
        })
    }

    /// `P1(symbol)`.
    #[must_use]
    pub fn image(&self, symbol: Symbol) -> &Word {
        self.table.image(symbol)
    }

    /// The parity seeds `(p0, p1)` the table was built with.
    #[must_use]
    pub fn parities(&self) -> (Parity, Parity) {
        self.parities
    }

    /// The underlying table.
    #[must_use]
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// One application of `P1`.
    #[must_use]
    pub fn apply(&self, word: &Word) -> Word {
        self.table.apply(word)
    }

    /// `P1^n(seed)` under `limits`, stopping early at a fixed point.
    ///
    /// # Errors
    ///
    /// [`FoldingError::ResourceLimitExceeded`] if a step would exceed the
    /// configured word length.
    pub fn iterate(&self, seed: &Word, n: usize, limits: Limits) -> Result<Word> {
        let mut word = seed.clone();
        for step in 1..=n {
            let next = self.table.apply_bounded(&word, limits.max_word_length)?;
            if next == word {
                debug!(generation = step, length = word.len(), "reached fixed point");
                break;
            }
            word = next;
            debug!(generation = step, length = word.len(), "applied boundary morphism");
        }
        Ok(word)
    }
}
