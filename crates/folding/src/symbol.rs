//! Symbols and the three closed alphabets they belong to.
//!
//! | Alphabet | Symbols | Role |
//! |----------|---------|------|
//! | Primary | `A B + -` | folding curve on the square grid |
//! | Intermediate | `R L S a v` | boundary before reduction (`a`/`v` are turn markers) |
//! | Boundary | `R L S r l s` | boundary on the mid grid (case encodes the side) |
//!
//! A single [`Symbol`] enum covers all of them so that substitution tables can
//! be total over every symbol; [`Alphabet`] answers membership questions.

use core::fmt;

use crate::error::{FoldingError, Result};

/// One letter of a curve word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// `A`: unit step, even letter.
    A,
    /// `B`: unit step, odd letter.
    B,
    /// `+`: quarter turn counter-clockwise.
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Plus,
    /// `-`: quarter turn clockwise.
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Minus,
    /// `R`: corner turning with `+`, even side.
    R,
    /// `L`: corner turning with `-`, even side.
    L,
    /// `S`: straight diagonal, even side.
    S,
    /// `r`: corner turning with `+`, odd side.
    #[cfg_attr(feature = "serde", serde(rename = "r"))]
    LowerR,
    /// `l`: corner turning with `-`, odd side.
    #[cfg_attr(feature = "serde", serde(rename = "l"))]
    LowerL,
    /// `s`: straight diagonal, odd side.
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    LowerS,
    /// `a`: left-turn marker, only present before reduction.
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    LeftMarker,
    /// `v`: right-turn marker, only present before reduction.
    #[cfg_attr(feature = "serde", serde(rename = "v"))]
    RightMarker,
}

impl Symbol {
    /// Number of distinct symbols.
    pub const COUNT: usize = 12;

    /// Every symbol, in [`Symbol::index`] order.
    pub const ALL: [Symbol; Self::COUNT] = [
        Symbol::A,
        Symbol::B,
        Symbol::Plus,
        Symbol::Minus,
        Symbol::R,
        Symbol::L,
        Symbol::S,
        Symbol::LowerR,
        Symbol::LowerL,
        Symbol::LowerS,
        Symbol::LeftMarker,
        Symbol::RightMarker,
    ];

    /// Dense index in `0..COUNT`, used by table lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The character this symbol is written as.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::R => 'R',
            Symbol::L => 'L',
            Symbol::S => 'S',
            Symbol::LowerR => 'r',
            Symbol::LowerL => 'l',
            Symbol::LowerS => 's',
            Symbol::LeftMarker => 'a',
            Symbol::RightMarker => 'v',
        }
    }

    /// Parses a single character.
    ///
    /// # Errors
    ///
    /// Returns [`FoldingError::InvalidSymbol`] if `c` is not in any alphabet;
    /// `position` is reported back in the error.
    pub fn from_char(c: char, position: usize) -> Result<Self> {
        Ok(match c {
            'A' => Symbol::A,
            'B' => Symbol::B,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            'R' => Symbol::R,
            'L' => Symbol::L,
            'S' => Symbol::S,
            'r' => Symbol::LowerR,
            'l' => Symbol::LowerL,
            's' => Symbol::LowerS,
            'a' => Symbol::LeftMarker,
            'v' => Symbol::RightMarker,
            _ => {
                return Err(FoldingError::InvalidSymbol {
                    symbol: c,
                    position,
                })
            }
        })
    }

    /// `A` or `B`.
    #[inline]
    #[must_use]
    pub const fn is_letter(self) -> bool {
        matches!(self, Symbol::A | Symbol::B)
    }

    /// `+` or `-`.
    #[inline]
    #[must_use]
    pub const fn is_turn(self) -> bool {
        matches!(self, Symbol::Plus | Symbol::Minus)
    }

    /// `a` or `v`.
    #[inline]
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Symbol::LeftMarker | Symbol::RightMarker)
    }

    /// Uppercase `R`, `L` or `S`.
    #[inline]
    #[must_use]
    pub const fn is_base_path(self) -> bool {
        matches!(self, Symbol::R | Symbol::L | Symbol::S)
    }

    /// Any of `R L S r l s`.
    #[inline]
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(
            self,
            Symbol::R | Symbol::L | Symbol::S | Symbol::LowerR | Symbol::LowerL | Symbol::LowerS
        )
    }

    /// Lowercase boundary letter (odd side).
    #[inline]
    #[must_use]
    pub const fn is_lowercase(self) -> bool {
        matches!(self, Symbol::LowerR | Symbol::LowerL | Symbol::LowerS)
    }

    /// Lowercase form of a boundary letter; identity on everything else.
    #[must_use]
    pub const fn to_lowercase(self) -> Self {
        match self {
            Symbol::R => Symbol::LowerR,
            Symbol::L => Symbol::LowerL,
            Symbol::S => Symbol::LowerS,
            other => other,
        }
    }

    /// Uppercase form of a boundary letter; identity on everything else.
    #[must_use]
    pub const fn to_uppercase(self) -> Self {
        match self {
            Symbol::LowerR => Symbol::R,
            Symbol::LowerL => Symbol::L,
            Symbol::LowerS => Symbol::S,
            other => other,
        }
    }

    /// Orientation-reversed twin on the boundary alphabet:
    /// `R↔l`, `L↔r`, `S↔S`, `s↔s`. Identity elsewhere.
    #[must_use]
    pub const fn twin(self) -> Self {
        match self {
            Symbol::R => Symbol::LowerL,
            Symbol::LowerL => Symbol::R,
            Symbol::L => Symbol::LowerR,
            Symbol::LowerR => Symbol::L,
            other => other,
        }
    }

    /// Signed quarter turns contributed to a walk: `+1` for `+`, `-1` for `-`.
    #[inline]
    #[must_use]
    pub const fn quarter_turns(self) -> i8 {
        match self {
            Symbol::Plus => 1,
            Symbol::Minus => -1,
            _ => 0,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The closed alphabets a word can be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alphabet {
    /// `{A, B, +, -}`
    Primary,
    /// `{R, L, S, a, v}`
    Intermediate,
    /// `{R, L, S, r, l, s}`
    Boundary,
}

impl Alphabet {
    /// Returns true if `symbol` belongs to this alphabet.
    #[must_use]
    pub const fn contains(self, symbol: Symbol) -> bool {
        match self {
            Alphabet::Primary => symbol.is_letter() || symbol.is_turn(),
            Alphabet::Intermediate => symbol.is_base_path() || symbol.is_marker(),
            Alphabet::Boundary => symbol.is_boundary(),
        }
    }

    /// The members of this alphabet.
    #[must_use]
    pub fn symbols(self) -> Vec<Symbol> {
        Symbol::ALL
            .into_iter()
            .filter(|s| self.contains(*s))
            .collect()
    }

    /// Human-readable name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Alphabet::Primary => "primary",
            Alphabet::Intermediate => "intermediate",
            Alphabet::Boundary => "boundary",
        }
    }
}
