//! Folding curves by word rewriting.
//!
//! A folding sequence such as `+` (Heighway's dragon) or `+-+` determines a
//! substitution `P0` on the alphabet `{A, B, +, -}`. Iterating it from `A`
//! yields the words of a self-similar plane curve. The same rule also
//! determines a substitution `P1` on `{R, L, S, r, l, s}` that generates the
//! curve's left and right boundaries, derived by a terminating local
//! rewriting system in the style of Verrill's boundary L-systems.
//!
//! # Entry Point
//!
//! ```
//! use folding_curves::FoldingCurve;
//!
//! let dragon = FoldingCurve::parse("+").unwrap();
//! assert_eq!(dragon.generation(2).unwrap().to_string(), "A+B+A-B");
//!
//! let p1 = dragon.boundary_morphism().unwrap();
//! assert_eq!(p1.apply(&"R".parse().unwrap()).to_string(), "Rr");
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`word`] | words and the `switch` / `reverse` / `invert` involutions |
//! | [`morphism`] | `P0` and its iteration |
//! | [`boundary`] | reduction, case alternation and `P1` |
//! | [`matrix`] | adjacency matrices and their Perron root |
//! | [`geometry`] | lattice walks and path layout |
//! | [`scene`] | curve and boundaries at a stable size |
//!
//! Everything is a pure function of immutable words. Derived tables are
//! computed once per [`FoldingCurve`] and only read afterwards, so a curve
//! can be shared between threads.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::sync::OnceLock;

use tracing::debug;

pub mod boundary;
pub mod error;
pub mod geometry;
pub mod limits;
pub mod matrix;
pub mod morphism;
pub mod scene;
pub mod sequence;
pub mod substitution;
pub mod symbol;
pub mod word;

pub use boundary::{BoundaryMorphism, Parity};
pub use error::{FoldingError, Result};
pub use geometry::{LatticeVector, Path, Point, ScaleRotation, Style};
pub use limits::{CurveConfig, Limits};
pub use matrix::AdjacencyMatrix;
pub use morphism::{FoldingApplier, FoldingMorphism};
pub use scene::{Scene, SceneOptions};
pub use sequence::{Fold, FoldingSequence};
pub use substitution::SubstitutionTable;
pub use symbol::{Alphabet, Symbol};
pub use word::Word;

/// A folding curve family with its derived substitutions.
///
/// `P0` is built eagerly; `P1` on first use.
#[derive(Debug)]
pub struct FoldingCurve {
    sequence: FoldingSequence,
    limits: Limits,
    morphism: FoldingMorphism,
    boundary: OnceLock<BoundaryMorphism>,
}

impl FoldingCurve {
    /// Builds the curve family of `sequence`.
    #[must_use]
    pub fn new(sequence: FoldingSequence, limits: Limits) -> Self {
        let morphism = FoldingMorphism::new(&sequence);
        debug!(
            sequence = %sequence,
            rule_a = %morphism.rule_a(),
            rule_b = %morphism.rule_b(),
            "built folding morphism"
        );
        Self {
            sequence,
            limits,
            morphism,
            boundary: OnceLock::new(),
        }
    }

    /// Parses a sequence literal and uses default limits.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] for an empty or malformed
    /// sequence.
    pub fn parse(sequence: &str) -> Result<Self> {
        Ok(Self::new(sequence.parse()?, Limits::default()))
    }

    /// Builds from a configuration record.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] for an empty or malformed
    /// sequence, or a zero word-length limit.
    pub fn from_config(config: &CurveConfig) -> Result<Self> {
        if config.limits.max_word_length == 0 {
            return Err(FoldingError::InvalidConfiguration(
                "max_word_length must be positive".into(),
            ));
        }
        Ok(Self::new(config.folding_sequence()?, config.limits))
    }

    /// The folding sequence.
    #[must_use]
    pub fn sequence(&self) -> &FoldingSequence {
        &self.sequence
    }

    /// The resource limits.
    #[must_use]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// `P0`.
    #[must_use]
    pub fn morphism(&self) -> &FoldingMorphism {
        &self.morphism
    }

    /// `P0(A)`.
    #[must_use]
    pub fn rule_a(&self) -> &Word {
        self.morphism.rule_a()
    }

    /// `P0(B)`.
    #[must_use]
    pub fn rule_b(&self) -> &Word {
        self.morphism.rule_b()
    }

    /// One application of `P0`.
    #[must_use]
    pub fn folding_morphism(&self, word: &Word) -> Word {
        self.morphism.apply(word)
    }

    /// An applier bound to this curve's limits.
    #[must_use]
    pub fn applier(&self) -> FoldingApplier<'_> {
        FoldingApplier::new(&self.morphism, self.limits)
    }

    /// `P0^n(A)`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::ResourceLimitExceeded`] if the word would be too long.
    pub fn generation(&self, n: usize) -> Result<Word> {
        self.applier().generation(n)
    }

    /// `P1`, derived on first call and cached.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InternalInvariantViolation`] if reduction does not
    /// terminate.
    pub fn boundary_morphism(&self) -> Result<&BoundaryMorphism> {
        if let Some(p1) = self.boundary.get() {
            return Ok(p1);
        }
        let p1 = BoundaryMorphism::derive(self.rule_a())?;
        Ok(self.boundary.get_or_init(|| p1))
    }

    /// `P1^n(seed)`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidSymbol`] if `seed` is not a boundary letter,
    /// and the errors of [`boundary_morphism`](Self::boundary_morphism) and
    /// [`BoundaryMorphism::iterate`].
    pub fn boundary_word(&self, seed: Symbol, n: usize) -> Result<Word> {
        if !seed.is_boundary() {
            return Err(FoldingError::InvalidSymbol {
                symbol: seed.as_char(),
                position: 0,
            });
        }
        self.boundary_morphism()?
            .iterate(&Word::single(seed), n, self.limits)
    }

    /// Generation-`n` right boundary, `P1^n(R)`.
    ///
    /// # Errors
    ///
    /// As for [`boundary_word`](Self::boundary_word).
    pub fn right_boundary(&self, n: usize) -> Result<Word> {
        self.boundary_word(Symbol::R, n)
    }

    /// Generation-`n` left boundary, `P1^n(L)`.
    ///
    /// # Errors
    ///
    /// As for [`boundary_word`](Self::boundary_word).
    pub fn left_boundary(&self, n: usize) -> Result<Word> {
        self.boundary_word(Symbol::L, n)
    }

    /// Adjacency matrix of `P1` over `vertices`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] for an invalid vertex set, and
    /// the errors of [`boundary_morphism`](Self::boundary_morphism).
    pub fn boundary_morphism_adjacency_matrix(&self, vertices: &[Symbol]) -> Result<AdjacencyMatrix> {
        AdjacencyMatrix::from_morphism(self.boundary_morphism()?, vertices)
    }

    /// `end_word(P0(A))`, the Gaussian integer `z` of one generation.
    #[must_use]
    pub fn end_vector(&self) -> LatticeVector {
        geometry::end_word(self.rule_a())
    }

    /// `|z|` and `arg z`.
    #[must_use]
    pub fn scale_rotation(&self) -> ScaleRotation {
        ScaleRotation::from_vector(self.end_vector())
    }

    /// Similarity dimension of the boundary, `ln ρ / ln |z|`, where `ρ` is
    /// the Perron root of the adjacency matrix over `vertices`.
    ///
    /// `None` when `ρ` is undefined or the curve does not contract
    /// (`|z| ≤ 1`).
    ///
    /// # Errors
    ///
    /// As for
    /// [`boundary_morphism_adjacency_matrix`](Self::boundary_morphism_adjacency_matrix).
    pub fn boundary_dimension(&self, vertices: &[Symbol]) -> Result<Option<f64>> {
        let scale = self.scale_rotation().scale;
        if scale <= 1.0 {
            return Ok(None);
        }
        let matrix = self.boundary_morphism_adjacency_matrix(vertices)?;
        Ok(matrix
            .spectral_radius()
            .filter(|rho| *rho > 0.0)
            .map(|rho| rho.ln() / scale.ln()))
    }
}
