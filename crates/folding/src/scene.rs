//! Generation-`n` curve and boundaries, laid out at a stable size.
//!
//! The curve word grows by `z = end_word(P0(A))` per generation. Dividing the
//! step by `|z|^n` and turning the initial heading by `−n·arg z` keeps the
//! drawing between the same two endpoints `(0, 0)` and `(step, 0)` for every
//! `n`, with the boundaries running alongside.

use tracing::debug;

use crate::error::{FoldingError, Result};
use crate::geometry::{mid_grid_path, square_grid_path, Path, ScaleRotation, Style};
use crate::symbol::Symbol;
use crate::FoldingCurve;

/// Initial boundary headings (degrees) before the per-generation rotation.
///
/// The right boundary starts at −45° and the left at +45° when the curve
/// word starts with `A`; a curve starting with `B` is the mirror case,
/// −135° and −45°.
#[must_use]
pub fn boundary_headings(first: Option<Symbol>) -> (f64, f64) {
    if first == Some(Symbol::B) {
        (-135.0, -45.0)
    } else {
        (-45.0, 45.0)
    }
}

/// What to lay out and how to style it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneOptions {
    /// Distance between the endpoints of the whole curve.
    pub step: f64,
    /// Lay out the curve itself.
    pub draw_curve: bool,
    /// Lay out both boundaries.
    pub draw_boundary: bool,
    /// Curve style.
    pub curve: Style,
    /// Right boundary style (seed `R`).
    pub right_boundary: Style,
    /// Left boundary style (seed `L`).
    pub left_boundary: Style,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            step: 12.0,
            draw_curve: true,
            draw_boundary: false,
            curve: Style::default(),
            right_boundary: Style {
                colour: "#1e90ff".into(),
                width: 3.0,
                ..Style::default()
            },
            left_boundary: Style {
                colour: "#ff6b6b".into(),
                width: 3.0,
                ..Style::default()
            },
        }
    }
}

/// Paths handed to an external renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scene {
    /// Generation index.
    pub generation: usize,
    /// Folding sequence, bare form.
    pub sequence: String,
    /// Growth factor of one generation.
    pub factor: ScaleRotation,
    /// Physical length of one grid step at this generation.
    pub grid_step: f64,
    /// The curve, drawn first-to-last.
    pub curve: Option<Path>,
    /// Boundary generated from `R`.
    pub right_boundary: Option<Path>,
    /// Boundary generated from `L`.
    pub left_boundary: Option<Path>,
}

impl FoldingCurve {
    /// Lays out generation `n`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] if `n > 0` and `P0(A)` is a
    /// closed loop (`z = 0`), [`FoldingError::ResourceLimitExceeded`] if a
    /// requested word is too long, or
    /// [`FoldingError::InternalInvariantViolation`] from the boundary
    /// derivation.
    pub fn scene(&self, n: usize, options: &SceneOptions) -> Result<Scene> {
        let factor = self.scale_rotation();
        if n > 0 && factor.scale == 0.0 {
            return Err(FoldingError::InvalidConfiguration(format!(
                "sequence {} closes on itself and cannot be scaled",
                self.sequence()
            )));
        }
        let grid_step = factor.step_for_generation(options.step, n);
        let heading = factor.heading_for_generation(0.0, n);

        let word = self.generation(n)?;
        let curve = options
            .draw_curve
            .then(|| square_grid_path(&word, grid_step, heading, &options.curve));

        let (right_boundary, left_boundary) = if options.draw_boundary {
            let (right_base, left_base) = boundary_headings(word.first());
            let right = self.right_boundary(n)?;
            let left = self.left_boundary(n)?;
            (
                Some(mid_grid_path(
                    &right,
                    grid_step,
                    factor.heading_for_generation(right_base, n),
                    &options.right_boundary,
                )),
                Some(mid_grid_path(
                    &left,
                    grid_step,
                    factor.heading_for_generation(left_base, n),
                    &options.left_boundary,
                )),
            )
        } else {
            (None, None)
        };

        debug!(
            generation = n,
            curve_symbols = word.len(),
            grid_step,
            "laid out scene"
        );

        Ok(Scene {
            generation: n,
            sequence: self.sequence().to_string(),
            factor,
            grid_step,
            curve,
            right_boundary,
            left_boundary,
        })
    }
}
