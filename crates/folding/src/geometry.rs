//! From words to planar paths.
//!
//! Two walks share one convention: headings are measured counter-clockwise
//! from the +x axis, `+` turns the heading by +90° and `-` by −90°.
//!
//! - The **square grid** draws primary words: `A`/`B` move one step along the
//!   current axis, `+`/`-` turn.
//! - The **mid grid** draws boundary words on the diagonals of the square
//!   grid: `R`/`r` are a half step, a quarter turn in the sense of `+`, and a
//!   half step; `L`/`l` the same with the opposite turn; `S`/`s` a straight
//!   segment. Every symbol covers `step·√2`. Case is carried on each segment
//!   for styling and has no effect on geometry.
//!
//! Corners can be rounded: a sharp turn is replaced by a quarter circle of
//! radius `corner_fraction × segment length`, and the straights around it are
//! shortened so that every path ends exactly where its sharp version does.
//!
//! The net displacement of a primary word under the unit walk is a
//! [`LatticeVector`]. For `P0(A)` it is the complex factor `z` by which each
//! generation grows and turns, so generation `n` is drawn at a stable size
//! with step `step / |z|^n` and initial heading `−n·arg z`.

use core::f64::consts::SQRT_2;

use crate::symbol::Symbol;
use crate::word::Word;

const EPSILON: f64 = 1e-12;

// ============================================================================
// Lattice vectors
// ============================================================================

/// Integer displacement on the square grid, read as the Gaussian integer
/// `x + iy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeVector {
    /// Real part.
    pub x: i64,
    /// Imaginary part.
    pub y: i64,
}

impl LatticeVector {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// The unit `1 + 0i`.
    pub const ONE: Self = Self { x: 1, y: 0 };

    /// Creates `x + iy`.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Sum, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(rhs.x)?,
            y: self.y.checked_add(rhs.y)?,
        })
    }

    /// Gaussian product, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let x = self.x.checked_mul(rhs.x)?.checked_sub(self.y.checked_mul(rhs.y)?)?;
        let y = self.x.checked_mul(rhs.y)?.checked_add(self.y.checked_mul(rhs.x)?)?;
        Some(Self { x, y })
    }

    /// `self^n`, or `None` on overflow.
    #[must_use]
    pub fn checked_pow(self, n: u32) -> Option<Self> {
        (0..n).try_fold(Self::ONE, |acc, _| acc.checked_mul(self))
    }

    /// `|z|`.
    #[must_use]
    pub fn modulus(self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }

    /// `arg z` in radians, in `(−π, π]`.
    #[must_use]
    pub fn argument(self) -> f64 {
        (self.y as f64).atan2(self.x as f64)
    }
}

const UNIT_STEPS: [LatticeVector; 4] = [
    LatticeVector::new(1, 0),
    LatticeVector::new(0, 1),
    LatticeVector::new(-1, 0),
    LatticeVector::new(0, -1),
];

/// Endpoint of the unit walk of a primary word, starting at the origin
/// heading along +x. Symbols outside `{A, B, +, -}` are ignored.
///
/// Each coordinate moves by at most one per symbol, so it stays within the
/// word length and cannot overflow.
///
/// ```
/// use folding_curves::geometry::{end_word, LatticeVector};
///
/// let w = "A+B".parse().unwrap();
/// assert_eq!(end_word(&w), LatticeVector::new(1, 1));
/// ```
#[must_use]
pub fn end_word(word: &Word) -> LatticeVector {
    let mut heading = 0usize;
    let mut at = LatticeVector::ZERO;
    for s in word.iter() {
        match s {
            Symbol::A | Symbol::B => {
                let unit = UNIT_STEPS[heading];
                at.x = at.x.saturating_add(unit.x);
                at.y = at.y.saturating_add(unit.y);
            }
            Symbol::Plus => heading = (heading + 1) % 4,
            Symbol::Minus => heading = (heading + 3) % 4,
            _ => {}
        }
    }
    at
}

// ============================================================================
// Scale and rotation
// ============================================================================

/// Per-generation contraction ratio and rotation of a folding curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScaleRotation {
    /// `|z|`.
    pub scale: f64,
    /// `arg z`, radians.
    pub rotation: f64,
}

impl ScaleRotation {
    /// Reads the factor off the endpoint of `P0(A)`.
    #[must_use]
    pub fn from_vector(z: LatticeVector) -> Self {
        Self {
            scale: z.modulus(),
            rotation: z.argument(),
        }
    }

    /// `arg z` in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }

    /// Physical step for generation `n`: `step / |z|^n`.
    ///
    /// Generations past `i32::MAX` use that exponent, which already
    /// underflows to zero for any `|z| > 1`.
    #[must_use]
    pub fn step_for_generation(&self, step: f64, n: usize) -> f64 {
        let exponent = i32::try_from(n).unwrap_or(i32::MAX);
        step / self.scale.powi(exponent)
    }

    /// Initial heading in degrees for generation `n`: `base − n·arg z`.
    #[must_use]
    pub fn heading_for_generation(&self, base_degrees: f64, n: usize) -> f64 {
        base_degrees - n as f64 * self.rotation_degrees()
    }
}

// ============================================================================
// Paths
// ============================================================================

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, pointing up.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Geometry of one drawn piece.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Shape {
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Circular arc.
    Arc {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Centre of the circle.
        center: Point,
        /// Radius.
        radius: f64,
        /// Angle of `from` seen from `center`, degrees.
        start_angle: f64,
        /// Signed sweep in degrees; positive is counter-clockwise.
        sweep: f64,
    },
}

impl Shape {
    /// End point of the shape.
    #[must_use]
    pub fn end(&self) -> Point {
        match self {
            Shape::Line { to, .. } | Shape::Arc { to, .. } => *to,
        }
    }
}

/// A shape tagged with the symbol that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathSegment {
    /// Producing symbol; its case selects the boundary side when styling.
    pub symbol: Symbol,
    /// The geometry.
    pub shape: Shape,
}

/// Text placed next to the path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Label {
    /// Anchor point.
    pub position: Point,
    /// Label text.
    pub text: String,
}

/// Styling carried through to the renderer untouched, apart from
/// `corner_fraction` which also shapes the corners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Stroke colour, e.g. `"#000000"`.
    pub colour: String,
    /// Stroke width.
    pub width: f64,
    /// Corner radius as a fraction of the segment length; `0` for sharp turns.
    pub corner_fraction: f64,
    /// Draw an arrow head at the end of the path.
    pub arrow_head: bool,
    /// Emit symbol labels.
    pub label: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            colour: "#000000".into(),
            width: 2.5,
            corner_fraction: 0.2,
            arrow_head: false,
            label: false,
        }
    }
}

/// A drawn word.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    /// First point.
    pub start: Point,
    /// Last point.
    pub end: Point,
    /// Initial heading, degrees.
    pub heading: f64,
    /// Segments in drawing order.
    pub segments: Vec<PathSegment>,
    /// Labels, empty unless `style.label` is set.
    pub labels: Vec<Label>,
    /// Styling passed through.
    pub style: Style,
}

/// Turtle state while a path is laid out.
struct Pen {
    at: Point,
    heading: f64,
    segments: Vec<PathSegment>,
    labels: Vec<Label>,
    labelled: bool,
}

impl Pen {
    fn new(heading_degrees: f64, labelled: bool) -> Self {
        Self {
            at: Point::default(),
            heading: heading_degrees.to_radians(),
            segments: Vec::new(),
            labels: Vec::new(),
            labelled,
        }
    }

    fn ahead(&self, distance: f64) -> Point {
        Point::new(
            self.at.x + distance * self.heading.cos(),
            self.at.y + distance * self.heading.sin(),
        )
    }

    /// Straight move; a negative distance backs up along the heading.
    fn forward(&mut self, symbol: Symbol, distance: f64) {
        if distance.abs() < EPSILON {
            return;
        }
        let to = self.ahead(distance);
        self.segments.push(PathSegment {
            symbol,
            shape: Shape::Line { from: self.at, to },
        });
        self.at = to;
    }

    /// Quarter turn, `counter_clockwise` in the sense of `+`, drawn as an
    /// arc of `radius` when it is positive.
    fn turn(&mut self, symbol: Symbol, counter_clockwise: bool, radius: f64) {
        let sign = if counter_clockwise { 1.0 } else { -1.0 };
        if radius > EPSILON {
            let normal = self.heading + sign * core::f64::consts::FRAC_PI_2;
            let center = Point::new(
                self.at.x + radius * normal.cos(),
                self.at.y + radius * normal.sin(),
            );
            let start_angle = (normal + core::f64::consts::PI).to_degrees();
            let to = Point::new(
                center.x + radius * self.heading.cos(),
                center.y + radius * self.heading.sin(),
            );
            self.segments.push(PathSegment {
                symbol,
                shape: Shape::Arc {
                    from: self.at,
                    to,
                    center,
                    radius,
                    start_angle,
                    sweep: sign * 90.0,
                },
            });
            self.at = to;
        }
        self.heading += sign * core::f64::consts::FRAC_PI_2;
    }

    fn label(&mut self, position: Point, symbol: Symbol) {
        if self.labelled {
            self.labels.push(Label {
                position,
                text: symbol.to_string(),
            });
        }
    }

    fn finish(self, heading: f64, style: &Style) -> Path {
        Path {
            start: Point::default(),
            end: self.at,
            heading,
            segments: self.segments,
            labels: self.labels,
            style: style.clone(),
        }
    }
}

/// Lays out a primary word on the square grid.
///
/// Each `A`/`B` advances `step` along the current heading; turns become arcs
/// of radius `style.corner_fraction × step`. The path ends at `step·z`
/// rotated by `heading_degrees`, where `z` is [`end_word`] of the word.
#[must_use]
pub fn square_grid_path(word: &Word, step: f64, heading_degrees: f64, style: &Style) -> Path {
    let radius = style.corner_fraction * step;
    let mut pen = Pen::new(heading_degrees, style.label);
    // Straight distance owed since the last corner.
    let mut pending = 0.0_f64;
    let mut last_letter = Symbol::A;
    for s in word.iter() {
        match s {
            Symbol::A | Symbol::B => {
                let mid = pen.ahead(pending + 0.5 * step);
                pen.label(mid, s);
                pending += step;
                last_letter = s;
            }
            Symbol::Plus | Symbol::Minus => {
                pen.forward(last_letter, pending - radius);
                pen.label(pen.at, s);
                pen.turn(s, s == Symbol::Plus, radius);
                pending = -radius;
            }
            _ => {}
        }
    }
    pen.forward(last_letter, pending);
    pen.finish(heading_degrees, style)
}

/// Lays out a boundary word on the mid grid.
///
/// Each symbol covers a diagonal of length `step·√2`; corners round with
/// radius `style.corner_fraction × step·√2`. Symbols outside the boundary
/// alphabet are skipped.
#[must_use]
pub fn mid_grid_path(word: &Word, step: f64, heading_degrees: f64, style: &Style) -> Path {
    let full = step * SQRT_2;
    let half = 0.5 * full;
    let radius = style.corner_fraction * full;
    let mut pen = Pen::new(heading_degrees, style.label);
    for s in word.iter() {
        match s {
            Symbol::R | Symbol::LowerR | Symbol::L | Symbol::LowerL => {
                let counter_clockwise = matches!(s, Symbol::R | Symbol::LowerR);
                pen.forward(s, half - radius);
                pen.label(pen.at, s);
                pen.turn(s, counter_clockwise, radius);
                pen.forward(s, half - radius);
            }
            Symbol::S | Symbol::LowerS => {
                pen.label(pen.ahead(half), s);
                pen.forward(s, full);
            }
            _ => {}
        }
    }
    pen.finish(heading_degrees, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn heighway_factor() {
        let z = end_word(&w("A+B"));
        assert_eq!(z, LatticeVector::new(1, 1));
        let f = ScaleRotation::from_vector(z);
        assert!((f.scale - SQRT_2).abs() < 1e-12);
        assert!((f.rotation_degrees() - 45.0).abs() < 1e-12);
    }

    #[test]
    fn end_word_turns_both_ways() {
        assert_eq!(end_word(&w("A-B")), LatticeVector::new(1, -1));
        assert_eq!(end_word(&w("A+B+A+B")), LatticeVector::ZERO);
        assert_eq!(end_word(&w("")), LatticeVector::ZERO);
    }

    #[test]
    fn gaussian_powers() {
        let z = LatticeVector::new(1, 1);
        assert_eq!(z.checked_pow(0), Some(LatticeVector::ONE));
        assert_eq!(z.checked_pow(2), Some(LatticeVector::new(0, 2)));
        assert_eq!(
            LatticeVector::new(2, 1).checked_mul(LatticeVector::new(2, 1)),
            Some(LatticeVector::new(3, 4))
        );
        assert_eq!(LatticeVector::new(i64::MAX, 0).checked_pow(2), None);
    }

    #[test]
    fn generation_step_and_heading() {
        let f = ScaleRotation::from_vector(LatticeVector::new(1, 1));
        assert!((f.step_for_generation(8.0, 2) - 4.0).abs() < 1e-12);
        assert!((f.heading_for_generation(0.0, 3) + 135.0).abs() < 1e-9);
    }

    #[test]
    fn huge_generations_shrink_to_zero() {
        let f = ScaleRotation::from_vector(LatticeVector::new(1, 1));
        // 2^31 would wrap to a negative exponent under a plain cast.
        assert_eq!(f.step_for_generation(8.0, 1 << 31), 0.0);
        assert_eq!(f.step_for_generation(8.0, usize::MAX), 0.0);
    }

    #[test]
    fn overflowing_arithmetic_is_reported() {
        let big = LatticeVector::new(i64::MAX, 1);
        assert_eq!(big.checked_add(LatticeVector::ONE), None);
        assert_eq!(big.checked_mul(LatticeVector::new(2, 0)), None);
        assert_eq!(
            LatticeVector::new(2, 1).checked_add(LatticeVector::new(-1, 3)),
            Some(LatticeVector::new(1, 4))
        );
    }

    #[test]
    fn sharp_square_path_matches_lattice_walk() {
        let style = Style {
            corner_fraction: 0.0,
            ..Style::default()
        };
        let path = square_grid_path(&w("A+B+A-B"), 2.0, 0.0, &style);
        assert!(close(path.end, Point::new(0.0, 4.0)));
        assert_eq!(path.segments.len(), 4);
    }

    #[test]
    fn rounded_square_path_keeps_endpoint() {
        let style = Style {
            corner_fraction: 0.3,
            ..Style::default()
        };
        let path = square_grid_path(&w("A+B+A-B"), 1.0, 0.0, &style);
        assert!(close(path.end, Point::new(0.0, 2.0)));
        let arcs = path
            .segments
            .iter()
            .filter(|s| matches!(s.shape, Shape::Arc { .. }))
            .count();
        assert_eq!(arcs, 3);
    }

    #[test]
    fn segments_chain_without_gaps() {
        let path = square_grid_path(&w("A+B-A-B+A"), 1.0, 30.0, &Style::default());
        let mut at = path.start;
        for seg in &path.segments {
            let from = match seg.shape {
                Shape::Line { from, .. } | Shape::Arc { from, .. } => from,
            };
            assert!(close(from, at));
            at = seg.shape.end();
        }
        assert!(close(at, path.end));
    }

    #[test]
    fn mid_grid_corners() {
        let sharp = Style {
            corner_fraction: 0.0,
            ..Style::default()
        };
        // R from heading -45: down-right then up-right.
        let r = mid_grid_path(&w("R"), 1.0, -45.0, &sharp);
        assert!(close(r.end, Point::new(1.0, 0.0)));
        let l = mid_grid_path(&w("l"), 1.0, 45.0, &sharp);
        assert!(close(l.end, Point::new(1.0, 0.0)));
        let s = mid_grid_path(&w("S"), 1.0, 45.0, &sharp);
        assert!(close(s.end, Point::new(1.0, 1.0)));
    }

    #[test]
    fn mid_grid_rounding_keeps_endpoint() {
        let rounded = Style {
            corner_fraction: 0.25,
            ..Style::default()
        };
        let path = mid_grid_path(&w("RrSLl"), 1.0, 0.0, &rounded);
        let sharp = mid_grid_path(
            &w("RrSLl"),
            1.0,
            0.0,
            &Style {
                corner_fraction: 0.0,
                ..Style::default()
            },
        );
        assert!(close(path.end, sharp.end));
    }

    #[test]
    fn labels_only_when_requested() {
        let plain = square_grid_path(&w("A+B"), 1.0, 0.0, &Style::default());
        assert!(plain.labels.is_empty());
        let labelled = square_grid_path(
            &w("A+B"),
            1.0,
            0.0,
            &Style {
                label: true,
                ..Style::default()
            },
        );
        let texts: Vec<&str> = labelled.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["A", "+", "B"]);
    }
}
