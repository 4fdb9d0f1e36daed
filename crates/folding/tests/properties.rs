//! Property-based tests for the word algebra and both substitutions.
//!
//! Words are drawn from every alphabet at once; folding sequences from
//! short random fold lists.

use proptest::prelude::*;

use folding_curves::boundary::{reduce_backtracking, remove_markers};
use folding_curves::geometry::{end_word, mid_grid_path, square_grid_path, Point};
use folding_curves::matrix::DEFAULT_VERTICES;
use folding_curves::scene::boundary_headings;
use folding_curves::word::{invert, reverse, switch};
use folding_curves::{
    Alphabet, Fold, FoldingCurve, FoldingSequence, LatticeVector, Limits, Style, Symbol, Word,
};

fn any_word() -> impl Strategy<Value = Word> {
    prop::collection::vec(prop::sample::select(Symbol::ALL.to_vec()), 0..64).prop_map(Word::from)
}

fn intermediate_word() -> impl Strategy<Value = Word> {
    prop::collection::vec(
        prop::sample::select(Alphabet::Intermediate.symbols()),
        0..96,
    )
    .prop_map(Word::from)
}

/// Short sequences whose curves do not fold back onto themselves, so the
/// boundary words trace a closed outline.
const SELF_AVOIDING: [&str; 24] = [
    "+", "-", "++", "+-", "-+", "--", "++-", "+-+", "+--", "-++", "-+-", "--+", "++++", "++-+",
    "++--", "+-++", "+-+-", "+--+", "-++-", "-+-+", "-+--", "--++", "--+-", "----",
];

fn self_avoiding_sequence() -> impl Strategy<Value = FoldingSequence> {
    prop::sample::select(SELF_AVOIDING.to_vec()).prop_map(|s| s.parse().unwrap())
}

fn any_sequence() -> impl Strategy<Value = FoldingSequence> {
    prop::collection::vec(prop_oneof![Just(Fold::Plus), Just(Fold::Minus)], 1..6)
        .prop_map(|folds| FoldingSequence::new(folds).unwrap())
}

// =============================================================================
// Involution Properties
// =============================================================================

proptest! {
    /// switch is an involution
    #[test]
    fn prop_switch_involution(w in any_word()) {
        prop_assert_eq!(switch(&switch(&w)), w);
    }

    /// reverse is an involution
    #[test]
    fn prop_reverse_involution(w in any_word()) {
        prop_assert_eq!(reverse(&reverse(&w)), w);
    }

    /// invert is an involution
    #[test]
    fn prop_invert_involution(w in any_word()) {
        prop_assert_eq!(invert(&invert(&w)), w);
    }

    /// invert = reverse ∘ switch = switch ∘ reverse
    #[test]
    fn prop_invert_composition(w in any_word()) {
        prop_assert_eq!(invert(&w), reverse(&switch(&w)));
        prop_assert_eq!(invert(&w), switch(&reverse(&w)));
    }
}

// =============================================================================
// Folding Morphism Properties
// =============================================================================

proptest! {
    /// rule_B is exactly invert(rule_A)
    #[test]
    fn prop_duality(seq in any_sequence()) {
        let curve = FoldingCurve::new(seq, Limits::default());
        prop_assert_eq!(curve.rule_b(), &invert(curve.rule_a()));
    }

    /// P0(A) has m + 1 letters and m turns
    #[test]
    fn prop_rule_shape(seq in any_sequence()) {
        let m = seq.len();
        let curve = FoldingCurve::new(seq, Limits::default());
        let rule = curve.rule_a();
        prop_assert_eq!(rule.len(), 2 * m + 1);
        prop_assert_eq!(rule.iter().filter(|s| s.is_letter()).count(), m + 1);
    }

    /// end_word(P0^n(A)) = z^n with z = end_word(P0(A))
    #[test]
    fn prop_endpoint_consistency(seq in any_sequence(), n in 0usize..4) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let z = curve.end_vector();
        let word = curve.generation(n).unwrap();
        prop_assert_eq!(Some(end_word(&word)), z.checked_pow(n as u32));
    }

    /// Applying P0 to a concatenation is the concatenation of the images
    #[test]
    fn prop_morphism_is_homomorphic(seq in any_sequence(), a in any_word(), b in any_word()) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let joined = curve.folding_morphism(&a.concat(&b));
        prop_assert_eq!(
            joined,
            curve.folding_morphism(&a).concat(&curve.folding_morphism(&b))
        );
    }
}

// =============================================================================
// Reduction Properties
// =============================================================================

proptest! {
    /// The normal form is irreducible and never longer than the input
    #[test]
    fn prop_reduction_normal_form(w in intermediate_word()) {
        let reduced = reduce_backtracking(&w).unwrap();
        prop_assert!(reduced.len() <= w.len());
        prop_assert_eq!(reduce_backtracking(&reduced).unwrap(), reduced.clone());

        let s = reduced.as_slice();
        for win in s.windows(3) {
            let corner = win[0].is_base_path() && win[1] == Symbol::RightMarker && win[2].is_base_path();
            prop_assert!(!corner, "reducible window in {}", reduced);
        }
        for win in s.windows(2) {
            prop_assert!(!(win[0].is_marker() && win[1].is_marker()), "adjacent markers in {}", reduced);
        }
    }

    /// Stripping leaves only R, L, S
    #[test]
    fn prop_stripped_has_no_markers(w in intermediate_word()) {
        let base = remove_markers(&reduce_backtracking(&w).unwrap());
        prop_assert!(base.iter().all(|s| s.is_base_path()));
    }
}

// =============================================================================
// Boundary Morphism Properties
// =============================================================================

proptest! {
    /// Every P1 image lies in the boundary alphabet
    #[test]
    fn prop_boundary_images_closed(seq in any_sequence()) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let p1 = curve.boundary_morphism().unwrap();
        for s in Alphabet::Boundary.symbols() {
            prop_assert!(p1.image(s).is_over(Alphabet::Boundary));
        }
    }

    /// P1(l) and P1(r) are the inverted P1(R) and P1(L) up to case
    #[test]
    fn prop_boundary_side_symmetry(seq in any_sequence()) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let p1 = curve.boundary_morphism().unwrap();
        let upper = |w: &Word| -> Word { w.iter().map(Symbol::to_uppercase).collect() };
        prop_assert_eq!(
            upper(p1.image(Symbol::LowerL)),
            invert(&upper(p1.image(Symbol::R)))
        );
        prop_assert_eq!(
            upper(p1.image(Symbol::LowerR)),
            invert(&upper(p1.image(Symbol::L)))
        );
    }

    /// Row i sums to the number of letters of P1(i) the subset can absorb
    #[test]
    fn prop_adjacency_row_sums(seq in any_sequence()) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let p1 = curve.boundary_morphism().unwrap();
        let matrix = curve.boundary_morphism_adjacency_matrix(&DEFAULT_VERTICES).unwrap();
        for (i, src) in DEFAULT_VERTICES.iter().enumerate() {
            let counted = p1
                .image(*src)
                .iter()
                .filter(|c| DEFAULT_VERTICES.contains(c) || DEFAULT_VERTICES.contains(&c.twin()))
                .count() as u64;
            prop_assert_eq!(matrix.row_sum(i), counted);
            // R, L, S, s reach every boundary letter through twins.
            prop_assert_eq!(counted, p1.image(*src).len() as u64);
        }
    }

    /// Both boundaries run from the origin to the curve's far end
    #[test]
    fn prop_boundaries_close_on_curve(seq in self_avoiding_sequence(), n in 0usize..4) {
        let curve = FoldingCurve::new(seq, Limits::default());
        let factor = curve.scale_rotation();
        let step = factor.step_for_generation(1.0, n);
        let word = curve.generation(n).unwrap();
        let (right_base, left_base) = boundary_headings(word.first());
        let style = Style::default();

        let right = mid_grid_path(
            &curve.right_boundary(n).unwrap(),
            step,
            factor.heading_for_generation(right_base, n),
            &style,
        );
        let left = mid_grid_path(
            &curve.left_boundary(n).unwrap(),
            step,
            factor.heading_for_generation(left_base, n),
            &style,
        );
        let drawn = square_grid_path(&word, step, factor.heading_for_generation(0.0, n), &style);
        let target = Point::new(1.0, 0.0);
        prop_assert!(drawn.end.distance(target) < 1e-6, "curve ends at {:?}", drawn.end);
        prop_assert!(right.end.distance(target) < 1e-6, "right ends at {:?}", right.end);
        prop_assert!(left.end.distance(target) < 1e-6, "left ends at {:?}", left.end);
    }
}

// =============================================================================
// Geometry Properties
// =============================================================================

proptest! {
    /// Rounding corners never moves the endpoint of a square-grid path
    #[test]
    fn prop_rounding_preserves_endpoint(w in any_word(), fraction in 0.0f64..0.5) {
        let sharp = square_grid_path(&w, 1.0, 0.0, &Style { corner_fraction: 0.0, ..Style::default() });
        let round = square_grid_path(&w, 1.0, 0.0, &Style { corner_fraction: fraction, ..Style::default() });
        prop_assert!(sharp.end.distance(round.end) < 1e-9);
        let z = end_word(&w);
        prop_assert!(sharp.end.distance(Point::new(z.x as f64, z.y as f64)) < 1e-9);
    }

    /// Gaussian multiplication is commutative
    #[test]
    fn prop_gaussian_commutative(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000, d in -1000i64..1000) {
        let u = LatticeVector::new(a, b);
        let v = LatticeVector::new(c, d);
        prop_assert_eq!(u.checked_mul(v), v.checked_mul(u));
    }
}
