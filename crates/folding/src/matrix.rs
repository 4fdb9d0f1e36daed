//! Adjacency matrices of the boundary substitution.
//!
//! Row `i` counts, for vertex `i` of a chosen subset of `{R, L, S, r, l, s}`,
//! how often each vertex appears in `P1(i)`. A letter missing from the subset
//! is credited to its orientation twin (`R↔l`, `L↔r`, `S↔S`, `s↔s`) when
//! the twin is present, and dropped otherwise. No occurrence is counted
//! twice.
//!
//! The Perron root of the matrix is the growth rate of boundary length per
//! generation; together with the curve's contraction ratio it gives the
//! similarity dimension of the boundary.

use core::fmt;

use crate::boundary::BoundaryMorphism;
use crate::error::{FoldingError, Result};
use crate::symbol::{Alphabet, Symbol};
use crate::word::Word;

/// Default vertex subset: `R L S s`.
pub const DEFAULT_VERTICES: [Symbol; 4] = [Symbol::R, Symbol::L, Symbol::S, Symbol::LowerS];

const POWER_ITERATIONS: usize = 10_000;
const POWER_TOLERANCE: f64 = 1e-13;

/// Square matrix over a vertex subset of the boundary alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdjacencyMatrix {
    vertices: Vec<Symbol>,
    entries: Vec<Vec<u64>>,
}

impl AdjacencyMatrix {
    /// Builds the matrix of `morphism` restricted to `vertices`.
    ///
    /// # Errors
    ///
    /// [`FoldingError::InvalidConfiguration`] if `vertices` is empty, repeats
    /// a letter, or contains a symbol outside the boundary alphabet.
    pub fn from_morphism(morphism: &BoundaryMorphism, vertices: &[Symbol]) -> Result<Self> {
        validate_vertices(vertices)?;
        let entries = vertices
            .iter()
            .map(|src| count_row(morphism.image(*src), vertices))
            .collect();
        Ok(Self {
            vertices: vertices.to_vec(),
            entries,
        })
    }

    /// The vertex order of rows and columns.
    #[must_use]
    pub fn vertices(&self) -> &[Symbol] {
        &self.vertices
    }

    /// Row-major entries.
    #[must_use]
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.entries
    }

    /// Entry `[i][j]`, or `None` out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<u64> {
        self.entries.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Dimension of the matrix.
    #[must_use]
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Sum of row `i`.
    #[must_use]
    pub fn row_sum(&self, i: usize) -> u64 {
        self.entries.get(i).map_or(0, |row| row.iter().sum())
    }

    /// Perron root (spectral radius) of the matrix.
    ///
    /// Power iteration on `M + I`, which has the same Perron vector and a
    /// strictly dominant root for any non-negative `M`, so periodic matrices
    /// converge too. Convergence is judged on the max-normalized vector, not
    /// on the norm ratio, which can repeat before the vector has settled.
    /// Returns `None` for the zero matrix or if the iteration does not settle.
    #[must_use]
    pub fn spectral_radius(&self) -> Option<f64> {
        let n = self.size();
        if n == 0 || self.entries.iter().flatten().all(|e| *e == 0) {
            return None;
        }
        let mut v = vec![1.0_f64; n];
        for _ in 0..POWER_ITERATIONS {
            let next = self.shifted_product(&v);
            let norm = next.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
            if norm == 0.0 {
                return None;
            }
            let next: Vec<f64> = next.into_iter().map(|x| x / norm).collect();
            let delta = next
                .iter()
                .zip(&v)
                .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()));
            v = next;
            if delta < POWER_TOLERANCE {
                // v is non-negative with max entry 1, so its sum is at least 1.
                let image: f64 = self.shifted_product(&v).iter().sum();
                return Some(image / v.iter().sum::<f64>() - 1.0);
            }
        }
        None
    }

    /// `(M + I) v`.
    fn shifted_product(&self, v: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .zip(v)
            .map(|(row, vi)| vi + row.iter().zip(v).map(|(m, x)| *m as f64 * x).sum::<f64>())
            .collect()
    }
}

impl fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for v in &self.vertices {
            write!(f, " {:>3}", v.as_char())?;
        }
        writeln!(f)?;
        for (v, row) in self.vertices.iter().zip(&self.entries) {
            write!(f, "{:>3}", v.as_char())?;
            for e in row {
                write!(f, " {:>3}", e)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn validate_vertices(vertices: &[Symbol]) -> Result<()> {
    if vertices.is_empty() {
        return Err(FoldingError::InvalidConfiguration(
            "adjacency matrix needs at least one vertex".into(),
        ));
    }
    for (i, v) in vertices.iter().enumerate() {
        if !Alphabet::Boundary.contains(*v) {
            return Err(FoldingError::InvalidConfiguration(format!(
                "vertex '{v}' is not in the boundary alphabet"
            )));
        }
        if vertices[..i].contains(v) {
            return Err(FoldingError::InvalidConfiguration(format!(
                "vertex '{v}' is listed twice"
            )));
        }
    }
    Ok(())
}

/// Column a letter is credited to: itself if present, else its twin.
fn column_of(letter: Symbol, vertices: &[Symbol]) -> Option<usize> {
    vertices
        .iter()
        .position(|v| *v == letter)
        .or_else(|| vertices.iter().position(|v| *v == letter.twin()))
}

fn count_row(image: &Word, vertices: &[Symbol]) -> Vec<u64> {
    let mut row = vec![0u64; vertices.len()];
    for letter in image.iter() {
        if let Some(j) = column_of(letter, vertices) {
            row[j] += 1;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heighway() -> BoundaryMorphism {
        BoundaryMorphism::derive(&"A+B".parse().unwrap()).unwrap()
    }

    #[test]
    fn heighway_matrix() {
        let m = AdjacencyMatrix::from_morphism(&heighway(), &DEFAULT_VERTICES).unwrap();
        assert_eq!(
            m.rows(),
            &[
                vec![1, 1, 0, 0],
                vec![0, 0, 1, 0],
                vec![2, 0, 0, 0],
                vec![0, 2, 0, 0],
            ]
        );
    }

    #[test]
    fn twin_and_letter_both_present_are_not_double_counted() {
        // P1(R) = Rr: with r in the subset it is credited to r, not to L.
        let vertices = [Symbol::R, Symbol::L, Symbol::LowerR];
        let m = AdjacencyMatrix::from_morphism(&heighway(), &vertices).unwrap();
        assert_eq!(m.rows()[0], vec![1, 0, 1]);
        assert_eq!(m.row_sum(0), 2);
    }

    #[test]
    fn heighway_perron_root() {
        let m = AdjacencyMatrix::from_morphism(&heighway(), &DEFAULT_VERTICES).unwrap();
        let rho = m.spectral_radius().unwrap();
        // Real root of x^3 - x^2 - 2.
        assert!((rho - 1.695_620_769_559_862).abs() < 1e-9, "rho = {rho}");
    }

    #[test]
    fn heighway_root_solves_characteristic_polynomial() {
        // The first two norm ratios of (M + I)^k 1 are both 3 here.
        let m = AdjacencyMatrix::from_morphism(&heighway(), &DEFAULT_VERTICES).unwrap();
        let rho = m.spectral_radius().unwrap();
        let residual = rho.powi(3) - rho.powi(2) - 2.0;
        assert!(residual.abs() < 1e-9, "rho = {rho}, residual = {residual}");
        assert!((rho - 2.0).abs() > 0.1);
    }

    #[test]
    fn spectral_radius_of_diagonal_and_rank_one() {
        let diagonal = AdjacencyMatrix {
            vertices: vec![Symbol::R, Symbol::L],
            entries: vec![vec![2, 0], vec![0, 3]],
        };
        assert!((diagonal.spectral_radius().unwrap() - 3.0).abs() < 1e-9);
        let ones = AdjacencyMatrix {
            vertices: vec![Symbol::R, Symbol::L],
            entries: vec![vec![1, 1], vec![1, 1]],
        };
        assert!((ones.spectral_radius().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn spectral_radius_of_permutation() {
        let m = AdjacencyMatrix {
            vertices: vec![Symbol::R, Symbol::L],
            entries: vec![vec![0, 1], vec![1, 0]],
        };
        let rho = m.spectral_radius().unwrap();
        assert!((rho - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_matrix_has_no_radius() {
        let m = AdjacencyMatrix {
            vertices: vec![Symbol::R],
            entries: vec![vec![0]],
        };
        assert_eq!(m.spectral_radius(), None);
    }

    #[test]
    fn invalid_vertex_sets() {
        let p1 = heighway();
        assert!(AdjacencyMatrix::from_morphism(&p1, &[]).is_err());
        assert!(AdjacencyMatrix::from_morphism(&p1, &[Symbol::R, Symbol::R]).is_err());
        assert!(AdjacencyMatrix::from_morphism(&p1, &[Symbol::A]).is_err());
    }
}
