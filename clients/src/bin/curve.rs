//! `folding-curve`: Inspects the words and tables of a folding curve.
//!
//! **Subcommands:**
//! - `word -g N`: the generation-N curve word and its symbol counts
//! - `boundary -g N [--seed R] [--table]`: a boundary word, or the whole
//!   boundary substitution
//! - `matrix [--vertices RLSs]`: adjacency matrix, Perron root and boundary
//!   dimension
//! - `scale`: end vector, scale factor and rotation of one generation
//!
//! **Usage:**
//! ```
//! folding-curve [--sequence <seq>] [--config <file>] [--json] <subcommand>
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folding_clients::{build_curve, init_tracing, parse_vertices, write_json, CurveArgs};
use folding_curves::matrix::DEFAULT_VERTICES;
use folding_curves::{Alphabet, AdjacencyMatrix, FoldingCurve, LatticeVector, Symbol, Word};
use serde::Serialize;
use tracing::info;

/// Inspect folding curve words, boundary substitutions and matrices.
#[derive(Parser)]
#[command(
    name = "folding-curve",
    about = "Inspect folding curve words, boundary substitutions and matrices"
)]
struct Args {
    #[command(flatten)]
    curve: CurveArgs,

    /// Print structured JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generation-N curve word.
    Word {
        /// Generation index.
        #[arg(short, long, default_value_t = 1)]
        generation: usize,
    },
    /// Print a boundary word or the boundary substitution.
    Boundary {
        /// Generation index.
        #[arg(short, long, default_value_t = 1)]
        generation: usize,
        /// Seed letter from `RLSrls`.
        #[arg(long, default_value_t = 'R')]
        seed: char,
        /// Print the substitution table instead of a word.
        #[arg(long)]
        table: bool,
    },
    /// Print the adjacency matrix of the boundary substitution.
    Matrix {
        /// Vertex subset, in row order.
        #[arg(long, default_value = "RLSs")]
        vertices: String,
    },
    /// Print the per-generation scale and rotation.
    Scale,
}

#[derive(Serialize)]
struct WordReport {
    sequence: String,
    generation: usize,
    length: usize,
    counts: Vec<(Symbol, usize)>,
    word: Word,
}

#[derive(Serialize)]
struct TableReport {
    sequence: String,
    rule_a: Word,
    rule_b: Word,
    images: Vec<(Symbol, Word)>,
}

#[derive(Serialize)]
struct MatrixReport {
    sequence: String,
    matrix: AdjacencyMatrix,
    spectral_radius: Option<f64>,
    dimension: Option<f64>,
}

#[derive(Serialize)]
struct ScaleReport {
    sequence: String,
    end_vector: LatticeVector,
    scale: f64,
    rotation_degrees: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.curve.verbose)?;
    let curve = build_curve(&args.curve)?;
    info!(sequence = %curve.sequence(), "folding curve");

    match args.command {
        Command::Word { generation } => word(&curve, generation, args.json),
        Command::Boundary {
            generation,
            seed,
            table,
        } => {
            if table {
                boundary_table(&curve, args.json)
            } else {
                boundary(&curve, generation, seed, args.json)
            }
        }
        Command::Matrix { vertices } => matrix(&curve, &vertices, args.json),
        Command::Scale => scale(&curve, args.json),
    }
}

fn symbol_counts(word: &Word, alphabet: Alphabet) -> Vec<(Symbol, usize)> {
    let counts = word.counts();
    alphabet
        .symbols()
        .into_iter()
        .map(|s| (s, counts[s.index()]))
        .collect()
}

fn word(curve: &FoldingCurve, generation: usize, json: bool) -> Result<()> {
    let word = curve
        .generation(generation)
        .with_context(|| format!("failed to build generation {generation}"))?;
    let report = WordReport {
        sequence: curve.sequence().to_string(),
        generation,
        length: word.len(),
        counts: symbol_counts(&word, Alphabet::Primary),
        word,
    };
    if json {
        return write_json(&report, None);
    }
    println!("{}", report.word);
    for (symbol, count) in &report.counts {
        eprintln!("  {symbol}: {count}");
    }
    Ok(())
}

fn boundary(curve: &FoldingCurve, generation: usize, seed: char, json: bool) -> Result<()> {
    let seed = Symbol::from_char(seed, 0).context("invalid boundary seed")?;
    let word = curve
        .boundary_word(seed, generation)
        .with_context(|| format!("failed to build boundary generation {generation} from {seed}"))?;
    let report = WordReport {
        sequence: curve.sequence().to_string(),
        generation,
        length: word.len(),
        counts: symbol_counts(&word, Alphabet::Boundary),
        word,
    };
    if json {
        return write_json(&report, None);
    }
    println!("{}", report.word);
    for (symbol, count) in &report.counts {
        eprintln!("  {symbol}: {count}");
    }
    Ok(())
}

fn boundary_table(curve: &FoldingCurve, json: bool) -> Result<()> {
    let p1 = curve
        .boundary_morphism()
        .context("failed to derive the boundary substitution")?;
    let report = TableReport {
        sequence: curve.sequence().to_string(),
        rule_a: curve.rule_a().clone(),
        rule_b: curve.rule_b().clone(),
        images: Alphabet::Boundary
            .symbols()
            .into_iter()
            .map(|s| (s, p1.image(s).clone()))
            .collect(),
    };
    if json {
        return write_json(&report, None);
    }
    println!("A -> {}", report.rule_a);
    println!("B -> {}", report.rule_b);
    println!();
    for (symbol, image) in &report.images {
        println!("{symbol} -> {image}");
    }
    Ok(())
}

fn matrix(curve: &FoldingCurve, vertices: &str, json: bool) -> Result<()> {
    let vertices = if vertices.is_empty() {
        DEFAULT_VERTICES.to_vec()
    } else {
        parse_vertices(vertices)?
    };
    let matrix = curve
        .boundary_morphism_adjacency_matrix(&vertices)
        .context("failed to build the adjacency matrix")?;
    let report = MatrixReport {
        sequence: curve.sequence().to_string(),
        spectral_radius: matrix.spectral_radius(),
        dimension: curve.boundary_dimension(&vertices)?,
        matrix,
    };
    if json {
        return write_json(&report, None);
    }
    print!("{}", report.matrix);
    match report.spectral_radius {
        Some(rho) => println!("spectral radius: {rho:.12}"),
        None => println!("spectral radius: undefined"),
    }
    match report.dimension {
        Some(dim) => println!("boundary dimension: {dim:.12}"),
        None => println!("boundary dimension: undefined"),
    }
    Ok(())
}

fn scale(curve: &FoldingCurve, json: bool) -> Result<()> {
    let factor = curve.scale_rotation();
    let report = ScaleReport {
        sequence: curve.sequence().to_string(),
        end_vector: curve.end_vector(),
        scale: factor.scale,
        rotation_degrees: factor.rotation_degrees(),
    };
    if json {
        return write_json(&report, None);
    }
    println!("end vector: ({}, {})", report.end_vector.x, report.end_vector.y);
    println!("scale: {:.12}", report.scale);
    println!("rotation: {:.6}°", report.rotation_degrees);
    Ok(())
}
