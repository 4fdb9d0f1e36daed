//! `folding-render`: Lays out a folding curve and its boundaries as JSON.
//!
//! The scene holds every path as line and arc segments at a stable size:
//! each generation spans the same two endpoints `(0, 0)` and `(step, 0)`.
//! Styling flags are carried through untouched for the renderer.
//!
//! **Usage:**
//! ```
//! folding-render -g <N> [--step <F>] [--corners <F>] [--boundary] [--no-curve]
//!                [--labels] [--arrow-head] [--out <scene.json>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use folding_clients::{build_curve, init_tracing, write_json, CurveArgs};
use folding_curves::{SceneOptions, Style};
use tracing::info;

/// Lay out a folding curve scene for an external renderer.
#[derive(Parser)]
#[command(
    name = "folding-render",
    about = "Lay out a folding curve scene for an external renderer"
)]
struct Args {
    #[command(flatten)]
    curve: CurveArgs,

    /// Generation index.
    #[arg(short, long, default_value_t = 8)]
    generation: usize,

    /// Distance between the curve's endpoints.
    #[arg(long, default_value_t = 12.0)]
    step: f64,

    /// Corner radius as a fraction of one segment, `0` for sharp corners.
    #[arg(long, default_value_t = 0.2)]
    corners: f64,

    /// Lay out the left and right boundaries.
    #[arg(long)]
    boundary: bool,

    /// Skip the curve itself.
    #[arg(long)]
    no_curve: bool,

    /// Emit a label per symbol.
    #[arg(long)]
    labels: bool,

    /// Ask the renderer for arrow heads.
    #[arg(long)]
    arrow_head: bool,

    /// Output file (default: stdout).
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl Args {
    fn scene_options(&self) -> SceneOptions {
        let defaults = SceneOptions::default();
        let restyle = |style: Style| Style {
            corner_fraction: self.corners,
            arrow_head: self.arrow_head,
            label: self.labels,
            ..style
        };
        SceneOptions {
            step: self.step,
            draw_curve: !self.no_curve,
            draw_boundary: self.boundary,
            curve: restyle(defaults.curve),
            right_boundary: restyle(defaults.right_boundary),
            left_boundary: restyle(defaults.left_boundary),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.curve.verbose)?;
    ensure!(args.step > 0.0, "--step must be positive");
    ensure!(
        (0.0..=0.5).contains(&args.corners),
        "--corners must lie in [0, 0.5]"
    );

    let curve = build_curve(&args.curve)?;
    let scene = curve
        .scene(args.generation, &args.scene_options())
        .with_context(|| format!("failed to lay out generation {}", args.generation))?;

    let segments = [&scene.curve, &scene.right_boundary, &scene.left_boundary]
        .into_iter()
        .flatten()
        .map(|path| path.segments.len())
        .sum::<usize>();
    info!(
        sequence = %curve.sequence(),
        generation = args.generation,
        segments,
        "laid out scene"
    );

    write_json(&scene, args.out.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_reach_every_style() {
        let args = Args::parse_from([
            "folding-render",
            "-g",
            "3",
            "--corners",
            "0",
            "--labels",
            "--boundary",
            "--no-curve",
        ]);
        let options = args.scene_options();
        assert!(!options.draw_curve);
        assert!(options.draw_boundary);
        for style in [&options.curve, &options.right_boundary, &options.left_boundary] {
            assert_eq!(style.corner_fraction, 0.0);
            assert!(style.label);
            assert!(!style.arrow_head);
        }
        assert_eq!(options.right_boundary.colour, "#1e90ff");
    }

    #[test]
    fn sequence_flag_accepts_leading_minus() {
        let args = Args::parse_from(["folding-render", "--sequence", "-+", "-g", "2"]);
        assert_eq!(args.curve.sequence.as_deref(), Some("-+"));
        assert_eq!(args.generation, 2);
    }
}
