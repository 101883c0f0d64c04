//! Command-line parsing for the tympanogram curve builder.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the curve/math code.
//!
//! The numeric entry ranges mirror the clinical entry form this tool replaces;
//! values inside those ranges are accepted as-is and any further checking is
//! the core's defensive re-validation.

use clap::{Parser, Subcommand};

use crate::domain::KernelKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tymp", version, about = "Tympanogram curve builder (RBF-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the curve(s), print the summary, and render an ASCII plot.
    Draw(DrawArgs),
    /// Print the five control points only (useful for scripting).
    Points(DrawArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying draw pipeline as `tymp draw`, but renders
    /// the curve in a terminal UI using Ratatui, with live adjustment of the
    /// clinical values and epsilon.
    Tui(DrawArgs),
}

/// Common options for drawing.
///
/// Left-ear values are the primary flags; `--right-*` flags (or `--dual`)
/// enable a second, independently computed curve, defaulting to the left
/// ear's values where not given.
#[derive(Debug, Parser, Clone)]
pub struct DrawArgs {
    /// Equivalent ear-canal volume Vea (mmho), annotation only.
    #[arg(long, default_value_t = 1.5)]
    pub vea: f64,

    /// Peak compensated static admittance Ytm (mmho).
    #[arg(long, default_value_t = 1.0)]
    pub ytm: f64,

    /// Tympanometric peak pressure TPP (daPa).
    #[arg(long, default_value_t = -10, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(-398..=198))]
    pub tpp: i32,

    /// Tympanometric width TW (daPa).
    #[arg(long, default_value_t = 70,
          value_parser = clap::value_parser!(i32).range(2..=399))]
    pub tw: i32,

    /// Kernel shape parameter epsilon (typical range 1-75). Reshapes the
    /// curve between the landmarks without changing the entered values.
    #[arg(long, default_value_t = 25.0)]
    pub epsilon: f64,

    /// Compute the right ear too, mirroring the left ear's values unless
    /// overridden by `--right-*` flags.
    #[arg(long)]
    pub dual: bool,

    /// Right ear Vea (mmho).
    #[arg(long)]
    pub right_vea: Option<f64>,

    /// Right ear Ytm (mmho).
    #[arg(long)]
    pub right_ytm: Option<f64>,

    /// Right ear TPP (daPa).
    #[arg(long, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(-398..=198))]
    pub right_tpp: Option<i32>,

    /// Right ear TW (daPa).
    #[arg(long, value_parser = clap::value_parser!(i32).range(2..=399))]
    pub right_tw: Option<i32>,

    /// Right ear epsilon.
    #[arg(long)]
    pub right_epsilon: Option<f64>,

    /// Negative pressure sweep bound NPa (daPa).
    #[arg(long, default_value_t = -200, allow_negative_numbers = true,
          value_parser = clap::value_parser!(i32).range(-400..=-200))]
    pub npa: i32,

    /// Positive pressure sweep bound (daPa).
    #[arg(long, default_value_t = 200,
          value_parser = clap::value_parser!(i32).range(0..=400))]
    pub pressure_max: i32,

    /// Sample the curve at a fixed count of evenly spaced pressures instead
    /// of one sample per daPa.
    #[arg(long)]
    pub sample_count: Option<usize>,

    /// Radial basis kernel.
    #[arg(long, value_enum, default_value_t = KernelKind::Multiquadric)]
    pub kernel: KernelKind,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
