//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the draw pipeline
//! - prints summaries/plots
//! - hands off to the TUI

use clap::Parser;

use crate::cli::{Command, DrawArgs};
use crate::domain::{
    ClinicalInputs, DrawConfig, EarSettings, SamplingPolicy, SweepRange,
};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tymp` binary.
pub fn run() -> Result<(), AppError> {
    // We want `tymp` and `tymp --ytm 1.2` to behave like `tymp tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Draw(args) => handle_draw(args, OutputMode::Full),
        Command::Points(args) => handle_draw(args, OutputMode::PointsOnly),
        Command::Tui(args) => handle_tui(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    PointsOnly,
}

fn handle_draw(args: DrawArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = draw_config_from_args(&args);
    let run = pipeline::run_draw(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run.ears, &config));

            if config.plot {
                let plot = crate::plot::render_ascii_plot(
                    &run.ears,
                    config.plot_width,
                    config.plot_height,
                );
                println!("{plot}");
            }
        }
        OutputMode::PointsOnly => {
            for ear in &run.ears {
                println!("{} ear:", ear.ear.display_name());
                println!("{}", crate::report::format_control_points(&ear.control_points));
            }
        }
    }

    Ok(())
}

fn handle_tui(args: DrawArgs) -> Result<(), AppError> {
    let config = draw_config_from_args(&args);
    crate::tui::run(config)
}

/// Build the pipeline configuration from CLI flags.
///
/// Right-ear values fall back to the left ear's when only some are given, so
/// `--dual` alone mirrors the left ear and individual `--right-*` flags
/// override one landmark at a time.
pub fn draw_config_from_args(args: &DrawArgs) -> DrawConfig {
    let left = EarSettings {
        inputs: ClinicalInputs {
            vea: args.vea,
            ytm: args.ytm,
            tpp: args.tpp,
            tw: args.tw,
        },
        epsilon: args.epsilon,
    };

    let wants_right = args.dual
        || args.right_vea.is_some()
        || args.right_ytm.is_some()
        || args.right_tpp.is_some()
        || args.right_tw.is_some()
        || args.right_epsilon.is_some();

    let right = wants_right.then(|| EarSettings {
        inputs: ClinicalInputs {
            vea: args.right_vea.unwrap_or(args.vea),
            ytm: args.right_ytm.unwrap_or(args.ytm),
            tpp: args.right_tpp.unwrap_or(args.tpp),
            tw: args.right_tw.unwrap_or(args.tw),
        },
        epsilon: args.right_epsilon.unwrap_or(args.epsilon),
    });

    DrawConfig {
        sweep: SweepRange {
            min_pressure: args.npa,
            max_pressure: args.pressure_max,
        },
        kernel: args.kernel,
        sampling: args
            .sample_count
            .map(SamplingPolicy::Count)
            .unwrap_or(SamplingPolicy::UnitStep),
        left,
        right,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `tymp` defaults to `tymp tui`.
///
/// Rules:
/// - `tymp`                    -> `tymp tui`
/// - `tymp --ytm 1.2 ...`      -> `tymp tui --ytm 1.2 ...`
/// - `tymp --help/--version`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "draw" | "points" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
