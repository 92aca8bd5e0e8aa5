//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments (or runs the interactive selector)
//! - executes the fetch -> parse -> aggregate pipeline
//! - prints the aggregated table
//! - writes optional exports and per-year charts

use std::collections::BTreeSet;

use clap::Parser;

use crate::cli::{Command, CommonArgs, InteractiveArgs, RunArgs};
use crate::domain::{RunConfig, Series};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `atlas` binary.
pub fn run() -> Result<(), AppError> {
    // Load `.env` before clap parses, so env-backed flags (the municipality
    // CSV path) see overrides from a dotenv file too.
    dotenvy::dotenv().ok();

    // We want a bare `atlas` to behave like `atlas interactive`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the two-prompts-and-go UX as the default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(config_from_run_args(&args)),
        Command::Interactive(args) => handle_interactive(args),
        Command::Series => handle_series_list(),
    }
}

fn handle_run(config: RunConfig) -> Result<(), AppError> {
    let output = pipeline::execute(&config)?;

    if output.means.is_empty() {
        return Err(AppError::new(
            3,
            "No data points matched the requested years.",
        ));
    }

    println!("{}", crate::report::format_means(&output, &config));

    if let Some(path) = &config.export {
        crate::io::export::write_means_csv(path, &output.means)?;
        println!("Wrote export CSV '{}'.", path.display());
    }

    if config.chart {
        let written = crate::plot::render_year_charts(
            &output.means,
            config.series,
            &config.out_dir,
            config.chart_width,
            config.chart_height,
        )?;
        for path in written {
            println!("Wrote chart '{}'.", path.display());
        }
    }

    Ok(())
}

fn handle_interactive(args: InteractiveArgs) -> Result<(), AppError> {
    let selection = crate::cli::picker::prompt_for_selection()?;
    handle_run(build_config(
        &args.common,
        selection.series,
        selection.years,
    ))
}

fn handle_series_list() -> Result<(), AppError> {
    for (idx, series) in Series::ALL.iter().enumerate() {
        println!("{:>3}) {:<24} id={}", idx + 1, series.display_name(), series.id());
    }
    Ok(())
}

fn config_from_run_args(args: &RunArgs) -> RunConfig {
    build_config(
        &args.common,
        args.series,
        args.years.iter().copied().collect(),
    )
}

fn build_config(common: &CommonArgs, series: Series, years: BTreeSet<i32>) -> RunConfig {
    RunConfig {
        series,
        years,
        municipios_csv: common.municipios.clone(),
        chart: !common.no_chart,
        out_dir: common.out_dir.clone(),
        chart_width: common.chart_width,
        chart_height: common.chart_height,
        export: common.export.clone(),
    }
}

/// Rewrite argv so `atlas` defaults to `atlas interactive`.
///
/// Rules:
/// - `atlas`                     -> `atlas interactive`
/// - `atlas -m municipios.csv`   -> `atlas interactive -m municipios.csv`
/// - `atlas --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("interactive".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "interactive" | "series");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "interactive flags".
    if arg1.starts_with('-') {
        argv.insert(1, "interactive".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_interactive() {
        assert_eq!(rewrite_args(argv(&["atlas"])), argv(&["atlas", "interactive"]));
    }

    #[test]
    fn leading_flags_go_to_interactive() {
        assert_eq!(
            rewrite_args(argv(&["atlas", "--no-chart"])),
            argv(&["atlas", "interactive", "--no-chart"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["atlas", "run", "--series", "homicides"])),
            argv(&["atlas", "run", "--series", "homicides"])
        );
        assert_eq!(rewrite_args(argv(&["atlas", "--help"])), argv(&["atlas", "--help"]));
    }
}
