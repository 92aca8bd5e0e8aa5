//! Command-line parsing for the Atlas series tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/aggregate code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{NEWEST_YEAR, OLDEST_YEAR, Series};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "atlas", version, about = "Atlas da Violência state/year means and bar charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a series, aggregate by state and year, and render charts.
    Run(RunArgs),
    /// Pick the series and years interactively on stdin.
    ///
    /// This uses the same underlying pipeline as `atlas run`; only the way
    /// the series and years are chosen differs.
    Interactive(InteractiveArgs),
    /// List the supported series and their API ids.
    Series,
}

/// Options for a fully flag-driven run.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Series to fetch.
    #[arg(short = 's', long, value_enum)]
    pub series: Series,

    /// Target years, space separated (e.g. `--years 2000 2010 2019`).
    #[arg(short = 'y', long, num_args = 1.., required = true, value_parser = parse_year_in_bounds)]
    pub years: Vec<i32>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options for the interactive flow (series/years come from stdin).
#[derive(Debug, Parser, Clone)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by `run` and `interactive`.
#[derive(Debug, Parser, Clone)]
pub struct CommonArgs {
    /// Municipality reference CSV (needs `nome_uf` and `codigo_municipio` columns).
    #[arg(short = 'm', long, env = "ATLAS_MUNICIPIOS_CSV", default_value = "info_municipios_ibge.csv")]
    pub municipios: PathBuf,

    /// Directory chart files are written into.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Skip chart rendering.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1400)]
    pub chart_width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 800)]
    pub chart_height: u32,

    /// Export the aggregated table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

fn parse_year_in_bounds(raw: &str) -> Result<i32, String> {
    let year: i32 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a year"))?;
    if (OLDEST_YEAR..=NEWEST_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(format!(
            "year {year} is outside the covered range {OLDEST_YEAR}..={NEWEST_YEAR}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_are_bounds_checked_at_parse_time() {
        assert_eq!(parse_year_in_bounds("2000"), Ok(2000));
        assert_eq!(parse_year_in_bounds("1989"), Ok(1989));
        assert_eq!(parse_year_in_bounds("2022"), Ok(2022));
        assert!(parse_year_in_bounds("1988").is_err());
        assert!(parse_year_in_bounds("2023").is_err());
        assert!(parse_year_in_bounds("two thousand").is_err());
    }

    #[test]
    fn cli_parses_a_full_run_invocation() {
        let cli = Cli::try_parse_from([
            "atlas",
            "run",
            "--series",
            "homicide-rate",
            "--years",
            "2000",
            "2010",
            "--no-chart",
        ])
        .unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.series, Series::HomicideRate);
                assert_eq!(args.years, vec![2000, 2010]);
                assert!(args.common.no_chart);
            }
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn out_of_range_year_flags_are_rejected() {
        let result = Cli::try_parse_from([
            "atlas", "run", "--series", "homicides", "--years", "1960",
        ]);
        assert!(result.is_err());
    }
}
