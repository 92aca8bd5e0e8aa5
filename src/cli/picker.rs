//! Interactive series/year selector.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `atlas` and answer two prompts" UX
//!
//! Invalid input is re-prompted without bound; `q` cancels the run.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::domain::{NEWEST_YEAR, OLDEST_YEAR, Series};
use crate::error::AppError;

/// What the user picked.
#[derive(Debug, Clone)]
pub struct Selection {
    pub series: Series,
    pub years: BTreeSet<i32>,
}

/// Prompt for target years and a series on stdin.
pub fn prompt_for_selection() -> Result<Selection, AppError> {
    let years = prompt_for_years()?;
    let series = prompt_for_series()?;
    Ok(Selection { series, years })
}

fn prompt_for_years() -> Result<BTreeSet<i32>, AppError> {
    loop {
        let input = read_prompted_line(&format!(
            "Years to analyze, space separated ({OLDEST_YEAR}-{NEWEST_YEAR}, q to quit): "
        ))?;
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        match parse_year_line(&input) {
            Ok(years) => return Ok(years),
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        }
    }
}

fn prompt_for_series() -> Result<Series, AppError> {
    println!("Available series:");
    for (idx, series) in Series::ALL.iter().enumerate() {
        println!("{:>3}) {} (id {})", idx + 1, series.display_name(), series.id());
    }

    loop {
        let input = read_prompted_line(&format!(
            "Select a series by number (1-{}, q to quit): ",
            Series::ALL.len()
        ))?;
        if input.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        match parse_series_choice(&input) {
            Ok(series) => return Ok(series),
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        }
    }
}

/// Parse a space-separated list of years, all within the covered range.
///
/// The whole line is rejected if any token is bad, so a typo never silently
/// drops one year from the analysis.
pub fn parse_year_line(line: &str) -> Result<BTreeSet<i32>, String> {
    let mut years = BTreeSet::new();
    for token in line.split_whitespace() {
        let year: i32 = token
            .parse()
            .map_err(|_| format!("'{token}' is not a year."))?;
        if !(OLDEST_YEAR..=NEWEST_YEAR).contains(&year) {
            return Err(format!(
                "Year {year} is outside the covered range {OLDEST_YEAR}-{NEWEST_YEAR}."
            ));
        }
        years.insert(year);
    }
    if years.is_empty() {
        return Err("Enter at least one year.".to_string());
    }
    Ok(years)
}

/// Parse a 1-based series menu choice.
pub fn parse_series_choice(input: &str) -> Result<Series, String> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number.", input.trim()))?;
    Series::from_menu_choice(choice).ok_or_else(|| {
        format!(
            "Invalid choice: {choice}. Enter a number between 1 and {}.",
            Series::ALL.len()
        )
    })
}

fn read_prompted_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Use `atlas run --series <name> --years <years>` for non-interactive runs.",
        ));
    }

    Ok(input.trim().to_string())
}
