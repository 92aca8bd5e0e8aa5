//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during aggregation
//! - exported to CSV
//! - rendered into charts without further conversion

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Oldest year any supported series covers. Boundary validation only;
/// the aggregator itself accepts whatever years it is handed.
pub const OLDEST_YEAR: i32 = 1989;

/// Newest year any supported series covers.
pub const NEWEST_YEAR: i32 = 2022;

/// A supported Atlas da Violência series.
///
/// Each variant carries a fixed numeric id on the IPEA API and a
/// human-readable display name. Adding a series means adding a variant
/// here and extending `ALL`; nothing else in the pipeline changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Series {
    /// Homicide rate per 100k inhabitants, by municipality.
    HomicideRate,
    /// Absolute homicide counts, by municipality.
    Homicides,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::HomicideRate, Series::Homicides];

    /// Numeric series id on the IPEA API.
    pub fn id(self) -> u32 {
        match self {
            Series::HomicideRate => 20,
            Series::Homicides => 328,
        }
    }

    /// Human-readable label for terminal output and chart captions.
    pub fn display_name(self) -> &'static str {
        match self {
            Series::HomicideRate => "taxa de homicídios",
            Series::Homicides => "homicídios",
        }
    }

    /// Filename-safe label used when naming chart files.
    pub fn slug(self) -> &'static str {
        match self {
            Series::HomicideRate => "taxa_de_homicidios",
            Series::Homicides => "homicidios",
        }
    }

    /// Map a 1-based menu choice (as typed in the interactive selector)
    /// to a series. Out-of-range choices return `None`.
    pub fn from_menu_choice(choice: usize) -> Option<Series> {
        choice
            .checked_sub(1)
            .and_then(|idx| Series::ALL.get(idx).copied())
    }
}

/// Outcome of resolving a municipality code to its state (UF).
///
/// A failed lookup is an explicit variant rather than an empty string, so
/// "reference row missing" can never be confused with a legitimately blank
/// state name downstream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    Named(String),
    Unknown,
}

impl State {
    /// Label used in reports, exports, and chart legends.
    pub fn label(&self) -> &str {
        match self {
            State::Named(name) => name,
            State::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One (value, year, municipality, state) observation derived from a raw
/// API record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub value: f64,
    pub year: i32,
    pub municipality: i64,
    pub state: State,
}

/// The per-(state, year) mean of all data points in that group.
#[derive(Debug, Clone, PartialEq)]
pub struct StateYearMean {
    pub state: State,
    pub year: i32,
    pub mean: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags or the interactive selector (plus
/// defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub series: Series,
    pub years: BTreeSet<i32>,
    pub municipios_csv: PathBuf,

    pub chart: bool,
    pub out_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,

    pub export: Option<PathBuf>,
}
