//! Municipality reference index.
//!
//! Loads the IBGE municipality CSV once per run and answers
//! code -> state (UF) lookups for the parser. A missing code is the one
//! failure the pipeline recovers from: it is reported on stderr and the
//! point carries `State::Unknown` instead of aborting the run.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::State;
use crate::error::AppError;

const STATE_COLUMN: &str = "nome_uf";
const CODE_COLUMN: &str = "codigo_municipio";

/// Read-only code -> state name lookup table.
#[derive(Debug, Clone)]
pub struct MunicipioIndex {
    states: HashMap<i64, String>,
}

impl MunicipioIndex {
    /// Load the reference CSV from disk.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to open municipality CSV '{}': {e}", path.display()),
            )
        })?;
        Self::from_reader(file)
    }

    /// Build the index from any CSV source with at least the
    /// `nome_uf` and `codigo_municipio` columns.
    pub fn from_reader(source: impl Read) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read municipality CSV headers: {e}")))?
            .clone();
        let header_map = build_header_map(&headers);

        let state_idx = *header_map.get(STATE_COLUMN).ok_or_else(|| {
            AppError::new(2, format!("Municipality CSV is missing the `{STATE_COLUMN}` column."))
        })?;
        let code_idx = *header_map.get(CODE_COLUMN).ok_or_else(|| {
            AppError::new(2, format!("Municipality CSV is missing the `{CODE_COLUMN}` column."))
        })?;

        let mut states = HashMap::new();
        for (idx, result) in reader.records().enumerate() {
            // Header occupies line 1; records start on line 2.
            let line = idx + 2;
            let record = result
                .map_err(|e| AppError::new(2, format!("Municipality CSV parse error on line {line}: {e}")))?;

            let code_field = field(&record, code_idx, line, CODE_COLUMN)?;
            let code: i64 = code_field.parse().map_err(|_| {
                AppError::new(
                    2,
                    format!("Invalid municipality code '{code_field}' on line {line}."),
                )
            })?;
            let state = field(&record, state_idx, line, STATE_COLUMN)?;

            // Codes are assumed unique in the source; last row wins.
            states.insert(code, state.to_string());
        }

        Ok(Self { states })
    }

    /// Resolve a municipality code to its state.
    ///
    /// A miss never fails the run: it is noted on stderr and resolved to
    /// `State::Unknown`.
    pub fn state_for(&self, code: i64) -> State {
        match self.states.get(&code) {
            Some(name) => State::Named(name.clone()),
            None => {
                eprintln!("No state found for municipality code {code}; keeping the point as unknown.");
                State::Unknown
            }
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn field<'r>(
    record: &'r StringRecord,
    idx: usize,
    line: usize,
    column: &str,
) -> Result<&'r str, AppError> {
    record.get(idx).ok_or_else(|| {
        AppError::new(
            2,
            format!("Municipality CSV line {line} has no `{column}` field."),
        )
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header; without stripping it the column check reports
    // `codigo_municipio` as missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
