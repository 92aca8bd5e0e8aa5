//! Export aggregated means to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::StateYearMean;
use crate::error::AppError;

/// Write the aggregated table to a CSV file.
pub fn write_means_csv(path: &Path, rows: &[StateYearMean]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "state,year,mean")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in rows {
        writeln!(file, "{}", format_row(row))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn format_row(row: &StateYearMean) -> String {
    format!("{},{},{:.4}", row.state.label(), row.year, row.mean)
}
