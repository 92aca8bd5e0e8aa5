//! Raw record -> `DataPoint` parsing.
//!
//! The period field is ISO-date-like (`"2000-01-01"`); the year is the
//! integer prefix before the first hyphen. There is no error aggregation:
//! the first malformed record aborts the whole parse with a message naming
//! the offending field and value.

use crate::data::ipea::RawRecord;
use crate::data::municipios::MunicipioIndex;
use crate::error::AppError;
use crate::domain::DataPoint;

/// Convert every raw API record into a typed data point, resolving states
/// through the municipality index.
pub fn parse_records(
    records: &[RawRecord],
    index: &MunicipioIndex,
) -> Result<Vec<DataPoint>, AppError> {
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        out.push(parse_record(record, index)?);
    }
    Ok(out)
}

fn parse_record(record: &RawRecord, index: &MunicipioIndex) -> Result<DataPoint, AppError> {
    let value: f64 = record.valor.trim().parse().map_err(|_| {
        AppError::new(
            4,
            format!(
                "Invalid `valor` '{}' for municipality {}.",
                record.valor, record.cod
            ),
        )
    })?;

    let year = extract_year(&record.periodo)?;

    Ok(DataPoint {
        value,
        year,
        municipality: record.cod,
        state: index.state_for(record.cod),
    })
}

/// Parse the leading year of an ISO-date-like period string.
pub fn extract_year(periodo: &str) -> Result<i32, AppError> {
    let prefix = match periodo.find('-') {
        Some(idx) => &periodo[..idx],
        None => periodo,
    };
    prefix.parse().map_err(|_| {
        AppError::new(
            4,
            format!("Invalid `periodo` '{periodo}': expected a leading year."),
        )
    })
}
