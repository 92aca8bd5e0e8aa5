//! Shared pipeline logic used by both the flag-driven and interactive
//! front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! IPEA fetch -> municipality index -> record parse -> (state, year) means
//!
//! The front-ends then focus on how the series/years were chosen and on
//! presentation (report, export, charts).

use crate::agg::aggregate;
use crate::data::ipea::IpeaClient;
use crate::data::municipios::MunicipioIndex;
use crate::data::parse::parse_records;
use crate::domain::{DataPoint, RunConfig, StateYearMean};
use crate::error::AppError;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records_fetched: usize,
    pub municipalities_indexed: usize,
    pub points: Vec<DataPoint>,
    pub means: Vec<StateYearMean>,
}

/// Execute the full pipeline and return the computed outputs.
pub fn execute(config: &RunConfig) -> Result<RunOutput, AppError> {
    let client = IpeaClient::from_env();
    println!(
        "Fetching '{}' (series {}) from the IPEA API...",
        config.series.display_name(),
        config.series.id()
    );
    let records = client.fetch_series(config.series)?;
    println!("Fetched {} records.", records.len());

    let index = MunicipioIndex::load(&config.municipios_csv)?;
    println!(
        "Indexed {} municipalities from '{}'.",
        index.len(),
        config.municipios_csv.display()
    );

    let points = parse_records(&records, &index)?;
    let means = aggregate(&points, &config.years);

    Ok(RunOutput {
        records_fetched: records.len(),
        municipalities_indexed: index.len(),
        points,
        means,
    })
}
