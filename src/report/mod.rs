//! Reporting utilities: formatted terminal output of aggregated tables.
//!
//! We keep formatting code in one place so:
//! - the fetch/aggregate code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::RunConfig;

/// Format the aggregated (state, year) means as a terminal table with a
/// run header.
pub fn format_means(output: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== atlas - state/year means ===\n");
    out.push_str(&format!(
        "Series: {} (id {})\n",
        config.series.display_name(),
        config.series.id()
    ));

    let years: Vec<String> = config.years.iter().map(|y| y.to_string()).collect();
    out.push_str(&format!("Years: {}\n", years.join(", ")));

    out.push_str(&format!(
        "Records: fetched={} | municipalities={} | points={} | groups={}\n",
        output.records_fetched,
        output.municipalities_indexed,
        output.points.len(),
        output.means.len()
    ));

    out.push('\n');
    out.push_str(&format!("{:<24} {:>6} {:>12}\n", "state", "year", "mean"));
    for row in &output.means {
        out.push_str(&format!(
            "{:<24} {:>6} {:>12.2}\n",
            row.state.label(),
            row.year,
            row.mean
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunConfig, Series, State, StateYearMean};

    fn config() -> RunConfig {
        RunConfig {
            series: Series::HomicideRate,
            years: [2000, 2010].into_iter().collect(),
            municipios_csv: "municipios.csv".into(),
            chart: false,
            out_dir: ".".into(),
            chart_width: 1400,
            chart_height: 800,
            export: None,
        }
    }

    #[test]
    fn header_names_series_years_and_counts() {
        let output = RunOutput {
            records_fetched: 3,
            municipalities_indexed: 2,
            points: Vec::new(),
            means: vec![StateYearMean {
                state: State::Named("Acre".to_string()),
                year: 2000,
                mean: 18.625,
            }],
        };
        let text = format_means(&output, &config());
        assert!(text.contains("taxa de homicídios (id 20)"));
        assert!(text.contains("Years: 2000, 2010"));
        assert!(text.contains("fetched=3"));
        assert!(text.contains("groups=1"));
        // Means print with two decimals.
        assert!(text.contains("18.62"));
    }

    #[test]
    fn unknown_rows_print_their_label() {
        let output = RunOutput {
            records_fetched: 1,
            municipalities_indexed: 0,
            points: Vec::new(),
            means: vec![StateYearMean {
                state: State::Unknown,
                year: 2010,
                mean: 1.0,
            }],
        };
        let text = format_means(&output, &config());
        assert!(text.contains("unknown"));
    }
}
