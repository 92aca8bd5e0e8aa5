//! Per-year bar charts of state means, rendered to PNG via Plotters.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::agg::years_present;
use crate::domain::{Series, StateYearMean};
use crate::error::AppError;

/// Render one bar chart per year present in `rows` (one bar per state) and
/// return the written file paths.
pub fn render_year_charts(
    rows: &[StateYearMean],
    series: Series,
    out_dir: &Path,
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create chart directory '{}': {e}", out_dir.display()),
        )
    })?;

    let mut written = Vec::new();
    for year in years_present(rows) {
        let bars = year_bars(rows, year);
        if bars.is_empty() {
            continue;
        }
        let path = chart_path(out_dir, series, year);
        draw_bar_chart(&path, series, year, &bars, width, height)?;
        written.push(path);
    }

    Ok(written)
}

/// Deterministic chart file name: series slug + year.
pub fn chart_path(out_dir: &Path, series: Series, year: i32) -> PathBuf {
    out_dir.join(format!("{}_{}.png", series.slug(), year))
}

/// (state label, mean) pairs for one year, in the table's state order.
fn year_bars(rows: &[StateYearMean], year: i32) -> Vec<(String, f64)> {
    rows.iter()
        .filter(|row| row.year == year)
        .map(|row| (row.state.label().to_string(), row.mean))
        .collect()
}

fn draw_bar_chart(
    path: &Path,
    series: Series,
    year: i32,
    bars: &[(String, f64)],
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    let fail = |e: &dyn std::fmt::Display| {
        AppError::new(4, format!("Failed to draw chart '{}': {e}", path.display()))
    };

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let y_max = bars.iter().map(|(_, mean)| *mean).fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} por estado no ano {year}", series.display_name()),
            ("sans-serif", 32),
        )
        .margin(10)
        .x_label_area_size(140)
        .y_label_area_size(70)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..y_max)
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => bars
                .get(*idx)
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        // State names are long; rotate them like any crowded category axis.
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .x_desc("estado")
        .y_desc("valor")
        .draw()
        .map_err(|e| fail(&e))?;

    for (idx, (label, mean)) in bars.iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (SegmentValue::Exact(idx), 0.0),
                    (SegmentValue::Exact(idx + 1), *mean),
                ],
                color.filled(),
            )))
            .map_err(|e| fail(&e))?
            .label(label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::State;

    fn row(state: &str, year: i32, mean: f64) -> StateYearMean {
        StateYearMean {
            state: State::Named(state.to_string()),
            year,
            mean,
        }
    }

    #[test]
    fn chart_files_are_named_by_series_and_year() {
        let path = chart_path(Path::new("charts"), Series::HomicideRate, 2019);
        assert_eq!(path, PathBuf::from("charts/taxa_de_homicidios_2019.png"));
    }

    #[test]
    fn year_bars_keep_the_table_state_order() {
        let rows = vec![
            row("Acre", 2000, 1.0),
            row("Acre", 2010, 2.0),
            row("Bahia", 2000, 3.0),
        ];
        let bars = year_bars(&rows, 2000);
        assert_eq!(
            bars,
            vec![("Acre".to_string(), 1.0), ("Bahia".to_string(), 3.0)]
        );
    }

    #[test]
    fn years_without_rows_have_no_bars() {
        let rows = vec![row("Acre", 2000, 1.0)];
        assert!(year_bars(&rows, 2019).is_empty());
    }
}
