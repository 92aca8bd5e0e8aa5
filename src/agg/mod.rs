//! Year filtering and (state, year) mean aggregation.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{DataPoint, State, StateYearMean};

/// Filter `points` to the target years, group by (state, year), and compute
/// the arithmetic mean per group.
///
/// Groups with no surviving points simply produce no row. Output is ordered
/// by (state, year), so reports, exports, and charts are stable across runs.
pub fn aggregate(points: &[DataPoint], years: &BTreeSet<i32>) -> Vec<StateYearMean> {
    let mut groups: BTreeMap<(State, i32), (f64, usize)> = BTreeMap::new();

    for point in points {
        if !years.contains(&point.year) {
            continue;
        }
        let entry = groups
            .entry((point.state.clone(), point.year))
            .or_insert((0.0, 0));
        entry.0 += point.value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((state, year), (sum, count))| StateYearMean {
            state,
            year,
            mean: sum / count as f64,
        })
        .collect()
}

/// Distinct years present in an aggregated table, in ascending order.
pub fn years_present(rows: &[StateYearMean]) -> BTreeSet<i32> {
    rows.iter().map(|row| row.year).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(value: f64, year: i32, state: &str) -> DataPoint {
        DataPoint {
            value,
            year,
            municipality: 0,
            state: State::Named(state.to_string()),
        }
    }

    fn years(list: &[i32]) -> BTreeSet<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn mean_of_a_single_group() {
        let points = vec![
            point(1.0, 2000, "Acre"),
            point(2.0, 2000, "Acre"),
            point(3.0, 2000, "Acre"),
        ];
        let rows = aggregate(&points, &years(&[2000]));
        assert_eq!(
            rows,
            vec![StateYearMean {
                state: State::Named("Acre".to_string()),
                year: 2000,
                mean: 2.0,
            }]
        );
    }

    #[test]
    fn only_target_years_survive() {
        let points = vec![
            point(1.0, 2000, "Acre"),
            point(9.0, 2001, "Acre"),
            point(5.0, 2010, "Acre"),
        ];
        let target = years(&[2000, 2010]);
        let rows = aggregate(&points, &target);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| target.contains(&row.year)));
    }

    #[test]
    fn groups_are_keyed_by_state_and_year() {
        let points = vec![
            point(10.0, 2000, "Acre"),
            point(20.0, 2000, "Bahia"),
            point(30.0, 2010, "Acre"),
        ];
        let rows = aggregate(&points, &years(&[2000, 2010]));
        assert_eq!(rows.len(), 3);
        // BTreeMap ordering: Acre/2000, Acre/2010, Bahia/2000.
        assert_eq!(rows[0].mean, 10.0);
        assert_eq!(rows[1].mean, 30.0);
        assert_eq!(rows[2].mean, 20.0);
    }

    #[test]
    fn empty_input_yields_an_empty_table() {
        let rows = aggregate(&[], &years(&[2000]));
        assert!(rows.is_empty());
    }

    #[test]
    fn aggregation_is_idempotent_under_regrouping() {
        let points = vec![
            point(1.0, 2000, "Acre"),
            point(3.0, 2000, "Acre"),
            point(7.0, 2010, "Bahia"),
        ];
        let target = years(&[2000, 2010]);
        let first = aggregate(&points, &target);

        // Re-group the already-aggregated table by the same keys.
        let regrouped: Vec<DataPoint> = first
            .iter()
            .map(|row| DataPoint {
                value: row.mean,
                year: row.year,
                municipality: 0,
                state: row.state.clone(),
            })
            .collect();
        let second = aggregate(&regrouped, &target);

        assert_eq!(first, second);
    }

    #[test]
    fn unknown_states_form_their_own_group() {
        let points = vec![
            DataPoint {
                value: 4.0,
                year: 2000,
                municipality: 1,
                state: State::Unknown,
            },
            DataPoint {
                value: 6.0,
                year: 2000,
                municipality: 2,
                state: State::Unknown,
            },
        ];
        let rows = aggregate(&points, &years(&[2000]));
        assert_eq!(
            rows,
            vec![StateYearMean {
                state: State::Unknown,
                year: 2000,
                mean: 5.0,
            }]
        );
    }

    #[test]
    fn years_present_deduplicates_and_sorts() {
        let rows = vec![
            StateYearMean { state: State::Named("Bahia".into()), year: 2010, mean: 1.0 },
            StateYearMean { state: State::Named("Acre".into()), year: 2000, mean: 1.0 },
            StateYearMean { state: State::Named("Acre".into()), year: 2010, mean: 1.0 },
        ];
        let years: Vec<i32> = years_present(&rows).into_iter().collect();
        assert_eq!(years, vec![2000, 2010]);
    }
}
