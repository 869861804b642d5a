use std::collections::BTreeMap;

use super::model::{Diagnosis, Measure, TumorRecord};

/// Counts and means over a row subset.  Recomputed on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    /// Every diagnosis is present, absent ones with a count of 0.
    pub count_by_category: BTreeMap<Diagnosis, usize>,
    /// `None` when there are no rows to average.
    pub means: BTreeMap<Measure, Option<f64>>,
}

impl Summary {
    pub fn count(&self, diagnosis: Diagnosis) -> usize {
        self.count_by_category.get(&diagnosis).copied().unwrap_or(0)
    }

    pub fn mean(&self, measure: Measure) -> Option<f64> {
        self.means.get(&measure).copied().flatten()
    }

    /// Fraction of rows with `diagnosis`, `None` for an empty subset.
    pub fn share(&self, diagnosis: Diagnosis) -> Option<f64> {
        (self.total > 0).then(|| self.count(diagnosis) as f64 / self.total as f64)
    }
}

/// Aggregate `rows` into a [`Summary`].
pub fn summarize(rows: &[TumorRecord]) -> Summary {
    let mut count_by_category: BTreeMap<Diagnosis, usize> =
        Diagnosis::ALL.iter().map(|&d| (d, 0)).collect();
    let mut sums = [0.0_f64; Measure::COUNT];

    for row in rows {
        *count_by_category.entry(row.diagnosis).or_insert(0) += 1;
        for (sum, measure) in sums.iter_mut().zip(Measure::ALL) {
            *sum += row.value(measure);
        }
    }

    let total = rows.len();
    let means = Measure::ALL
        .iter()
        .zip(sums)
        .map(|(&m, sum)| (m, (total > 0).then(|| sum / total as f64)))
        .collect();

    Summary {
        total,
        count_by_category,
        means,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::{apply, CategoryFilter, FilterSpec, RangeFilter};
    use crate::data::model::tests::{arb_dataset, arb_diagnoses, three_rows};
    use crate::data::model::Dataset;

    #[test]
    fn scenario_area_window() {
        let ds = three_rows();
        let spec = FilterSpec::unfiltered(&ds).with_range(RangeFilter::new(
            Measure::Area,
            300.0,
            600.0,
            ds.bounds(Measure::Area).unwrap(),
        ));
        let s = summarize(apply(&ds, &spec).rows());

        assert_eq!(s.total, 2);
        assert_eq!(s.count(Diagnosis::Malignant), 1);
        assert_eq!(s.count(Diagnosis::Benign), 1);
        assert_eq!(s.mean(Measure::Area), Some(400.0));
        assert_eq!(s.share(Diagnosis::Benign), Some(0.5));
    }

    #[test]
    fn empty_rows_report_undefined_means() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.count_by_category.len(), Diagnosis::ALL.len());
        assert!(s.count_by_category.values().all(|&c| c == 0));
        assert_eq!(s.means.len(), Measure::COUNT);
        assert!(s.means.values().all(Option::is_none));
        assert_eq!(s.share(Diagnosis::Malignant), None);
    }

    #[test]
    fn nothing_selected_summarizes_to_zero() {
        let ds = three_rows();
        let spec = FilterSpec::unfiltered(&ds)
            .with_category(CategoryFilter::new(&BTreeSet::new(), ds.categories()));
        let s = summarize(apply(&ds, &spec).rows());
        assert_eq!(s.total, 0);
        assert_eq!(s.mean(Measure::Radius), None);
    }

    #[test]
    fn category_counts_sum_to_total() {
        let ds = three_rows();
        let s = summarize(ds.rows());
        assert_eq!(s.total, ds.len());
        assert_eq!(s.count_by_category.values().sum::<usize>(), s.total);
        assert_eq!(s.count(Diagnosis::Malignant), 2);
    }

    #[test]
    fn each_measure_is_averaged_from_its_own_column() {
        use crate::data::model::TumorRecord;

        let ds = Dataset::from_records(vec![
            TumorRecord::new(1, Diagnosis::Malignant, [10.0, 70.0, 300.0, 0.2, 0.1, 0.18]),
            TumorRecord::new(2, Diagnosis::Benign, [14.0, 90.0, 500.0, 0.4, 0.05, 0.22]),
        ])
        .unwrap();
        let s = summarize(ds.rows());

        assert_eq!(s.mean(Measure::Radius), Some(12.0));
        assert_eq!(s.mean(Measure::Perimeter), Some(80.0));
        assert!((s.mean(Measure::Concavity).unwrap() - 0.3).abs() < 1e-12);
        assert!((s.mean(Measure::ConcavePoints).unwrap() - 0.075).abs() < 1e-12);
        assert!((s.mean(Measure::Symmetry).unwrap() - 0.2).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_counts_add_up(ds in arb_dataset(), allowed in arb_diagnoses()) {
            let spec = FilterSpec::unfiltered(&ds)
                .with_category(CategoryFilter::new(&allowed, ds.categories()));
            let rows = apply(&ds, &spec);
            let s = summarize(rows.rows());

            prop_assert_eq!(s.total, rows.len());
            prop_assert_eq!(s.count_by_category.len(), Diagnosis::ALL.len());
            prop_assert_eq!(s.count_by_category.values().sum::<usize>(), s.total);
            for d in Diagnosis::ALL {
                let expected = rows.rows().iter().filter(|r| r.diagnosis == d).count();
                prop_assert_eq!(s.count(d), expected);
            }
        }

        #[test]
        fn prop_means_defined_iff_rows_exist(ds in arb_dataset()) {
            let s = summarize(ds.rows());
            for measure in Measure::ALL {
                match (s.mean(measure), ds.bounds(measure)) {
                    (None, None) => prop_assert!(ds.is_empty()),
                    (Some(mean), Some(b)) => {
                        prop_assert!(mean >= b.min - 1e-9 && mean <= b.max + 1e-9);
                    }
                    (mean, bounds) => {
                        prop_assert!(false, "mean {:?} with bounds {:?}", mean, bounds);
                    }
                }
            }
        }
    }
}
