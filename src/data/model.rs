use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Diagnosis – the category column
// ---------------------------------------------------------------------------

/// Tumor diagnosis category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Diagnosis {
    Benign,
    Malignant,
}

impl Diagnosis {
    /// Every category, in display order.
    pub const ALL: [Diagnosis; 2] = [Diagnosis::Benign, Diagnosis::Malignant];

    /// Short code used by the source file (`B` / `M`).
    pub fn code(self) -> &'static str {
        match self {
            Diagnosis::Benign => "B",
            Diagnosis::Malignant => "M",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::Benign => "Benign",
            Diagnosis::Malignant => "Malignant",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Raw diagnosis text that matched none of the known spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiagnosis(pub String);

impl FromStr for Diagnosis {
    type Err = UnknownDiagnosis;

    /// Accepts `M`/`B`, `malignant`/`benign` and `1`/`0`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "benign" | "0" => Ok(Diagnosis::Benign),
            "m" | "malignant" | "1" => Ok(Diagnosis::Malignant),
            _ => Err(UnknownDiagnosis(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Measure – the fixed set of numeric columns
// ---------------------------------------------------------------------------

/// A numeric measurement column (each one a per-tumor mean value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Measure {
    Radius,
    Perimeter,
    Area,
    Concavity,
    ConcavePoints,
    Symmetry,
}

impl Measure {
    pub const COUNT: usize = 6;

    pub const ALL: [Measure; Measure::COUNT] = [
        Measure::Radius,
        Measure::Perimeter,
        Measure::Area,
        Measure::Concavity,
        Measure::ConcavePoints,
        Measure::Symmetry,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Measure::Radius => "radius_mean",
            Measure::Perimeter => "perimeter_mean",
            Measure::Area => "area_mean",
            Measure::Concavity => "concavity_mean",
            Measure::ConcavePoints => "concave points_mean",
            Measure::Symmetry => "symmetry_mean",
        }
    }

    /// Human readable label for widgets and KPIs.
    pub fn label(self) -> &'static str {
        match self {
            Measure::Radius => "Mean radius",
            Measure::Perimeter => "Mean perimeter",
            Measure::Area => "Mean area",
            Measure::Concavity => "Mean concavity",
            Measure::ConcavePoints => "Mean concave points",
            Measure::Symmetry => "Mean symmetry",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// TumorRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single tumor observation. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumorRecord {
    pub id: u64,
    pub diagnosis: Diagnosis,
    measures: [f64; Measure::COUNT],
}

impl TumorRecord {
    /// `measures` is indexed in [`Measure::ALL`] order.
    pub fn new(id: u64, diagnosis: Diagnosis, measures: [f64; Measure::COUNT]) -> Self {
        Self {
            id,
            diagnosis,
            measures,
        }
    }

    pub fn value(&self, measure: Measure) -> f64 {
        self.measures[measure.index()]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Observed inclusive range of one measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    /// Clamp into `[min, max]`.  A reversed pair is treated as `[max, min]`.
    pub fn clamp(&self, value: f64) -> f64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value.max(lo).min(hi)
    }
}

/// The ordered row set with pre-computed per-column indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<TumorRecord>,
    /// Min/max of every measure. Empty when there are no rows.
    bounds: BTreeMap<Measure, FieldBounds>,
    /// Distinct diagnoses present in the rows.
    categories: BTreeSet<Diagnosis>,
}

impl Dataset {
    /// Build a dataset, rejecting duplicate ids.
    pub fn from_records(rows: Vec<TumorRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.id) {
                return Err(LoadError::DuplicateId { id: row.id });
            }
        }
        Ok(Self::from_unique(rows))
    }

    /// Build column indices from rows already known to have unique ids.
    fn from_unique(rows: Vec<TumorRecord>) -> Self {
        let mut bounds: BTreeMap<Measure, FieldBounds> = BTreeMap::new();
        let mut categories = BTreeSet::new();

        for row in &rows {
            categories.insert(row.diagnosis);
            for measure in Measure::ALL {
                let v = row.value(measure);
                bounds
                    .entry(measure)
                    .and_modify(|b| {
                        b.min = b.min.min(v);
                        b.max = b.max.max(v);
                    })
                    .or_insert(FieldBounds { min: v, max: v });
            }
        }

        Dataset {
            rows,
            bounds,
            categories,
        }
    }

    /// Order-preserving subset picked by row index.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Self::from_unique(indices.iter().map(|&i| self.rows[i]).collect())
    }

    pub fn rows(&self) -> &[TumorRecord] {
        &self.rows
    }

    /// Observed min/max of `measure`, `None` for an empty dataset.
    pub fn bounds(&self, measure: Measure) -> Option<FieldBounds> {
        self.bounds.get(&measure).copied()
    }

    pub fn categories(&self) -> &BTreeSet<Diagnosis> {
        &self.categories
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Random datasets with small integer-valued measures, so equal values
    /// and exact bound hits are common.
    pub(crate) fn arb_dataset() -> impl Strategy<Value = Dataset> {
        prop::collection::vec(
            (any::<bool>(), prop::array::uniform6(0u16..40)),
            0..40,
        )
        .prop_map(|rows| {
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(i, (malignant, raw))| {
                    let diagnosis = if malignant {
                        Diagnosis::Malignant
                    } else {
                        Diagnosis::Benign
                    };
                    TumorRecord::new(i as u64, diagnosis, raw.map(f64::from))
                })
                .collect();
            Dataset::from_unique(records)
        })
    }

    pub(crate) fn arb_diagnoses() -> impl Strategy<Value = BTreeSet<Diagnosis>> {
        prop::collection::btree_set(
            prop_oneof![Just(Diagnosis::Benign), Just(Diagnosis::Malignant)],
            0..=2,
        )
    }

    /// Row with every measure at 1.0 except area.
    pub(crate) fn record(id: u64, diagnosis: Diagnosis, area: f64) -> TumorRecord {
        let mut measures = [1.0; Measure::COUNT];
        measures[Measure::Area.index()] = area;
        TumorRecord::new(id, diagnosis, measures)
    }

    pub(crate) fn three_rows() -> Dataset {
        Dataset::from_records(vec![
            record(1, Diagnosis::Malignant, 500.0),
            record(2, Diagnosis::Benign, 300.0),
            record(3, Diagnosis::Malignant, 800.0),
        ])
        .unwrap()
    }

    #[test]
    fn diagnosis_parses_known_spellings() {
        assert_eq!("M".parse(), Ok(Diagnosis::Malignant));
        assert_eq!(" b ".parse(), Ok(Diagnosis::Benign));
        assert_eq!("Malignant".parse(), Ok(Diagnosis::Malignant));
        assert_eq!("0".parse(), Ok(Diagnosis::Benign));
        assert_eq!(
            "X".parse::<Diagnosis>(),
            Err(UnknownDiagnosis("X".to_string()))
        );
    }

    #[test]
    fn measure_columns_match_source_header() {
        let columns: Vec<_> = Measure::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(
            columns,
            [
                "radius_mean",
                "perimeter_mean",
                "area_mean",
                "concavity_mean",
                "concave points_mean",
                "symmetry_mean"
            ]
        );
    }

    #[test]
    fn bounds_and_categories_are_indexed() {
        let ds = three_rows();
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.bounds(Measure::Area),
            Some(FieldBounds {
                min: 300.0,
                max: 800.0
            })
        );
        assert_eq!(
            ds.categories().iter().copied().collect::<Vec<_>>(),
            vec![Diagnosis::Benign, Diagnosis::Malignant]
        );
    }

    #[test]
    fn clamp_tolerates_reversed_bounds() {
        let reversed = FieldBounds {
            min: 10.0,
            max: 2.0,
        };
        assert_eq!(reversed.clamp(50.0), 10.0);
        assert_eq!(reversed.clamp(-1.0), 2.0);
        assert_eq!(reversed.clamp(5.0), 5.0);
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.bounds(Measure::Radius), None);
        assert!(ds.categories().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Dataset::from_records(vec![
            record(7, Diagnosis::Benign, 1.0),
            record(7, Diagnosis::Malignant, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { id: 7 }));
    }

    #[test]
    fn subset_preserves_order() {
        let ds = three_rows();
        let sub = ds.subset(&[0, 2]);
        let ids: Vec<u64> = sub.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(sub.categories().len(), 1);
    }
}
