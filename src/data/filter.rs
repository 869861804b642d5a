use std::collections::BTreeSet;

use super::model::{Dataset, Diagnosis, FieldBounds, Measure, TumorRecord};

// ---------------------------------------------------------------------------
// Range predicate on one numeric column
// ---------------------------------------------------------------------------

/// Inclusive `[lower, upper]` bound on one measure.
///
/// Always satisfies `lower <= upper`, with both ends inside the observed
/// bounds of the full dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub measure: Measure,
    lower: f64,
    upper: f64,
}

impl RangeFilter {
    /// Order the pair, then clamp both ends into `bounds`.
    ///
    /// A non-finite end falls back to the matching end of `bounds`.
    pub fn new(measure: Measure, lower: f64, upper: f64, bounds: FieldBounds) -> Self {
        let lower = if lower.is_finite() { lower } else { bounds.min };
        let upper = if upper.is_finite() { upper } else { bounds.max };
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let (lower, upper) = (bounds.clamp(lower), bounds.clamp(upper));
        Self {
            measure,
            lower: lower.min(upper),
            upper: lower.max(upper),
        }
    }

    /// Spans the whole observed range, i.e. admits every row.
    pub fn full(measure: Measure, bounds: FieldBounds) -> Self {
        Self::new(measure, bounds.min, bounds.max, bounds)
    }

    pub fn contains(&self, row: &TumorRecord) -> bool {
        let v = row.value(self.measure);
        v >= self.lower && v <= self.upper
    }
}

// ---------------------------------------------------------------------------
// Set-membership predicate on the diagnosis column
// ---------------------------------------------------------------------------

/// Allowed diagnoses.  An empty set admits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    allowed: BTreeSet<Diagnosis>,
}

impl CategoryFilter {
    /// Keep only the values of `allowed` that were actually `observed`.
    pub fn new(allowed: &BTreeSet<Diagnosis>, observed: &BTreeSet<Diagnosis>) -> Self {
        Self {
            allowed: allowed.intersection(observed).copied().collect(),
        }
    }

    pub fn contains(&self, row: &TumorRecord) -> bool {
        self.allowed.contains(&row.diagnosis)
    }
}

// ---------------------------------------------------------------------------
// Combined predicate
// ---------------------------------------------------------------------------

/// One category filter AND one range filter per measure.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub ranges: Vec<RangeFilter>,
}

impl FilterSpec {
    /// Every observed diagnosis allowed, every range at its full extent.
    ///
    /// An empty dataset has no bounds, so the spec carries no range filters.
    pub fn unfiltered(dataset: &Dataset) -> Self {
        Self {
            category: CategoryFilter::new(dataset.categories(), dataset.categories()),
            ranges: Measure::ALL
                .iter()
                .filter_map(|&m| dataset.bounds(m).map(|b| RangeFilter::full(m, b)))
                .collect(),
        }
    }

    /// Replace the range filter for `filter.measure`.
    pub fn with_range(mut self, filter: RangeFilter) -> Self {
        match self.ranges.iter_mut().find(|r| r.measure == filter.measure) {
            Some(slot) => *slot = filter,
            None => self.ranges.push(filter),
        }
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Whether `row` passes every predicate.
    pub fn matches(&self, row: &TumorRecord) -> bool {
        self.category.contains(row) && self.ranges.iter().all(|r| r.contains(row))
    }
}

/// Return indices of rows that pass the spec, in dataset order.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| spec.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// The order-preserving subsequence of `dataset` that passes `spec`.
pub fn apply(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    dataset.subset(&filtered_indices(dataset, spec))
}
