use std::collections::{BTreeMap, BTreeSet};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{apply, CategoryFilter, FilterSpec, RangeFilter};
use crate::data::loader::{self, LoadError};
use crate::data::model::{Dataset, Diagnosis, Measure};
use crate::data::summary::{summarize, Summary};

// ---------------------------------------------------------------------------
// Widget selections
// ---------------------------------------------------------------------------

/// What the user currently has selected in the sidebar.
///
/// Owned by the UI; turned into a fresh [`FilterSpec`] on every evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub diagnoses: BTreeSet<Diagnosis>,
    /// `(lower, upper)` slider positions per measure.
    pub ranges: BTreeMap<Measure, (f64, f64)>,
}

impl Selection {
    /// Everything selected: all observed diagnoses and full ranges.
    pub fn everything(dataset: &Dataset) -> Self {
        Self {
            diagnoses: dataset.categories().clone(),
            ranges: Measure::ALL
                .iter()
                .filter_map(|&m| dataset.bounds(m).map(|b| (m, (b.min, b.max))))
                .collect(),
        }
    }

    /// Build the predicate for `dataset` from the current widget values.
    pub fn to_spec(&self, dataset: &Dataset) -> FilterSpec {
        let mut spec = FilterSpec::unfiltered(dataset)
            .with_category(CategoryFilter::new(&self.diagnoses, dataset.categories()));
        for (&measure, &(lower, upper)) in &self.ranges {
            if let Some(bounds) = dataset.bounds(measure) {
                spec = spec.with_range(RangeFilter::new(measure, lower, upper, bounds));
            }
        }
        spec
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Full dataset (None when loading failed).
    pub dataset: Option<Dataset>,

    /// Terminal load failure shown instead of the dashboard.
    pub load_error: Option<LoadError>,

    /// Sidebar selections.
    pub selection: Selection,

    /// Rows passing the current selection (cached).
    pub filtered: Dataset,

    /// Aggregates over `filtered` (cached).
    pub summary: Summary,

    /// Measure shown in the histogram.
    pub histogram_measure: Measure,

    pub color_map: ColorMap,
}

impl AppState {
    /// Start without data; see [`AppState::load`].
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            load_error: None,
            selection: Selection::default(),
            filtered: Dataset::default(),
            summary: summarize(&[]),
            histogram_measure: Measure::Area,
            color_map: ColorMap::default(),
        }
    }

    /// Load the configured data file once.
    pub fn load(config: DashboardConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = Self::new(config);
        match loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} tumor records from {}", dataset.len(), path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.load_error = Some(e);
            }
        }
        state
    }

    /// Ingest a loaded dataset and select everything.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = Selection::everything(&dataset);
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Re-evaluate filter and summary after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let spec = self.selection.to_spec(ds);
            self.filtered = apply(ds, &spec);
            self.summary = summarize(self.filtered.rows());
            log::debug!("{} of {} rows pass the filters", self.filtered.len(), ds.len());
        }
    }

    /// Toggle a single diagnosis in the category filter.
    pub fn toggle_diagnosis(&mut self, diagnosis: Diagnosis) {
        if !self.selection.diagnoses.remove(&diagnosis) {
            self.selection.diagnoses.insert(diagnosis);
        }
        self.refilter();
    }

    /// Select all observed diagnoses.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.diagnoses = ds.categories().clone();
            self.refilter();
        }
    }

    /// Deselect all diagnoses.
    pub fn select_none(&mut self) {
        self.selection.diagnoses.clear();
        self.refilter();
    }

    /// Move one range slider pair.
    pub fn set_range(&mut self, measure: Measure, lower: f64, upper: f64) {
        self.selection.ranges.insert(measure, (lower, upper));
        self.refilter();
    }

    /// Back to the unfiltered view.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = Selection::everything(ds);
            self.refilter();
        }
    }
}
