use crate::color::ColorMap;
use crate::data::aggregate::{ChartData, ChartOptions, Metrics, derive, summarize};
use crate::data::filter::{Selection, filtered_indices};
use crate::data::model::{Dimension, DimensionValue, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Read-only once set.
    pub dataset: SalaryDataset,

    /// Chart tunables from the startup configuration.
    pub options: ChartOptions,

    /// Per-dimension filter selections.
    pub selection: Selection,

    /// Indices of records passing the current selection.
    pub visible_indices: Vec<usize>,

    /// Headline metrics for the visible records.
    pub metrics: Metrics,

    /// Chart tables, `None` when nothing is visible.
    pub charts: Option<ChartData>,

    /// Colours for remote-work modes, stable across filter changes.
    pub remote_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: SalaryDataset, options: ChartOptions) -> Self {
        let mut state = Self {
            dataset: SalaryDataset::default(),
            options,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            metrics: Metrics::default(),
            charts: None,
            remote_colors: ColorMap::new([]),
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset, reset filters to "everything" and
    /// recompute.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.selection = Selection::all(&dataset);
        self.remote_colors = remote_color_map(&dataset);
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view, metrics and chart tables from scratch.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.selection);
        let subset = self.visible_records();

        let metrics = summarize(&subset);
        let charts = (!subset.is_empty()).then(|| derive(&subset, &self.options));

        log::debug!(
            "Recomputed view: {} of {} records",
            subset.len(),
            self.dataset.len()
        );
        self.metrics = metrics;
        self.charts = charts;
    }

    /// Records in the current filtered view, in dataset order.
    pub fn visible_records(&self) -> Vec<&SalaryRecord> {
        self.visible_indices
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &DimensionValue) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        self.selection.select_all(&self.dataset, dim);
        self.refilter();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.select_none(dim);
        self.refilter();
    }
}

fn remote_color_map(dataset: &SalaryDataset) -> ColorMap {
    let modes: std::collections::BTreeSet<&str> =
        dataset.records.iter().map(|r| r.remote.as_str()).collect();
    ColorMap::new(modes)
}
