use crate::data::aggregate::{country_totals, monthly_breakdown, CountryCount, MonthlySlice};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::metrics::Metrics;
use crate::data::model::BookingDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<BookingDataset>,

    /// Multi-select state for the three filter axes.
    pub filters: FilterSelection,

    /// Indices of bookings passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics over the filtered rows; None when the view is empty.
    pub metrics: Option<Metrics>,

    /// (month, status) counts feeding the monthly chart.
    pub monthly: Vec<MonthlySlice>,

    /// Per-country counts feeding the map.
    pub country_counts: Vec<CountryCount>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterSelection::default(),
            visible_indices: Vec::new(),
            metrics: None,
            monthly: Vec::new(),
            country_counts: Vec::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and initialise the filters to their
    /// defaults (all years, all months, the five default countries).
    pub fn set_dataset(&mut self, dataset: BookingDataset) {
        self.filters = FilterSelection::default_for(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the filtered view and everything derived from it. Called
    /// after every filter change; the whole pipeline is a pure function of
    /// (dataset, selection).
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            self.metrics = None;
            self.monthly.clear();
            self.country_counts.clear();
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        self.metrics = Metrics::compute(ds, &self.visible_indices);
        self.monthly = monthly_breakdown(ds, &self.visible_indices);
        self.country_counts = country_totals(ds, &self.visible_indices);
    }

    /// Whether the current filtered view has no rows. The dashboard shows a
    /// warning and renders nothing else in this case.
    pub fn view_is_empty(&self) -> bool {
        self.visible_indices.is_empty()
    }
}
