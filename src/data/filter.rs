use std::collections::BTreeSet;

use super::model::{BookingDataset, Month};

// ---------------------------------------------------------------------------
// Filter selection: which values are selected on each axis
// ---------------------------------------------------------------------------

/// Countries pre-selected when a dataset is loaded. Everything else starts
/// unchecked, matching the dashboard's Lisbon-centric default view.
pub const DEFAULT_COUNTRIES: [&str; 5] = ["PRT", "GBR", "FRA", "ESP", "DEU"];

/// Multi-select state for the three filter axes. A row is visible only when
/// its value is selected on every axis, so an empty set on any axis hides
/// the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<Month>,
    pub countries: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected: the filtered view equals the full table.
    pub fn all(dataset: &BookingDataset) -> Self {
        FilterSelection {
            years: dataset.years.iter().copied().collect(),
            months: dataset.months.iter().copied().collect(),
            countries: dataset.countries.iter().cloned().collect(),
        }
    }

    /// Initial selection for a freshly loaded dataset: all years, all months,
    /// countries restricted to [`DEFAULT_COUNTRIES`] (intersected with what
    /// the file actually contains).
    pub fn default_for(dataset: &BookingDataset) -> Self {
        FilterSelection {
            years: dataset.years.iter().copied().collect(),
            months: dataset.months.iter().copied().collect(),
            countries: dataset
                .countries
                .iter()
                .filter(|c| DEFAULT_COUNTRIES.contains(&c.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// True when some axis has nothing selected, i.e. the filtered table is
    /// empty no matter what the data holds.
    pub fn any_axis_empty(&self) -> bool {
        self.years.is_empty() || self.months.is_empty() || self.countries.is_empty()
    }
}

/// Return indices of bookings that pass all three filters.
///
/// A booking passes when its year, month, and country are each members of
/// the corresponding selected set. No other predicate exists; an empty
/// result is a valid outcome, flagged by the UI rather than treated as an
/// error.
pub fn filtered_indices(dataset: &BookingDataset, selection: &FilterSelection) -> Vec<usize> {
    if selection.any_axis_empty() {
        return Vec::new();
    }
    dataset
        .bookings
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            selection.years.contains(&b.arrival_year)
                && selection.months.contains(&b.arrival_month)
                && selection.countries.contains(&b.country)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Booking;

    fn booking(year: i32, month: Month, country: &str) -> Booking {
        Booking {
            is_canceled: false,
            lead_time: 10,
            arrival_year: year,
            arrival_month: month,
            country: country.to_string(),
            is_repeated_guest: false,
            previous_cancellations: 0,
            adults: 2,
            children: 0,
            babies: 0,
            weekend_nights: 0,
            week_nights: 3,
            agent: None,
        }
    }

    fn sample_dataset() -> BookingDataset {
        BookingDataset::from_bookings(vec![
            booking(2015, Month::July, "PRT"),
            booking(2015, Month::July, "GBR"),
            booking(2016, Month::July, "PRT"),
            booking(2016, Month::August, "PRT"),
            booking(2017, Month::July, "PRT"),
            booking(2016, Month::July, "USA"),
        ])
    }

    #[test]
    fn rows_match_all_three_predicates_exactly() {
        let ds = sample_dataset();
        let mut sel = FilterSelection::all(&ds);
        sel.years = [2015, 2016].into_iter().collect();
        sel.months = [Month::July].into_iter().collect();
        sel.countries = ["PRT".to_string()].into_iter().collect();

        let idx = filtered_indices(&ds, &sel);
        assert_eq!(idx, vec![0, 2]);
        for i in idx {
            let b = &ds.bookings[i];
            assert!(b.arrival_year == 2015 || b.arrival_year == 2016);
            assert_eq!(b.arrival_month, Month::July);
            assert_eq!(b.country, "PRT");
        }
    }

    #[test]
    fn empty_axis_yields_empty_result() {
        let ds = sample_dataset();
        for axis in 0..3 {
            let mut sel = FilterSelection::all(&ds);
            match axis {
                0 => sel.years.clear(),
                1 => sel.months.clear(),
                _ => sel.countries.clear(),
            }
            assert!(sel.any_axis_empty());
            assert!(filtered_indices(&ds, &sel).is_empty());
        }
    }

    #[test]
    fn select_all_reproduces_full_table() {
        let ds = sample_dataset();
        let sel = FilterSelection::all(&ds);
        assert_eq!(filtered_indices(&ds, &sel).len(), ds.len());
    }

    #[test]
    fn default_selection_restricts_countries_to_known_five() {
        let ds = sample_dataset();
        let sel = FilterSelection::default_for(&ds);
        assert_eq!(sel.years.len(), ds.years.len());
        assert_eq!(sel.months.len(), ds.months.len());
        // USA is present in the data but not in the default country list.
        assert_eq!(
            sel.countries,
            ["GBR".to_string(), "PRT".to_string()].into_iter().collect()
        );
    }
}
