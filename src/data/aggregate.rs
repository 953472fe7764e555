use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

use super::model::{BookingDataset, Month};

// ---------------------------------------------------------------------------
// Cancellation status
// ---------------------------------------------------------------------------

/// The 0/1 cancellation flag mapped to its chart label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CancelStatus {
    NotCanceled,
    Canceled,
}

impl CancelStatus {
    pub fn from_flag(is_canceled: bool) -> Self {
        if is_canceled {
            CancelStatus::Canceled
        } else {
            CancelStatus::NotCanceled
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CancelStatus::NotCanceled => "Not Canceled",
            CancelStatus::Canceled => "Canceled",
        }
    }
}

impl fmt::Display for CancelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Monthly aggregate – (month, status) group counts
// ---------------------------------------------------------------------------

/// One group of the monthly chart: bookings of one status in one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySlice {
    pub month: Month,
    pub status: CancelStatus,
    pub count: u64,
}

/// Group the filtered rows by (arrival month, cancellation status) and count
/// each group. Output is ordered January→December, then Not Canceled before
/// Canceled within a month — calendar order regardless of how months appear
/// in the source file or the selection.
pub fn monthly_breakdown(dataset: &BookingDataset, indices: &[usize]) -> Vec<MonthlySlice> {
    // Month's Ord is calendar order, so the BTreeMap does the sorting.
    let mut groups: BTreeMap<(Month, CancelStatus), u64> = BTreeMap::new();
    for &i in indices {
        let b = &dataset.bookings[i];
        *groups
            .entry((b.arrival_month, CancelStatus::from_flag(b.is_canceled)))
            .or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|((month, status), count)| MonthlySlice {
            month,
            status,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Country aggregate – bookings per country
// ---------------------------------------------------------------------------

/// Bookings per country, for the top-country metric and the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

/// Count filtered rows per country, ordered by count descending. Ties keep
/// the order in which the countries were first encountered in the rows, so
/// the result is deterministic for a given table.
pub fn country_totals(dataset: &BookingDataset, indices: &[usize]) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for &i in indices {
        let country = dataset.bookings[i].country.as_str();
        match counts.entry(country) {
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(1);
                first_seen.push(country);
            }
            std::collections::hash_map::Entry::Occupied(mut e) => {
                *e.get_mut() += 1;
            }
        }
    }

    let mut totals: Vec<CountryCount> = first_seen
        .into_iter()
        .map(|country| CountryCount {
            country: country.to_string(),
            count: counts[country],
        })
        .collect();
    // Stable sort preserves first-encounter order among equal counts.
    totals.sort_by(|a, b| b.count.cmp(&a.count));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Booking;

    fn booking(month: Month, canceled: bool, country: &str) -> Booking {
        Booking {
            is_canceled: canceled,
            lead_time: 5,
            arrival_year: 2016,
            arrival_month: month,
            country: country.to_string(),
            is_repeated_guest: false,
            previous_cancellations: 0,
            adults: 1,
            children: 0,
            babies: 0,
            weekend_nights: 1,
            week_nights: 1,
            agent: None,
        }
    }

    #[test]
    fn monthly_breakdown_is_calendar_ordered() {
        // Months deliberately out of order in the source rows.
        let ds = BookingDataset::from_bookings(vec![
            booking(Month::October, false, "PRT"),
            booking(Month::February, true, "PRT"),
            booking(Month::February, false, "PRT"),
            booking(Month::July, false, "PRT"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let slices = monthly_breakdown(&ds, &indices);

        let months: Vec<Month> = slices.iter().map(|s| s.month).collect();
        assert_eq!(
            months,
            vec![Month::February, Month::February, Month::July, Month::October]
        );
        // Within February: Not Canceled sorts before Canceled.
        assert_eq!(slices[0].status, CancelStatus::NotCanceled);
        assert_eq!(slices[1].status, CancelStatus::Canceled);
    }

    #[test]
    fn monthly_counts_sum_to_total_reservations() {
        let ds = BookingDataset::from_bookings(vec![
            booking(Month::May, false, "PRT"),
            booking(Month::May, true, "GBR"),
            booking(Month::June, false, "PRT"),
            booking(Month::June, false, "PRT"),
            booking(Month::December, true, "FRA"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let total: u64 = monthly_breakdown(&ds, &indices)
            .iter()
            .map(|s| s.count)
            .sum();
        assert_eq!(total, indices.len() as u64);
    }

    #[test]
    fn status_labels_match_the_chart_legend() {
        assert_eq!(CancelStatus::from_flag(false).label(), "Not Canceled");
        assert_eq!(CancelStatus::from_flag(true).to_string(), "Canceled");
    }

    #[test]
    fn country_totals_order_by_count_then_first_encounter() {
        let ds = BookingDataset::from_bookings(vec![
            booking(Month::May, false, "GBR"),
            booking(Month::May, false, "PRT"),
            booking(Month::May, false, "PRT"),
            booking(Month::May, false, "FRA"),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let totals = country_totals(&ds, &indices);

        assert_eq!(totals[0].country, "PRT");
        assert_eq!(totals[0].count, 2);
        // GBR and FRA tie at 1; GBR appeared first.
        assert_eq!(totals[1].country, "GBR");
        assert_eq!(totals[2].country, "FRA");
    }

    #[test]
    fn country_totals_only_cover_the_filtered_rows() {
        let ds = BookingDataset::from_bookings(vec![
            booking(Month::May, false, "GBR"),
            booking(Month::May, false, "PRT"),
        ]);
        let totals = country_totals(&ds, &[1]);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].country, "PRT");
    }
}
