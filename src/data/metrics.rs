use std::collections::HashSet;

use serde::Serialize;

use super::aggregate::country_totals;
use super::model::BookingDataset;

// ---------------------------------------------------------------------------
// Scalar metrics over the filtered table
// ---------------------------------------------------------------------------

/// The eight headline numbers shown above the charts. Recomputed from the
/// filtered rows on every interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Filtered row count.
    pub total_reservations: usize,
    /// Mean lead time, days.
    pub avg_lead_time: f64,
    /// Mean of the repeat-guest flag, as a percentage.
    pub repeat_guest_pct: f64,
    /// Mean of the previous-cancellations count, as a percentage.
    pub prev_cancellation_pct: f64,
    /// Sum of adults + children + babies.
    pub total_customers: u64,
    /// Mean of weekend + week nights.
    pub avg_stay_nights: f64,
    /// Distinct non-null agent ids.
    pub agent_count: usize,
    /// Country with the most filtered rows. Ties go to the country whose
    /// first row appears earliest in the table.
    pub top_country: String,
}

impl Metrics {
    /// Compute the metrics over the rows named by `indices`. Returns `None`
    /// for an empty view; the dashboard halts on that case before any metric
    /// is shown, so no division by zero can occur here.
    pub fn compute(dataset: &BookingDataset, indices: &[usize]) -> Option<Metrics> {
        if indices.is_empty() {
            return None;
        }
        let n = indices.len() as f64;

        let mut lead_time_sum = 0u64;
        let mut repeat_sum = 0u64;
        let mut prev_cancel_sum = 0u64;
        let mut customers = 0u64;
        let mut nights_sum = 0u64;
        let mut agents: HashSet<u32> = HashSet::new();

        for &i in indices {
            let b = &dataset.bookings[i];
            lead_time_sum += u64::from(b.lead_time);
            repeat_sum += u64::from(b.is_repeated_guest);
            prev_cancel_sum += u64::from(b.previous_cancellations);
            customers += u64::from(b.guests());
            nights_sum += u64::from(b.stay_nights());
            if let Some(agent) = b.agent {
                agents.insert(agent);
            }
        }

        // country_totals already orders by count with first-encounter ties,
        // so the top country is its first entry.
        let top_country = country_totals(dataset, indices)
            .into_iter()
            .next()
            .map(|c| c.country)?;

        Some(Metrics {
            total_reservations: indices.len(),
            avg_lead_time: lead_time_sum as f64 / n,
            repeat_guest_pct: repeat_sum as f64 / n * 100.0,
            prev_cancellation_pct: prev_cancel_sum as f64 / n * 100.0,
            total_customers: customers,
            avg_stay_nights: nights_sum as f64 / n,
            agent_count: agents.len(),
            top_country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Booking, Month};

    fn booking(country: &str, agent: Option<u32>) -> Booking {
        Booking {
            is_canceled: false,
            lead_time: 10,
            arrival_year: 2016,
            arrival_month: Month::July,
            country: country.to_string(),
            is_repeated_guest: false,
            previous_cancellations: 0,
            adults: 2,
            children: 1,
            babies: 0,
            weekend_nights: 2,
            week_nights: 3,
            agent,
        }
    }

    #[test]
    fn empty_view_yields_no_metrics() {
        let ds = BookingDataset::from_bookings(vec![booking("PRT", None)]);
        assert_eq!(Metrics::compute(&ds, &[]), None);
    }

    #[test]
    fn metrics_match_hand_computed_values() {
        let mut rows = vec![
            booking("PRT", Some(1)),
            booking("PRT", Some(2)),
            booking("GBR", Some(1)),
            booking("FRA", None),
        ];
        rows[1].lead_time = 50;
        rows[1].is_repeated_guest = true;
        rows[2].previous_cancellations = 2;
        rows[3].weekend_nights = 0;
        rows[3].week_nights = 1;

        let ds = BookingDataset::from_bookings(rows);
        let m = Metrics::compute(&ds, &[0, 1, 2, 3]).unwrap();

        assert_eq!(m.total_reservations, 4);
        assert_eq!(m.avg_lead_time, (10.0 + 50.0 + 10.0 + 10.0) / 4.0);
        assert_eq!(m.repeat_guest_pct, 25.0);
        assert_eq!(m.prev_cancellation_pct, 50.0);
        assert_eq!(m.total_customers, 12);
        assert_eq!(m.avg_stay_nights, (5.0 + 5.0 + 5.0 + 1.0) / 4.0);
        assert_eq!(m.agent_count, 2);
        assert_eq!(m.top_country, "PRT");
    }

    #[test]
    fn metrics_respect_the_index_subset() {
        let ds = BookingDataset::from_bookings(vec![
            booking("PRT", Some(1)),
            booking("GBR", Some(2)),
            booking("GBR", Some(3)),
        ]);
        let m = Metrics::compute(&ds, &[1, 2]).unwrap();
        assert_eq!(m.total_reservations, 2);
        assert_eq!(m.top_country, "GBR");
        assert_eq!(m.agent_count, 2);
    }

    #[test]
    fn top_country_tie_goes_to_first_encountered() {
        let ds = BookingDataset::from_bookings(vec![
            booking("GBR", None),
            booking("PRT", None),
            booking("PRT", None),
            booking("GBR", None),
        ]);
        let m = Metrics::compute(&ds, &[0, 1, 2, 3]).unwrap();
        assert_eq!(m.top_country, "GBR");
    }
}
