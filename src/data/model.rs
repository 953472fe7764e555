use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Month – calendar month with calendar ordering
// ---------------------------------------------------------------------------

/// Arrival month. `Ord` follows calendar sequence (January < … < December),
/// so any month-keyed `BTreeMap`/sort comes out chronologically, never
/// alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Error returned when a month cell does not hold a known month name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized month name: '{0}'")]
pub struct ParseMonthError(pub String);

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based calendar index (January = 0). Used as the x coordinate in
    /// the monthly chart.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full English name, matching the source-file spelling.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter abbreviation for axis labels.
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl FromStr for Month {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Booking – one row of the source table
// ---------------------------------------------------------------------------

/// A single reservation (one row of the source table). Columns the dashboard
/// never touches are dropped at load time.
#[derive(Debug, Clone)]
pub struct Booking {
    pub is_canceled: bool,
    /// Days between booking and arrival.
    pub lead_time: u32,
    pub arrival_year: i32,
    pub arrival_month: Month,
    /// ISO-3-like country code. Missing cells are normalized to "UNK".
    pub country: String,
    pub is_repeated_guest: bool,
    pub previous_cancellations: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub weekend_nights: u32,
    pub week_nights: u32,
    /// Booking agent id; None when the row has no agent.
    pub agent: Option<u32>,
}

impl Booking {
    /// Guests on the reservation.
    pub fn guests(&self) -> u32 {
        self.adults + self.children + self.babies
    }

    /// Total nights of the stay.
    pub fn stay_nights(&self) -> u32 {
        self.weekend_nights + self.week_nights
    }
}

// ---------------------------------------------------------------------------
// BookingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed unique-value lists for the three
/// filter axes.
#[derive(Debug, Clone)]
pub struct BookingDataset {
    /// All bookings (rows).
    pub bookings: Vec<Booking>,
    /// Arrival years present, ascending.
    pub years: Vec<i32>,
    /// Arrival months present, calendar order.
    pub months: Vec<Month>,
    /// Country codes present, sorted.
    pub countries: Vec<String>,
}

impl BookingDataset {
    /// Build the axis indices from the loaded rows.
    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        let mut years: BTreeSet<i32> = BTreeSet::new();
        let mut months: BTreeSet<Month> = BTreeSet::new();
        let mut countries: BTreeSet<String> = BTreeSet::new();

        for b in &bookings {
            years.insert(b.arrival_year);
            months.insert(b.arrival_month);
            countries.insert(b.country.clone());
        }

        BookingDataset {
            bookings,
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
            countries: countries.into_iter().collect(),
        }
    }

    /// Number of bookings.
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(year: i32, month: Month, country: &str) -> Booking {
        Booking {
            is_canceled: false,
            lead_time: 30,
            arrival_year: year,
            arrival_month: month,
            country: country.to_string(),
            is_repeated_guest: false,
            previous_cancellations: 0,
            adults: 2,
            children: 0,
            babies: 0,
            weekend_nights: 1,
            week_nights: 2,
            agent: Some(1),
        }
    }

    #[test]
    fn month_parses_full_names() {
        assert_eq!("July".parse::<Month>().unwrap(), Month::July);
        assert_eq!(" December ".parse::<Month>().unwrap(), Month::December);
        assert!("Juillet".parse::<Month>().is_err());
    }

    #[test]
    fn month_ord_is_calendar_order() {
        assert!(Month::April < Month::August);
        assert!(Month::August < Month::September);
        let mut shuffled = vec![Month::October, Month::February, Month::July];
        shuffled.sort();
        assert_eq!(shuffled, vec![Month::February, Month::July, Month::October]);
    }

    #[test]
    fn month_index_and_names() {
        assert_eq!(Month::January.index(), 0);
        assert_eq!(Month::December.index(), 11);
        assert_eq!(Month::September.short_name(), "Sep");
        assert_eq!(Month::May.to_string(), "May");
    }

    #[test]
    fn dataset_axis_lists_are_sorted_and_deduped() {
        let ds = BookingDataset::from_bookings(vec![
            booking(2016, Month::July, "PRT"),
            booking(2015, Month::March, "GBR"),
            booking(2016, Month::March, "PRT"),
        ]);
        assert_eq!(ds.years, vec![2015, 2016]);
        assert_eq!(ds.months, vec![Month::March, Month::July]);
        assert_eq!(ds.countries, vec!["GBR".to_string(), "PRT".to_string()]);
        assert_eq!(ds.len(), 3);
    }
}
