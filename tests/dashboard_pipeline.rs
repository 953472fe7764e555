use hotel_dash::data::aggregate::monthly_breakdown;
use hotel_dash::data::filter::{filtered_indices, FilterSelection};
use hotel_dash::data::loader::read_csv;
use hotel_dash::data::metrics::Metrics;
use hotel_dash::data::model::{BookingDataset, Month};

fn fixture() -> BookingDataset {
    let text = include_str!("fixtures/bookings_small.csv");
    read_csv(csv::Reader::from_reader(text.as_bytes())).expect("fixture parses")
}

#[test]
fn fixture_loads_with_normalized_cells() {
    let ds = fixture();
    assert_eq!(ds.len(), 10);
    assert_eq!(ds.years, vec![2015, 2016, 2017]);
    // The row with an empty country cell surfaces as the UNK sentinel.
    assert!(ds.countries.iter().any(|c| c == "UNK"));
    // The NULL agent cell surfaces as None.
    assert!(ds.bookings.iter().any(|b| b.agent.is_none()));
}

#[test]
fn july_prt_selection_matches_the_expected_rows() {
    let ds = fixture();
    let mut sel = FilterSelection::all(&ds);
    sel.years = [2015, 2016].into_iter().collect();
    sel.months = [Month::July].into_iter().collect();
    sel.countries = ["PRT".to_string()].into_iter().collect();

    let idx = filtered_indices(&ds, &sel);
    assert_eq!(idx.len(), 3);
    for &i in &idx {
        let b = &ds.bookings[i];
        assert!([2015, 2016].contains(&b.arrival_year));
        assert_eq!(b.arrival_month, Month::July);
        assert_eq!(b.country, "PRT");
    }

    let m = Metrics::compute(&ds, &idx).unwrap();
    assert_eq!(m.total_reservations, 3);
    assert!((m.avg_lead_time - (100.0 + 5.0 + 200.0) / 3.0).abs() < 1e-9);
    assert_eq!(m.total_customers, 7);
    // Two rows booked through agent 9, one row has no agent.
    assert_eq!(m.agent_count, 1);
    assert_eq!(m.top_country, "PRT");
}

#[test]
fn selecting_everything_reproduces_full_table_metrics() {
    let ds = fixture();
    let all_indices: Vec<usize> = (0..ds.len()).collect();
    let full = Metrics::compute(&ds, &all_indices).unwrap();

    let sel = FilterSelection::all(&ds);
    let idx = filtered_indices(&ds, &sel);
    let filtered = Metrics::compute(&ds, &idx).unwrap();

    assert_eq!(idx, all_indices);
    assert_eq!(filtered, full);
}

#[test]
fn monthly_chart_order_is_calendar_regardless_of_file_order() {
    let ds = fixture();
    let sel = FilterSelection::all(&ds);
    let idx = filtered_indices(&ds, &sel);
    let slices = monthly_breakdown(&ds, &idx);

    let months: Vec<Month> = slices.iter().map(|s| s.month).collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
    assert_eq!(months.first().copied(), Some(Month::February));
    assert_eq!(months.last().copied(), Some(Month::December));

    let chart_total: u64 = slices.iter().map(|s| s.count).sum();
    assert_eq!(chart_total, idx.len() as u64);
}

#[test]
fn empty_selection_on_one_axis_empties_the_view() {
    let ds = fixture();
    let mut sel = FilterSelection::all(&ds);
    sel.months.clear();
    assert!(filtered_indices(&ds, &sel).is_empty());
    assert_eq!(Metrics::compute(&ds, &[]), None);
}
