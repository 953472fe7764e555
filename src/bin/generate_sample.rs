use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn range(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Pick from a weighted list.
    fn pick<'a, T>(&mut self, weighted: &'a [(T, u32)]) -> &'a T {
        let total: u32 = weighted.iter().map(|(_, w)| w).sum();
        let mut roll = self.range(u64::from(total)) as u32;
        for (item, w) in weighted {
            if roll < *w {
                return item;
            }
            roll -= w;
        }
        &weighted[weighted.len() - 1].0
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Relative booking volume per calendar month (summer-heavy resort profile).
const MONTH_WEIGHTS: [u64; 12] = [4, 4, 5, 6, 7, 8, 10, 10, 7, 6, 4, 5];

const COUNTRIES: [(&str, u32); 16] = [
    ("PRT", 40),
    ("GBR", 12),
    ("FRA", 10),
    ("ESP", 9),
    ("DEU", 7),
    ("ITA", 4),
    ("IRL", 3),
    ("BEL", 3),
    ("BRA", 3),
    ("NLD", 3),
    ("USA", 2),
    ("CHE", 2),
    ("CHN", 2),
    ("AUT", 1),
    ("SWE", 1),
    ("", 1), // missing country cells, as in the public export
];

const AGENTS: [u32; 11] = [9, 240, 1, 14, 7, 6, 250, 241, 28, 8, 3];

struct Row {
    hotel: &'static str,
    is_canceled: i64,
    lead_time: i64,
    year: i64,
    month: &'static str,
    country: &'static str,
    is_repeated_guest: i64,
    previous_cancellations: i64,
    adults: i64,
    children: i64,
    babies: i64,
    weekend_nights: i64,
    week_nights: i64,
    agent: Option<i64>,
}

fn generate_row(rng: &mut SimpleRng, year: i64, month: &'static str) -> Row {
    // Long lead times cancel more often; the skew keeps most leads short.
    let lead_time = (rng.next_f64().powi(2) * 400.0) as i64;
    let country = *rng.pick(&COUNTRIES);
    let mut cancel_p = 0.15 + lead_time as f64 / 400.0 * 0.35;
    if country == "PRT" {
        cancel_p += 0.10;
    }

    let is_repeated_guest = i64::from(rng.below(0.03));
    let previous_cancellations = if is_repeated_guest == 1 && rng.below(0.3) {
        1 + rng.range(2) as i64
    } else {
        0
    };

    Row {
        hotel: if rng.below(0.6) {
            "City Hotel"
        } else {
            "Resort Hotel"
        },
        is_canceled: i64::from(rng.below(cancel_p)),
        lead_time,
        year,
        month,
        country,
        is_repeated_guest,
        previous_cancellations,
        adults: *rng.pick(&[(1i64, 25), (2, 60), (3, 15)]),
        children: if rng.below(0.10) {
            1 + rng.range(2) as i64
        } else {
            0
        },
        babies: i64::from(rng.below(0.02)),
        weekend_nights: rng.range(3) as i64,
        week_nights: rng.range(6) as i64,
        agent: if rng.below(0.85) {
            Some(i64::from(AGENTS[rng.range(AGENTS.len() as u64) as usize]))
        } else {
            None
        },
    }
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "hotel",
            "is_canceled",
            "lead_time",
            "arrival_date_year",
            "arrival_date_month",
            "country",
            "is_repeated_guest",
            "previous_cancellations",
            "adults",
            "children",
            "babies",
            "stays_in_weekend_nights",
            "stays_in_week_nights",
            "agent",
        ])
        .expect("Failed to write CSV header");

    for r in rows {
        writer
            .write_record([
                r.hotel.to_string(),
                r.is_canceled.to_string(),
                r.lead_time.to_string(),
                r.year.to_string(),
                r.month.to_string(),
                r.country.to_string(),
                r.is_repeated_guest.to_string(),
                r.previous_cancellations.to_string(),
                r.adults.to_string(),
                r.children.to_string(),
                r.babies.to_string(),
                r.weekend_nights.to_string(),
                r.week_nights.to_string(),
                r.agent.map(|a| a.to_string()).unwrap_or_default(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(rows: &[Row], path: &str) {
    let int_col = |f: fn(&Row) -> i64| Int64Array::from(rows.iter().map(f).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("is_canceled", DataType::Int64, false),
        Field::new("lead_time", DataType::Int64, false),
        Field::new("arrival_date_year", DataType::Int64, false),
        Field::new("arrival_date_month", DataType::Utf8, false),
        Field::new("country", DataType::Utf8, true),
        Field::new("is_repeated_guest", DataType::Int64, false),
        Field::new("previous_cancellations", DataType::Int64, false),
        Field::new("adults", DataType::Int64, false),
        Field::new("children", DataType::Int64, false),
        Field::new("babies", DataType::Int64, false),
        Field::new("stays_in_weekend_nights", DataType::Int64, false),
        Field::new("stays_in_week_nights", DataType::Int64, false),
        Field::new("agent", DataType::Int64, true),
    ]));

    let month_array =
        StringArray::from(rows.iter().map(|r| r.month).collect::<Vec<_>>());
    let country_array = StringArray::from(
        rows.iter()
            .map(|r| (!r.country.is_empty()).then_some(r.country))
            .collect::<Vec<_>>(),
    );
    let agent_array = Int64Array::from(rows.iter().map(|r| r.agent).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(int_col(|r| r.is_canceled)),
            Arc::new(int_col(|r| r.lead_time)),
            Arc::new(int_col(|r| r.year)),
            Arc::new(month_array),
            Arc::new(country_array),
            Arc::new(int_col(|r| r.is_repeated_guest)),
            Arc::new(int_col(|r| r.previous_cancellations)),
            Arc::new(int_col(|r| r.adults)),
            Arc::new(int_col(|r| r.children)),
            Arc::new(int_col(|r| r.babies)),
            Arc::new(int_col(|r| r.weekend_nights)),
            Arc::new(int_col(|r| r.week_nights)),
            Arc::new(agent_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut rows = Vec::new();
    for year in 2015i64..=2017 {
        // Mild year-on-year growth.
        let year_factor = 30 + (year - 2015) * 8;
        for (month, weight) in MONTHS.into_iter().zip(MONTH_WEIGHTS) {
            let n = weight * year_factor as u64;
            for _ in 0..n {
                rows.push(generate_row(&mut rng, year, month));
            }
        }
    }

    write_csv(&rows, "hotel_bookings.csv");
    write_parquet(&rows, "hotel_bookings.parquet");

    println!(
        "Wrote {} bookings to hotel_bookings.csv and hotel_bookings.parquet",
        rows.len()
    );
}
