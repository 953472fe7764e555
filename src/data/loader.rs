use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Booking, BookingDataset, Month};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a booking dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – delimited file with a header row (the canonical input)
/// * `.json`    – records-oriented array, `df.to_json(orient='records')` style
/// * `.parquet` – scalar columns, one row per booking
///
/// All formats share the column names listed in [`columns`]. Other columns
/// are ignored.
pub fn load_file(path: &Path) -> Result<BookingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Source column names shared by every loader.
mod columns {
    pub const IS_CANCELED: &str = "is_canceled";
    pub const LEAD_TIME: &str = "lead_time";
    pub const YEAR: &str = "arrival_date_year";
    pub const MONTH: &str = "arrival_date_month";
    pub const COUNTRY: &str = "country";
    pub const REPEATED_GUEST: &str = "is_repeated_guest";
    pub const PREVIOUS_CANCELLATIONS: &str = "previous_cancellations";
    pub const ADULTS: &str = "adults";
    pub const CHILDREN: &str = "children";
    pub const BABIES: &str = "babies";
    pub const WEEKEND_NIGHTS: &str = "stays_in_weekend_nights";
    pub const WEEK_NIGHTS: &str = "stays_in_week_nights";
    pub const AGENT: &str = "agent";
}

// ---------------------------------------------------------------------------
// Cell parsing helpers
// ---------------------------------------------------------------------------

/// True when a cell should be treated as missing. The public hotel-bookings
/// export writes literal "NULL" and "NA" tokens.
fn is_missing(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("na")
}

/// Parse a non-negative count. Missing cells count as 0; float-formatted
/// integers ("2.0") are accepted because some exports write counts that way.
fn parse_count(s: &str) -> Option<u32> {
    let t = s.trim();
    if is_missing(t) {
        return Some(0);
    }
    if let Ok(v) = t.parse::<u32>() {
        return Some(v);
    }
    t.parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && *v >= 0.0)
        .map(|v| v as u32)
}

/// Parse a 0/1 flag column.
fn parse_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

/// Agent ids are nullable and sometimes float-formatted.
fn parse_agent(s: &str) -> Option<u32> {
    if is_missing(s) {
        None
    } else {
        parse_count(s)
    }
}

/// Missing country cells are folded into a sentinel code so row counts are
/// preserved. "UNK" filters like any other code and is simply ungeocoded on
/// the map.
fn normalize_country(s: &str) -> String {
    if is_missing(s) {
        "UNK".to_string()
    } else {
        s.trim().to_string()
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Positions of the relevant columns in the CSV header row.
struct ColumnIndex {
    is_canceled: usize,
    lead_time: usize,
    year: usize,
    month: usize,
    country: usize,
    repeated_guest: usize,
    previous_cancellations: usize,
    adults: usize,
    children: usize,
    babies: usize,
    weekend_nights: usize,
    week_nights: usize,
    agent: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .with_context(|| format!("CSV missing '{name}' column"))
        };
        Ok(ColumnIndex {
            is_canceled: find(columns::IS_CANCELED)?,
            lead_time: find(columns::LEAD_TIME)?,
            year: find(columns::YEAR)?,
            month: find(columns::MONTH)?,
            country: find(columns::COUNTRY)?,
            repeated_guest: find(columns::REPEATED_GUEST)?,
            previous_cancellations: find(columns::PREVIOUS_CANCELLATIONS)?,
            adults: find(columns::ADULTS)?,
            children: find(columns::CHILDREN)?,
            babies: find(columns::BABIES)?,
            weekend_nights: find(columns::WEEKEND_NIGHTS)?,
            week_nights: find(columns::WEEK_NIGHTS)?,
            agent: find(columns::AGENT)?,
        })
    }
}

fn load_csv(path: &Path) -> Result<BookingDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Parse an already-opened CSV reader. Split out from [`load_csv`] so tests
/// can feed in-memory data.
pub fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<BookingDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let cols = ColumnIndex::resolve(&headers)?;

    let mut bookings = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let count = |idx: usize, name: &str| -> Result<u32> {
            parse_count(cell(idx))
                .with_context(|| format!("CSV row {row_no}: bad '{name}' value '{}'", cell(idx)))
        };
        let flag = |idx: usize, name: &str| -> Result<bool> {
            parse_flag(cell(idx))
                .with_context(|| format!("CSV row {row_no}: bad '{name}' value '{}'", cell(idx)))
        };

        let month: Month = cell(cols.month)
            .parse()
            .with_context(|| format!("CSV row {row_no}"))?;
        let year: i32 = cell(cols.year)
            .trim()
            .parse()
            .with_context(|| format!("CSV row {row_no}: bad year '{}'", cell(cols.year)))?;

        bookings.push(Booking {
            is_canceled: flag(cols.is_canceled, columns::IS_CANCELED)?,
            lead_time: count(cols.lead_time, columns::LEAD_TIME)?,
            arrival_year: year,
            arrival_month: month,
            country: normalize_country(cell(cols.country)),
            is_repeated_guest: flag(cols.repeated_guest, columns::REPEATED_GUEST)?,
            previous_cancellations: count(
                cols.previous_cancellations,
                columns::PREVIOUS_CANCELLATIONS,
            )?,
            adults: count(cols.adults, columns::ADULTS)?,
            children: count(cols.children, columns::CHILDREN)?,
            babies: count(cols.babies, columns::BABIES)?,
            weekend_nights: count(cols.weekend_nights, columns::WEEKEND_NIGHTS)?,
            week_nights: count(cols.week_nights, columns::WEEK_NIGHTS)?,
            agent: parse_agent(cell(cols.agent)),
        });
    }

    Ok(BookingDataset::from_bookings(bookings))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "is_canceled": 0,
///     "lead_time": 120,
///     "arrival_date_year": 2016,
///     "arrival_date_month": "July",
///     "country": "PRT",
///     ...
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<BookingDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<BookingDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut bookings = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        // Numbers may arrive as JSON numbers or as strings; accept both.
        let count = |key: &str| -> Result<u32> {
            match obj.get(key) {
                None | Some(JsonValue::Null) => Ok(0),
                Some(JsonValue::Number(n)) => n
                    .as_u64()
                    .map(|v| v as u32)
                    .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as u32))
                    .with_context(|| format!("Row {i}: '{key}' is not a count")),
                Some(JsonValue::String(s)) => {
                    parse_count(s).with_context(|| format!("Row {i}: '{key}' is not a count"))
                }
                Some(other) => bail!("Row {i}: '{key}' has unexpected type {other}"),
            }
        };
        let flag = |key: &str| -> Result<bool> {
            count(key).and_then(|v| match v {
                0 => Ok(false),
                1 => Ok(true),
                other => bail!("Row {i}: '{key}' flag is {other}, expected 0 or 1"),
            })
        };

        let month: Month = obj
            .get(columns::MONTH)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing '{}'", columns::MONTH))?
            .parse()
            .with_context(|| format!("Row {i}"))?;
        let year = obj
            .get(columns::YEAR)
            .and_then(|v| v.as_i64())
            .with_context(|| format!("Row {i}: missing '{}'", columns::YEAR))? as i32;
        let country = match obj.get(columns::COUNTRY) {
            Some(JsonValue::String(s)) => normalize_country(s),
            _ => "UNK".to_string(),
        };
        let agent = match obj.get(columns::AGENT) {
            Some(JsonValue::Number(n)) => n.as_f64().map(|v| v as u32),
            Some(JsonValue::String(s)) => parse_agent(s),
            _ => None,
        };

        bookings.push(Booking {
            is_canceled: flag(columns::IS_CANCELED)?,
            lead_time: count(columns::LEAD_TIME)?,
            arrival_year: year,
            arrival_month: month,
            country,
            is_repeated_guest: flag(columns::REPEATED_GUEST)?,
            previous_cancellations: count(columns::PREVIOUS_CANCELLATIONS)?,
            adults: count(columns::ADULTS)?,
            children: count(columns::CHILDREN)?,
            babies: count(columns::BABIES)?,
            weekend_nights: count(columns::WEEKEND_NIGHTS)?,
            week_nights: count(columns::WEEK_NIGHTS)?,
            agent,
        });
    }

    Ok(BookingDataset::from_bookings(bookings))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of bookings.
///
/// Expected schema: one scalar column per name in [`columns`]. Integer
/// columns may be any Arrow integer width (or floats, as Pandas writes
/// nullable counts); `agent` may be null.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<BookingDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut bookings = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let is_canceled = named_column(&batch, columns::IS_CANCELED)?;
        let lead_time = named_column(&batch, columns::LEAD_TIME)?;
        let year = named_column(&batch, columns::YEAR)?;
        let month = named_column(&batch, columns::MONTH)?;
        let country = named_column(&batch, columns::COUNTRY)?;
        let repeated_guest = named_column(&batch, columns::REPEATED_GUEST)?;
        let previous_cancellations = named_column(&batch, columns::PREVIOUS_CANCELLATIONS)?;
        let adults = named_column(&batch, columns::ADULTS)?;
        let children = named_column(&batch, columns::CHILDREN)?;
        let babies = named_column(&batch, columns::BABIES)?;
        let weekend_nights = named_column(&batch, columns::WEEKEND_NIGHTS)?;
        let week_nights = named_column(&batch, columns::WEEK_NIGHTS)?;
        let agent = named_column(&batch, columns::AGENT)?;

        for row in 0..batch.num_rows() {
            let count = |col: &Arc<dyn Array>, name: &str| -> Result<u32> {
                match int_cell(col, row) {
                    Some(v) if v >= 0 => Ok(v as u32),
                    Some(v) => bail!("Row {row}: negative '{name}' value {v}"),
                    None => Ok(0),
                }
            };
            let flag = |col: &Arc<dyn Array>, name: &str| -> Result<bool> {
                match bool_cell(col, row) {
                    Some(v) => Ok(v),
                    None => bail!("Row {row}: bad '{name}' flag"),
                }
            };

            let month_name = str_cell(month, row)
                .with_context(|| format!("Row {row}: missing arrival month"))?;
            let arrival_month: Month = month_name
                .parse()
                .with_context(|| format!("Row {row}"))?;
            let arrival_year = int_cell(year, row)
                .with_context(|| format!("Row {row}: missing arrival year"))?
                as i32;
            let country = match str_cell(country, row) {
                Some(s) => normalize_country(&s),
                None => "UNK".to_string(),
            };
            let agent = match int_cell(agent, row) {
                Some(v) if v >= 0 => Some(v as u32),
                _ => None,
            };

            bookings.push(Booking {
                is_canceled: flag(is_canceled, columns::IS_CANCELED)?,
                lead_time: count(lead_time, columns::LEAD_TIME)?,
                arrival_year,
                arrival_month,
                country,
                is_repeated_guest: flag(repeated_guest, columns::REPEATED_GUEST)?,
                previous_cancellations: count(
                    previous_cancellations,
                    columns::PREVIOUS_CANCELLATIONS,
                )?,
                adults: count(adults, columns::ADULTS)?,
                children: count(children, columns::CHILDREN)?,
                babies: count(babies, columns::BABIES)?,
                weekend_nights: count(weekend_nights, columns::WEEKEND_NIGHTS)?,
                week_nights: count(week_nights, columns::WEEK_NIGHTS)?,
                agent,
            });
        }
    }

    Ok(BookingDataset::from_bookings(bookings))
}

// -- Parquet / Arrow helpers --

fn named_column<'a>(
    batch: &'a arrow::record_batch::RecordBatch,
    name: &str,
) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Extract an integer-valued cell, widening from whatever numeric type the
/// writer chose. Floats are accepted because Pandas promotes nullable int
/// columns to float64.
fn int_cell(col: &Arc<dyn Array>, row: usize) -> Option<i64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int16 => col
            .as_any()
            .downcast_ref::<Int16Array>()
            .map(|a| a.value(row) as i64),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row)),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as i64),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row) as i64),
        _ => None,
    }
}

/// Extract a 0/1 flag cell; Boolean columns are accepted too.
fn bool_cell(col: &Arc<dyn Array>, row: usize) -> Option<bool> {
    if col.is_null(row) {
        return None;
    }
    if let DataType::Boolean = col.data_type() {
        return col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row));
    }
    match int_cell(col, row) {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => None,
    }
}

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn str_cell(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => {
            let s = col.as_string::<i64>();
            Some(s.value(row).to_string())
        }
        _ => None,
    }
}
