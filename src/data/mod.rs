/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BookingDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ BookingDataset  │  Vec<Booking>, per-axis unique values
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year/month/country predicates → filtered indices
///   └──────────┘
///        │
///        ├────────────────┐
///        ▼                ▼
///   ┌──────────┐    ┌────────────┐
///   │  metrics  │    │ aggregate   │  monthly + country group counts
///   └──────────┘    └────────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
