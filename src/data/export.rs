use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::aggregate::{CountryCount, MonthlySlice};
use super::metrics::Metrics;

// ---------------------------------------------------------------------------
// Summary export
// ---------------------------------------------------------------------------

/// Everything derived from the current filtered view, bundled for export.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub metrics: Metrics,
    pub monthly: Vec<MonthlySlice>,
    pub countries: Vec<CountryCount>,
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("serializing summary")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::CancelStatus;
    use crate::data::model::Month;

    fn sample_summary() -> Summary {
        Summary {
            metrics: Metrics {
                total_reservations: 2,
                avg_lead_time: 12.5,
                repeat_guest_pct: 0.0,
                prev_cancellation_pct: 0.0,
                total_customers: 4,
                avg_stay_nights: 3.0,
                agent_count: 1,
                top_country: "PRT".to_string(),
            },
            monthly: vec![MonthlySlice {
                month: Month::July,
                status: CancelStatus::NotCanceled,
                count: 2,
            }],
            countries: vec![CountryCount {
                country: "PRT".to_string(),
                count: 2,
            }],
        }
    }

    #[test]
    fn summary_serializes_with_readable_labels() {
        let json = serde_json::to_string(&sample_summary()).unwrap();
        assert!(json.contains("\"top_country\":\"PRT\""));
        assert!(json.contains("\"July\""));
        assert!(json.contains("\"NotCanceled\""));
    }

    #[test]
    fn summary_round_trips_through_a_file() {
        let path = std::env::temp_dir().join("hotel_dash_summary_test.json");
        write_summary(&path, &sample_summary()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["metrics"]["total_reservations"], 2);
        assert_eq!(value["countries"][0]["country"], "PRT");
    }
}
