use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::metrics::Metrics;
use crate::state::AppState;
use crate::ui::{charts, map};

// ---------------------------------------------------------------------------
// Central panel – metrics and charts
// ---------------------------------------------------------------------------

/// Render the dashboard body. When the filtered table is empty only a
/// warning is shown; metrics and charts are suppressed for that pass.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a booking file to start  (File → Open…)");
        });
        return;
    }

    if state.view_is_empty() {
        ui.add_space(12.0);
        ui.label(
            RichText::new(
                "No data available for the selected filters. \
                 Please adjust your filter selections.",
            )
            .color(Color32::YELLOW)
            .strong(),
        );
        return;
    }

    let Some(metrics) = &state.metrics else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_tiles(ui, metrics);

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Monthly Bookings vs Cancellations");
            charts::monthly_chart(ui, &state.monthly);

            ui.add_space(8.0);
            ui.separator();
            ui.heading("Bookings by Country");
            map::country_map(ui, &state.country_counts);
        });
}

// ---------------------------------------------------------------------------
// Metric tiles
// ---------------------------------------------------------------------------

fn metric_tiles(ui: &mut Ui, m: &Metrics) {
    let tiles = [
        ("Total Reservations", m.total_reservations.to_string()),
        ("Avg Lead Time", format!("{:.1} days", m.avg_lead_time)),
        ("Repeat Guest %", format!("{:.1}%", m.repeat_guest_pct)),
        (
            "Previous Cancellation %",
            format!("{:.1}%", m.prev_cancellation_pct),
        ),
        ("Total Customers", m.total_customers.to_string()),
        ("Avg Stay Duration", format!("{:.1} nights", m.avg_stay_nights)),
        ("Number of Agents", m.agent_count.to_string()),
        ("Top Country", m.top_country.clone()),
    ];

    egui::Grid::new("metric_tiles")
        .num_columns(4)
        .spacing([32.0, 12.0])
        .show(ui, |ui: &mut Ui| {
            for (i, (label, value)) in tiles.iter().enumerate() {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(*label).small());
                    ui.label(RichText::new(value).heading().strong());
                });
                if i % 4 == 3 {
                    ui.end_row();
                }
            }
        });
}
