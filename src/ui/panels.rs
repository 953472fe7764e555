use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::{write_summary, Summary};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – title banner, menu, status
// ---------------------------------------------------------------------------

/// Render the top banner and menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let exportable = state.metrics.is_some();
            if ui
                .add_enabled(exportable, egui::Button::new("Export summary…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.heading("Lisboa Hotel Booking Dashboard");
        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} bookings loaded, {} in view",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multi-select section per axis.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone the axis value lists so we can mutate the selections below.
    let years = dataset.years.clone();
    let months = dataset.months.clone();
    let countries = dataset.countries.clone();

    let mut changed = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= filter_section(ui, "Years", &years, &mut state.filters.years, |y| {
                y.to_string()
            });
            changed |= filter_section(ui, "Months", &months, &mut state.filters.months, |m| {
                m.to_string()
            });
            changed |= filter_section(
                ui,
                "Countries",
                &countries,
                &mut state.filters.countries,
                |c| c.clone(),
            );
        });

    if changed {
        state.refilter();
    }
}

/// One collapsible multi-select section: All/None buttons plus a checkbox
/// per value, with selected/total counts in the header. Returns whether the
/// selection changed.
fn filter_section<T, F>(
    ui: &mut Ui,
    title: &str,
    all_values: &[T],
    selected: &mut BTreeSet<T>,
    label: F,
) -> bool
where
    T: Ord + Clone,
    F: Fn(&T) -> String,
{
    let mut changed = false;
    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(all_values.iter().cloned());
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, label(val)).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open booking data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} bookings with countries {:?}",
                    dataset.len(),
                    dataset.countries
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn export_dialog(state: &mut AppState) {
    let Some(metrics) = state.metrics.clone() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .add_filter("JSON", &["json"])
        .set_file_name("booking_summary.json")
        .save_file();

    if let Some(path) = file {
        let summary = Summary {
            metrics,
            monthly: state.monthly.clone(),
            countries: state.country_counts.clone(),
        };
        match write_summary(&path, &summary) {
            Ok(()) => {
                log::info!("Exported summary to {}", path.display());
                state.status_message = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
