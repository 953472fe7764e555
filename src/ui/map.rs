use eframe::egui::{vec2, Sense, Stroke, Ui};
use egui_plot::{Plot, PlotPoints, Polygon};

use crate::color::sequential_color;
use crate::data::aggregate::CountryCount;
use crate::geo;

// ---------------------------------------------------------------------------
// Country map (choropleth)
// ---------------------------------------------------------------------------

/// Half-size of a country tile, degrees.
const TILE_HALF: f64 = 2.5;

/// Render the bookings-per-country map: one tile per geocodable country at
/// its centroid, shaded by booking count. Codes missing from the geocoding
/// table are skipped silently.
pub fn country_map(ui: &mut Ui, counts: &[CountryCount]) {
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1) as f64;

    Plot::new("country_map")
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0)
        .show_x(false)
        .show_y(false)
        .height(360.0)
        .show(ui, |plot_ui| {
            for c in counts {
                let Some(place) = geo::lookup(&c.country) else {
                    continue;
                };
                let shade = sequential_color(c.count as f64 / max_count);
                let tile: PlotPoints = vec![
                    [place.lon - TILE_HALF, place.lat - TILE_HALF],
                    [place.lon + TILE_HALF, place.lat - TILE_HALF],
                    [place.lon + TILE_HALF, place.lat + TILE_HALF],
                    [place.lon - TILE_HALF, place.lat + TILE_HALF],
                ]
                .into();
                plot_ui.polygon(
                    Polygon::new(tile)
                        .fill_color(shade)
                        .stroke(Stroke::new(1.0, shade))
                        .name(format!("{} ({}): {}", place.name, c.country, c.count)),
                );
            }
        });

    scale_legend(ui, max_count as u64);
}

/// A small gradient strip labelling the color scale.
fn scale_legend(ui: &mut Ui, max_count: u64) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("0");
        let (rect, _) = ui.allocate_exact_size(vec2(140.0, 10.0), Sense::hover());
        let painter = ui.painter();
        let segments = 28;
        let seg_width = rect.width() / segments as f32;
        for i in 0..segments {
            let t = i as f64 / (segments - 1) as f64;
            let mut seg = rect;
            seg.min.x = rect.min.x + seg_width * i as f32;
            seg.max.x = seg.min.x + seg_width;
            painter.rect_filled(seg, 0.0, sequential_color(t));
        }
        ui.label(format!("{max_count} bookings"));
    });
}
