use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{CANCELED_COLOR, NOT_CANCELED_COLOR};
use crate::data::aggregate::{CancelStatus, MonthlySlice};
use crate::data::model::Month;

// ---------------------------------------------------------------------------
// Monthly grouped bar chart
// ---------------------------------------------------------------------------

const BAR_WIDTH: f64 = 0.38;
const GROUP_OFFSET: f64 = 0.2;

/// Render the month × cancellation-status chart. The x axis is the calendar
/// month index, so bars always run January→December; `monthly_breakdown`
/// delivers the slices already in that order.
pub fn monthly_chart(ui: &mut Ui, slices: &[MonthlySlice]) {
    let mut kept: Vec<Bar> = Vec::new();
    let mut canceled: Vec<Bar> = Vec::new();

    for slice in slices {
        let x = slice.month.index() as f64;
        match slice.status {
            CancelStatus::NotCanceled => {
                kept.push(bar(x - GROUP_OFFSET, slice));
            }
            CancelStatus::Canceled => {
                canceled.push(bar(x + GROUP_OFFSET, slice));
            }
        }
    }

    let kept_chart = BarChart::new(kept)
        .color(NOT_CANCELED_COLOR)
        .name(CancelStatus::NotCanceled.label());
    let canceled_chart = BarChart::new(canceled)
        .color(CANCELED_COLOR)
        .name(CancelStatus::Canceled.label());

    Plot::new("monthly_chart")
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Number of Bookings")
        .x_axis_formatter(|mark, _range| month_tick_label(mark.value))
        .height(320.0)
        .include_y(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(kept_chart);
            plot_ui.bar_chart(canceled_chart);
        });
}

fn bar(x: f64, slice: &MonthlySlice) -> Bar {
    Bar::new(x, slice.count as f64)
        .width(BAR_WIDTH)
        .name(slice.month.name())
}

/// Label whole-month grid marks with the month abbreviation; fractional
/// marks stay blank.
fn month_tick_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        return String::new();
    }
    let idx = rounded as i64;
    if (0..12).contains(&idx) {
        Month::ALL[idx as usize].short_name().to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_month_marks_get_labels() {
        assert_eq!(month_tick_label(0.0), "Jan");
        assert_eq!(month_tick_label(11.0), "Dec");
        assert_eq!(month_tick_label(6.0), "Jul");
    }

    #[test]
    fn other_marks_stay_blank() {
        assert_eq!(month_tick_label(0.5), "");
        assert_eq!(month_tick_label(-1.0), "");
        assert_eq!(month_tick_label(12.0), "");
    }
}
