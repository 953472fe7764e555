use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart colors
// ---------------------------------------------------------------------------

/// Series colors for the monthly chart: kept bookings vs cancellations.
pub const NOT_CANCELED_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const CANCELED_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

// ---------------------------------------------------------------------------
// Sequential scale for the country map
// ---------------------------------------------------------------------------

/// Map a value in `[0, 1]` onto a dark-purple → yellow sequential scale.
/// Values outside the range are clamped.
pub fn sequential_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    // Sweep hue from violet down to yellow while brightening.
    let hue = 280.0 - 220.0 * t;
    let lightness = 0.25 + 0.45 * t;
    let hsl = Hsl::new(hue, 0.70, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_endpoints_are_dark_to_bright() {
        let low = sequential_color(0.0);
        let high = sequential_color(1.0);
        let luma = |c: Color32| u32::from(c.r()) + u32::from(c.g()) + u32::from(c.b());
        assert!(luma(low) < luma(high));
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(sequential_color(-1.0), sequential_color(0.0));
        assert_eq!(sequential_color(2.0), sequential_color(1.0));
    }
}
