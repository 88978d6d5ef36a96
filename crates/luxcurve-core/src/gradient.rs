//! Per-kind color gradients for curve rendering.
//!
//! Each curve kind maps to an ordered list of color stops over `[0, 1]`
//! (0 = range maximum at the top of the plot, 1 = range minimum at the
//! bottom). The rendering surface interpolates linearly between stops;
//! this module only supplies the stop list.

use crate::curve::CurveKind;

/// Alpha for the area fill under the curve.
pub const FILL_ALPHA: f32 = 0.7;
/// Alpha for the point markers.
pub const MARKER_ALPHA: f32 = 0.9;

/// One gradient stop: a position along the vertical axis and an RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

// Stop tables per kind, in the order the upstream renderer registers them.
const BRIGHTNESS_STOPS: &[(f32, u8, u8, u8)] = &[(1.0, 25, 22, 2), (0.0, 250, 219, 20)];

const COLOR_TEMPERATURE_STOPS: &[(f32, u8, u8, u8)] =
    &[(0.0, 255, 149, 43), (1.0, 235, 238, 255)];

const HUE_STOPS: &[(f32, u8, u8, u8)] = &[
    (0.0, 255, 0, 0),           // red
    (1.0 / 6.0, 255, 165, 0),   // orange
    (2.0 / 6.0, 255, 255, 0),   // yellow
    (3.0 / 6.0, 0, 128, 0),     // green
    (4.0 / 6.0, 0, 0, 255),     // blue
    (5.0 / 6.0, 75, 0, 130),    // indigo
    (1.0, 238, 130, 238),       // violet
];

const SATURATION_STOPS: &[(f32, u8, u8, u8)] = &[(0.0, 0, 0, 0), (1.0, 255, 255, 255)];

fn stop_table(kind: CurveKind) -> &'static [(f32, u8, u8, u8)] {
    match kind {
        CurveKind::Brightness => BRIGHTNESS_STOPS,
        CurveKind::ColorTemperature => COLOR_TEMPERATURE_STOPS,
        CurveKind::Hue => HUE_STOPS,
        CurveKind::Saturation => SATURATION_STOPS,
    }
}

/// Color stops for a kind at the requested alpha.
///
/// Hue gradients dim sub-0.8 alphas by a further 0.8 factor so the rainbow
/// fill reads at the same relative intensity as the two-stop kinds.
pub fn color_stops(kind: CurveKind, alpha: f32) -> Vec<ColorStop> {
    let alpha = match kind {
        CurveKind::Hue if alpha < 0.8 => alpha * 0.8,
        _ => alpha,
    };
    stop_table(kind)
        .iter()
        .map(|&(offset, red, green, blue)| ColorStop {
            offset,
            red,
            green,
            blue,
            alpha,
        })
        .collect()
}

/// The low-opacity fill gradient for a kind.
pub fn fill_stops(kind: CurveKind) -> Vec<ColorStop> {
    color_stops(kind, FILL_ALPHA)
}

/// The higher-opacity point-marker gradient for a kind.
pub fn marker_stops(kind: CurveKind) -> Vec<ColorStop> {
    color_stops(kind, MARKER_ALPHA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_stops() {
        let stops = fill_stops(CurveKind::Brightness);
        assert_eq!(stops.len(), 2);
        assert_eq!((stops[0].offset, stops[0].red, stops[0].green, stops[0].blue), (1.0, 25, 22, 2));
        assert_eq!((stops[1].offset, stops[1].red, stops[1].green, stops[1].blue), (0.0, 250, 219, 20));
        assert!(stops.iter().all(|s| (s.alpha - FILL_ALPHA).abs() < 1e-6));
    }

    #[test]
    fn test_color_temperature_stops() {
        let stops = marker_stops(CurveKind::ColorTemperature);
        assert_eq!(stops.len(), 2);
        assert_eq!((stops[0].red, stops[0].green, stops[0].blue), (255, 149, 43));
        assert_eq!((stops[1].red, stops[1].green, stops[1].blue), (235, 238, 255));
    }

    #[test]
    fn test_saturation_is_black_to_white_at_any_alpha() {
        for alpha in [0.1_f32, 0.7, 0.9, 1.0] {
            let stops = color_stops(CurveKind::Saturation, alpha);
            assert_eq!(stops.len(), 2);
            assert_eq!((stops[0].offset, stops[0].red, stops[0].green, stops[0].blue), (0.0, 0, 0, 0));
            assert_eq!((stops[1].offset, stops[1].red, stops[1].green, stops[1].blue), (1.0, 255, 255, 255));
        }
    }

    #[test]
    fn test_hue_has_seven_rainbow_stops() {
        let stops = color_stops(CurveKind::Hue, 0.9);
        assert_eq!(stops.len(), 7);
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[6].offset, 1.0);
        for pair in stops.windows(2) {
            assert!(pair[0].offset < pair[1].offset);
        }
    }

    #[test]
    fn test_hue_dims_low_alphas() {
        let fill = fill_stops(CurveKind::Hue);
        assert!((fill[0].alpha - 0.7 * 0.8).abs() < 1e-6);
        // At or above 0.8 the requested alpha is used as-is.
        let marker = marker_stops(CurveKind::Hue);
        assert!((marker[0].alpha - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_other_kinds_keep_requested_alpha() {
        let stops = color_stops(CurveKind::Brightness, 0.5);
        assert!((stops[0].alpha - 0.5).abs() < 1e-6);
    }
}
