//! Drag quantization ("magnet") for interactive point edits.
//!
//! Applied on every pointer move while a point is dragged, so the displayed
//! position always sits on the snapped grid rather than jumping on release.

use crate::curve::CurvePoint;
use kurbo::Point;

/// Time grid for dragging: points snap to full hours.
pub const SNAP_STEP_MINUTES: i32 = 60;

/// Quantize a raw drag position (in curve coordinates) to a point.
///
/// The x coordinate always rounds *up* to the next hour boundary; the y
/// coordinate rounds to the nearest integer and is floored at 0. The floor
/// applies even for kinds whose range minimum is above 0 — the drag surface
/// clamps to the kind range separately, so the 0 floor is only observable
/// through direct calls (kept to match the established editor behavior).
pub fn quantize(raw: Point) -> CurvePoint {
    let step = f64::from(SNAP_STEP_MINUTES);
    let x = (raw.x / step).ceil() as i32 * SNAP_STEP_MINUTES;
    let y = raw.y.round() as i32;
    CurvePoint::new(x, y.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_rounds_x_up() {
        assert_eq!(quantize(Point::new(37.0, -5.0)), CurvePoint::new(60, 0));
        assert_eq!(quantize(Point::new(121.0, 12.4)), CurvePoint::new(180, 12));
    }

    #[test]
    fn test_quantize_keeps_exact_hours() {
        assert_eq!(quantize(Point::new(720.0, 100.0)), CurvePoint::new(720, 100));
        assert_eq!(quantize(Point::new(0.0, 0.0)), CurvePoint::new(0, 0));
        assert_eq!(quantize(Point::new(1440.0, 254.0)), CurvePoint::new(1440, 254));
    }

    #[test]
    fn test_quantize_floors_negative_values() {
        // The 0 floor applies regardless of the kind minimum.
        assert_eq!(quantize(Point::new(700.0, -42.9)), CurvePoint::new(720, 0));
    }

    #[test]
    fn test_quantize_rounds_value_to_nearest() {
        assert_eq!(quantize(Point::new(61.0, 12.5)), CurvePoint::new(120, 13));
        assert_eq!(quantize(Point::new(61.0, 12.49)), CurvePoint::new(120, 12));
    }
}
