//! Offset curve projection.
//!
//! The offset curve is a derived, non-interactive rendering of the primary
//! curve shifted by the curve's scalar offset and re-clamped to the kind
//! range. It never feeds back into the stored points.

use crate::curve::{CurvePoint, ValueRange};

/// Project a point sequence by a scalar offset, clamping into `range`.
pub fn project(points: &[CurvePoint], offset: i32, range: ValueRange) -> Vec<CurvePoint> {
    points
        .iter()
        .map(|p| CurvePoint::new(p.x, range.clamp(p.y + offset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRI: ValueRange = ValueRange { min: 0, max: 254 };

    #[test]
    fn test_project_clamps_above() {
        let points = [CurvePoint::new(0, 100)];
        assert_eq!(project(&points, 200, BRI), vec![CurvePoint::new(0, 254)]);
    }

    #[test]
    fn test_project_negative_offset() {
        let points = [CurvePoint::new(0, 100)];
        assert_eq!(project(&points, -50, BRI), vec![CurvePoint::new(0, 50)]);
        assert_eq!(project(&points, -150, BRI), vec![CurvePoint::new(0, 0)]);
    }

    #[test]
    fn test_project_clamps_to_kind_minimum() {
        let ct = ValueRange { min: 153, max: 500 };
        let points = [CurvePoint::new(0, 160), CurvePoint::new(1440, 480)];
        assert_eq!(
            project(&points, -100, ct),
            vec![CurvePoint::new(0, 153), CurvePoint::new(1440, 380)]
        );
    }

    #[test]
    fn test_project_zero_offset_is_identity() {
        let points = [CurvePoint::new(0, 10), CurvePoint::new(1440, 200)];
        assert_eq!(project(&points, 0, BRI), points.to_vec());
    }
}
