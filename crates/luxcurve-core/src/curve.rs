//! Curve and point data model.
//!
//! A curve is an ordered sequence of `(minutes-of-day, value)` points over
//! `[0, 1440]`. The first and last points are structural anchors pinned to
//! x = 0 and x = 1440; they can be moved vertically but never deleted or
//! shifted off their anchors. The server owns the canonical state: mutation
//! methods here only validate preconditions and normalize the request that
//! gets dispatched, they never rewrite `points` locally.

use crate::error::CurveError;
use serde::{Deserialize, Serialize};

/// First minute of the schedule day.
pub const DAY_START: i32 = 0;
/// Last minute of the schedule day.
pub const DAY_END: i32 = 1440;

/// A single schedule point: minutes-of-day and the value at that time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: i32,
    pub y: i32,
}

impl CurvePoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The quantity a curve controls. Fixes the value range and the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    #[serde(rename = "bri")]
    Brightness,
    #[serde(rename = "ct")]
    ColorTemperature,
    #[serde(rename = "hue")]
    Hue,
    #[serde(rename = "sat")]
    Saturation,
}

impl CurveKind {
    /// All kinds, in display order.
    pub const ALL: [CurveKind; 4] = [
        CurveKind::Brightness,
        CurveKind::ColorTemperature,
        CurveKind::Hue,
        CurveKind::Saturation,
    ];

    /// The inclusive value range for this kind.
    pub fn value_range(self) -> ValueRange {
        match self {
            CurveKind::Brightness => ValueRange { min: 0, max: 254 },
            CurveKind::ColorTemperature => ValueRange { min: 153, max: 500 },
            CurveKind::Hue => ValueRange { min: 0, max: 65280 },
            CurveKind::Saturation => ValueRange { min: 25, max: 200 },
        }
    }

    /// Human-readable label for list badges.
    pub fn label(self) -> &'static str {
        match self {
            CurveKind::Brightness => "Brightness",
            CurveKind::ColorTemperature => "Color temperature",
            CurveKind::Hue => "Hue",
            CurveKind::Saturation => "Saturation",
        }
    }
}

/// Inclusive value bounds for a curve kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl ValueRange {
    /// Clamp a value into the range.
    pub fn clamp(self, y: i32) -> i32 {
        y.clamp(self.min, self.max)
    }

    /// Check containment.
    pub fn contains(self, y: i32) -> bool {
        self.min <= y && y <= self.max
    }

    /// Width of the range.
    pub fn span(self) -> i32 {
        self.max - self.min
    }
}

/// Where a new point goes relative to its reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

/// A validated point-level edit, ready to dispatch to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditIntent {
    ChangePoint { index: usize, x: i32, y: i32 },
    InsertPoint { index: usize, position: InsertPosition },
    DeletePoint { index: usize },
}

/// A named, kind-typed schedule curve as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub id: i64,
    pub name: String,
    pub kind: CurveKind,
    /// Built-in curves (one per kind) are not deletable.
    #[serde(rename = "default")]
    pub is_default: bool,
    /// Render-time shift applied to the derived offset curve only.
    #[serde(default)]
    pub offset: i32,
    pub points: Vec<CurvePoint>,
}

impl Curve {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The point at `index`, if it exists.
    pub fn point(&self, index: usize) -> Option<CurvePoint> {
        self.points.get(index).copied()
    }

    /// Indices of the two anchor points (first, last).
    pub fn boundary_indices(&self) -> (usize, usize) {
        (0, self.points.len().saturating_sub(1))
    }

    /// Whether `index` addresses an anchor point.
    pub fn is_boundary(&self, index: usize) -> bool {
        let (first, last) = self.boundary_indices();
        index == first || index == last
    }

    /// The value range fixed by this curve's kind.
    pub fn value_range(&self) -> ValueRange {
        self.kind.value_range()
    }

    /// Verify the structural invariants of the point sequence.
    ///
    /// Server responses are expected to satisfy these; a violation is a
    /// store bug worth logging, not a recoverable condition.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(first) = self.points.first() else {
            return Err("curve has no points".into());
        };
        let last = self.points.last().unwrap();
        if first.x != DAY_START {
            return Err(format!("first point at x={}, expected {}", first.x, DAY_START));
        }
        if last.x != DAY_END {
            return Err(format!("last point at x={}, expected {}", last.x, DAY_END));
        }
        for pair in self.points.windows(2) {
            if pair[0].x >= pair[1].x {
                return Err(format!("points not strictly ascending at x={}", pair[1].x));
            }
        }
        let range = self.value_range();
        for point in &self.points {
            if !range.contains(point.y) {
                return Err(format!(
                    "point ({}, {}) outside value range [{}, {}]",
                    point.x, point.y, range.min, range.max
                ));
            }
        }
        Ok(())
    }

    /// Build a change-point intent.
    ///
    /// The anchors' x is forced back to 0 / 1440 no matter where the drag
    /// released, and y is clamped to the kind range. Ordering of interior
    /// x values is left to the server, the arbiter of the post-state.
    pub fn change_point(&self, index: usize, x: i32, y: i32) -> Result<EditIntent, CurveError> {
        if index >= self.points.len() {
            return Err(CurveError::OutOfRange {
                index,
                len: self.points.len(),
            });
        }
        let (first, last) = self.boundary_indices();
        let x = if index == first {
            DAY_START
        } else if index == last {
            DAY_END
        } else {
            x
        };
        let y = self.value_range().clamp(y);
        Ok(EditIntent::ChangePoint { index, x, y })
    }

    /// Build an insert-point intent; coordinates are computed server-side.
    pub fn insert_point(
        &self,
        index: usize,
        position: InsertPosition,
    ) -> Result<EditIntent, CurveError> {
        if index >= self.points.len() {
            return Err(CurveError::OutOfRange {
                index,
                len: self.points.len(),
            });
        }
        Ok(EditIntent::InsertPoint { index, position })
    }

    /// Build a delete-point intent. Anchors are never deletable.
    pub fn delete_point(&self, index: usize) -> Result<EditIntent, CurveError> {
        if index >= self.points.len() {
            return Err(CurveError::OutOfRange {
                index,
                len: self.points.len(),
            });
        }
        if self.is_boundary(index) {
            return Err(CurveError::BoundaryViolation { index });
        }
        Ok(EditIntent::DeletePoint { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brightness_curve() -> Curve {
        Curve {
            id: 1,
            name: "Evening".to_string(),
            kind: CurveKind::Brightness,
            is_default: false,
            offset: 0,
            points: vec![
                CurvePoint::new(0, 245),
                CurvePoint::new(720, 180),
                CurvePoint::new(1440, 12),
            ],
        }
    }

    #[test]
    fn test_value_ranges() {
        assert_eq!(CurveKind::Brightness.value_range(), ValueRange { min: 0, max: 254 });
        assert_eq!(CurveKind::ColorTemperature.value_range(), ValueRange { min: 153, max: 500 });
        assert_eq!(CurveKind::Hue.value_range(), ValueRange { min: 0, max: 65280 });
        assert_eq!(CurveKind::Saturation.value_range(), ValueRange { min: 25, max: 200 });
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_string(&CurveKind::Brightness).unwrap(), "\"bri\"");
        assert_eq!(serde_json::to_string(&CurveKind::ColorTemperature).unwrap(), "\"ct\"");
        assert_eq!(serde_json::to_string(&CurveKind::Hue).unwrap(), "\"hue\"");
        assert_eq!(serde_json::to_string(&CurveKind::Saturation).unwrap(), "\"sat\"");
    }

    #[test]
    fn test_curve_wire_roundtrip() {
        let curve = brightness_curve();
        let json = serde_json::to_string(&curve).unwrap();
        assert!(json.contains("\"default\":false"));
        let back: Curve = serde_json::from_str(&json).unwrap();
        assert_eq!(curve, back);
    }

    #[test]
    fn test_invariants_hold_for_valid_curve() {
        assert!(brightness_curve().check_invariants().is_ok());
    }

    #[test]
    fn test_invariants_reject_unanchored_boundary() {
        let mut curve = brightness_curve();
        curve.points[0].x = 30;
        assert!(curve.check_invariants().is_err());
    }

    #[test]
    fn test_invariants_reject_unsorted_points() {
        let mut curve = brightness_curve();
        curve.points[1].x = 1440;
        assert!(curve.check_invariants().is_err());
    }

    #[test]
    fn test_change_point_anchors_boundaries() {
        let curve = brightness_curve();
        // Dragging either anchor resets its x, wherever the pointer released.
        assert_eq!(
            curve.change_point(0, 300, 100).unwrap(),
            EditIntent::ChangePoint { index: 0, x: 0, y: 100 }
        );
        assert_eq!(
            curve.change_point(2, 900, 40).unwrap(),
            EditIntent::ChangePoint { index: 2, x: 1440, y: 40 }
        );
        // Interior points keep the requested x.
        assert_eq!(
            curve.change_point(1, 660, 90).unwrap(),
            EditIntent::ChangePoint { index: 1, x: 660, y: 90 }
        );
    }

    #[test]
    fn test_change_point_clamps_value() {
        let curve = brightness_curve();
        assert_eq!(
            curve.change_point(1, 720, 310).unwrap(),
            EditIntent::ChangePoint { index: 1, x: 720, y: 254 }
        );
    }

    #[test]
    fn test_change_point_bad_index() {
        let curve = brightness_curve();
        assert_eq!(
            curve.change_point(3, 0, 0),
            Err(CurveError::OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_delete_point_rejects_boundaries() {
        let curve = brightness_curve();
        assert_eq!(curve.delete_point(0), Err(CurveError::BoundaryViolation { index: 0 }));
        assert_eq!(curve.delete_point(2), Err(CurveError::BoundaryViolation { index: 2 }));
        assert_eq!(curve.delete_point(1), Ok(EditIntent::DeletePoint { index: 1 }));
        // The curve itself is untouched by a rejected delete.
        assert_eq!(curve.len(), 3);
    }

    #[test]
    fn test_insert_point_bad_index() {
        let curve = brightness_curve();
        assert!(curve.insert_point(1, InsertPosition::After).is_ok());
        assert_eq!(
            curve.insert_point(5, InsertPosition::Before),
            Err(CurveError::OutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn test_insert_position_wire_names() {
        assert_eq!(serde_json::to_string(&InsertPosition::Before).unwrap(), "\"before\"");
        assert_eq!(serde_json::to_string(&InsertPosition::After).unwrap(), "\"after\"");
    }
}
