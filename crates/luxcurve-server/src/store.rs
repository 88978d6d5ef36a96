//! In-memory curve store.
//!
//! Owns the canonical curve state and the point-editing semantics the
//! clients rely on: y values clamped to the kind range at every mutation,
//! points kept ordered by time, anchors non-deletable, defaults
//! non-removable, and inserted points placed on the interpolated curve.

use dashmap::DashMap;
use luxcurve_core::{Curve, CurveKind, CurvePoint, InsertPosition, DAY_END, DAY_START};
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

use crate::interpolate::MonotoneSpline;

/// Initial y for curves created without a shape.
const NEW_CURVE_VALUE: i32 = 200;

/// Refusals and misses, mapped to HTTP statuses by the handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Curve {0} not found")]
    NotFound(i64),
    #[error("{0}")]
    Refused(&'static str),
}

/// The curve collection.
pub struct CurveStore {
    curves: DashMap<i64, Curve>,
    next_id: AtomicI64,
}

impl CurveStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            curves: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// A store seeded with the four built-in default curves.
    pub fn with_defaults() -> Self {
        let store = Self::new();
        store.seed(CurveKind::Brightness, &[
            (0, 245), (360, 216), (660, 182), (900, 221), (1080, 27), (1440, 12),
        ]);
        store.seed(CurveKind::ColorTemperature, &[
            (0, 153), (420, 324), (900, 347), (1080, 475), (1440, 500),
        ]);
        store.seed(CurveKind::Hue, &[(0, 32640), (1440, 32640)]);
        store.seed(CurveKind::Saturation, &[(0, 112), (1440, 112)]);
        store
    }

    fn seed(&self, kind: CurveKind, points: &[(i32, i32)]) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.curves.insert(id, Curve {
            id,
            name: "Default".to_string(),
            kind,
            is_default: true,
            offset: 0,
            points: points.iter().map(|&(x, y)| CurvePoint::new(x, y)).collect(),
        });
    }

    /// All curves, optionally filtered by kind, ordered by id.
    pub fn list(&self, kind: Option<CurveKind>) -> Vec<Curve> {
        let mut curves: Vec<Curve> = self
            .curves
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .collect();
        curves.sort_by_key(|c| c.id);
        curves
    }

    pub fn get(&self, id: i64) -> Result<Curve, StoreError> {
        self.curves
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::NotFound(id))
    }

    /// Create a curve with `count` evenly spaced points (minimum: the two
    /// boundary anchors) at a flat initial value.
    pub fn create(&self, name: String, kind: CurveKind, offset: i32, count: u32) -> Curve {
        let count = i64::from(count.max(2));
        let y = kind.value_range().clamp(NEW_CURVE_VALUE);
        let points = (0..count)
            .map(|index| {
                let x = (i64::from(DAY_END) * index / (count - 1)) as i32;
                CurvePoint::new(x, y)
            })
            .collect();

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let curve = Curve {
            id,
            name,
            kind,
            is_default: false,
            offset,
            points,
        };
        self.curves.insert(id, curve.clone());
        curve
    }

    /// Update name and/or offset.
    pub fn update_meta(
        &self,
        id: i64,
        name: Option<String>,
        offset: Option<i32>,
    ) -> Result<Curve, StoreError> {
        let mut entry = self.curves.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let curve = entry.value_mut();
        if let Some(name) = name {
            curve.name = name;
        }
        if let Some(offset) = offset {
            curve.offset = offset;
        }
        Ok(curve.clone())
    }

    /// Remove a curve; the built-in defaults are not removable.
    pub fn delete(&self, id: i64) -> Result<Curve, StoreError> {
        let is_default = self
            .curves
            .get(&id)
            .map(|entry| entry.is_default)
            .ok_or(StoreError::NotFound(id))?;
        if is_default {
            return Err(StoreError::Refused("Default curves are not deletable"));
        }
        self.curves
            .remove(&id)
            .map(|(_, curve)| curve)
            .ok_or(StoreError::NotFound(id))
    }

    /// Set a point's coordinates. The y is clamped to the kind range, the x
    /// to the day, and points are re-ordered by time afterwards.
    pub fn update_point(&self, id: i64, index: usize, x: i32, y: i32) -> Result<Curve, StoreError> {
        let mut entry = self.curves.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let curve = entry.value_mut();
        if index >= curve.points.len() {
            return Err(StoreError::Refused("Point index out of range"));
        }
        let x = x.clamp(DAY_START, DAY_END);
        let y = curve.kind.value_range().clamp(y);
        curve.points[index] = CurvePoint::new(x, y);
        curve.points.sort_by_key(|p| p.x);
        Ok(curve.clone())
    }

    /// Insert a new point next to `index`, halfway to its neighbor, with
    /// the value the interpolated curve has at that time.
    pub fn insert_point(
        &self,
        id: i64,
        index: usize,
        position: InsertPosition,
    ) -> Result<Curve, StoreError> {
        let mut entry = self.curves.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let curve = entry.value_mut();
        let len = curve.points.len();
        if index >= len {
            return Err(StoreError::Refused("Point index out of range"));
        }
        let (before, after) = match position {
            InsertPosition::After => {
                if index + 1 == len {
                    return Err(StoreError::Refused("Can not create a point after the last point"));
                }
                (index, index + 1)
            }
            InsertPosition::Before => {
                if index == 0 {
                    return Err(StoreError::Refused("Can not create a point before the first point"));
                }
                (index - 1, index)
            }
        };

        let new_x = (curve.points[before].x + curve.points[after].x) / 2;
        let knots: Vec<(f64, f64)> = curve
            .points
            .iter()
            .map(|p| (f64::from(p.x), f64::from(p.y)))
            .collect();
        // Two points always exist, so the spline is always buildable.
        let new_y = MonotoneSpline::new(&knots)
            .map(|spline| spline.eval(f64::from(new_x)).round() as i32)
            .unwrap_or(curve.points[before].y);
        let new_y = curve.kind.value_range().clamp(new_y);

        curve.points.insert(after, CurvePoint::new(new_x, new_y));
        Ok(curve.clone())
    }

    /// Remove a point; the boundary anchors are not deletable.
    pub fn delete_point(&self, id: i64, index: usize) -> Result<Curve, StoreError> {
        let mut entry = self.curves.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let curve = entry.value_mut();
        let len = curve.points.len();
        if index >= len {
            return Err(StoreError::Refused("Point index out of range"));
        }
        if index == 0 {
            return Err(StoreError::Refused("The first point is not deletable"));
        }
        if index + 1 == len {
            return Err(StoreError::Refused("The last point is not deletable"));
        }
        curve.points.remove(index);
        Ok(curve.clone())
    }
}

impl Default for CurveStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_seeded_per_kind() {
        let store = CurveStore::with_defaults();
        let curves = store.list(None);
        assert_eq!(curves.len(), 4);
        for kind in CurveKind::ALL {
            let curve = curves.iter().find(|c| c.kind == kind).unwrap();
            assert!(curve.is_default);
            assert!(curve.check_invariants().is_ok(), "{kind:?} seed is malformed");
        }
    }

    #[test]
    fn test_list_filters_by_kind() {
        let store = CurveStore::with_defaults();
        let brightness = store.list(Some(CurveKind::Brightness));
        assert_eq!(brightness.len(), 1);
        assert_eq!(brightness[0].kind, CurveKind::Brightness);
    }

    #[test]
    fn test_create_spaces_points_evenly() {
        let store = CurveStore::new();
        let curve = store.create("Evening".into(), CurveKind::Brightness, 0, 5);
        let xs: Vec<i32> = curve.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 360, 720, 1080, 1440]);
        assert!(curve.points.iter().all(|p| p.y == 200));
        assert!(curve.check_invariants().is_ok());
    }

    #[test]
    fn test_create_defaults_to_boundary_anchors() {
        let store = CurveStore::new();
        let curve = store.create("Evening".into(), CurveKind::Brightness, 0, 2);
        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.points[0], CurvePoint::new(0, 200));
        assert_eq!(curve.points[1], CurvePoint::new(1440, 200));
    }

    #[test]
    fn test_create_clamps_initial_value_to_kind() {
        let store = CurveStore::new();
        // 200 sits above the color-temperature minimum but inside its range;
        // saturation's maximum is exactly 200; brightness keeps it as-is.
        let ct = store.create("Warm".into(), CurveKind::ColorTemperature, 0, 2);
        assert!(ct.points.iter().all(|p| p.y == 200));
        let sat = store.create("Vivid".into(), CurveKind::Saturation, 0, 2);
        assert!(sat.points.iter().all(|p| p.y == 200));
    }

    #[test]
    fn test_update_point_clamps_and_reorders() {
        let store = CurveStore::new();
        let curve = store.create("Evening".into(), CurveKind::Brightness, 0, 3);
        // Push the middle point past its right neighbor with an oversized y.
        let updated = store.update_point(curve.id, 1, 1200, 400).unwrap();
        let xs: Vec<i32> = updated.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1200, 1440]);
        assert_eq!(updated.points[1].y, 254);
    }

    #[test]
    fn test_update_point_unknown_curve() {
        let store = CurveStore::new();
        assert_eq!(store.update_point(99, 0, 0, 0), Err(StoreError::NotFound(99)));
    }

    #[test]
    fn test_insert_after_uses_midpoint_and_curve_value() {
        let store = CurveStore::new();
        let curve = store.create("Flat".into(), CurveKind::Brightness, 0, 2);
        let updated = store.insert_point(curve.id, 0, InsertPosition::After).unwrap();
        assert_eq!(updated.points.len(), 3);
        // Midpoint in time, on the (flat) interpolated curve in value.
        assert_eq!(updated.points[1], CurvePoint::new(720, 200));
        assert!(updated.check_invariants().is_ok());
    }

    #[test]
    fn test_insert_before_mirrors_after() {
        let store = CurveStore::new();
        let curve = store.create("Flat".into(), CurveKind::Brightness, 0, 2);
        let updated = store.insert_point(curve.id, 1, InsertPosition::Before).unwrap();
        assert_eq!(updated.points[1].x, 720);
    }

    #[test]
    fn test_insert_past_the_ends_is_refused() {
        let store = CurveStore::new();
        let curve = store.create("Flat".into(), CurveKind::Brightness, 0, 2);
        assert!(matches!(
            store.insert_point(curve.id, 1, InsertPosition::After),
            Err(StoreError::Refused(_))
        ));
        assert!(matches!(
            store.insert_point(curve.id, 0, InsertPosition::Before),
            Err(StoreError::Refused(_))
        ));
    }

    #[test]
    fn test_inserted_value_follows_curve_shape() {
        let store = CurveStore::with_defaults();
        let brightness = store
            .list(Some(CurveKind::Brightness))
            .into_iter()
            .next()
            .unwrap();
        // Between (360, 216) and (660, 182): midpoint 510, value between.
        let updated = store.insert_point(brightness.id, 1, InsertPosition::After).unwrap();
        let inserted = updated.points[2];
        assert_eq!(inserted.x, 510);
        assert!((182..=216).contains(&inserted.y), "unexpected y {}", inserted.y);
    }

    #[test]
    fn test_delete_point_refuses_anchors() {
        let store = CurveStore::new();
        let curve = store.create("Flat".into(), CurveKind::Brightness, 0, 3);
        assert!(matches!(
            store.delete_point(curve.id, 0),
            Err(StoreError::Refused(_))
        ));
        assert!(matches!(
            store.delete_point(curve.id, 2),
            Err(StoreError::Refused(_))
        ));
        // The refusals left the curve unchanged.
        assert_eq!(store.get(curve.id).unwrap().points.len(), 3);
        let updated = store.delete_point(curve.id, 1).unwrap();
        assert_eq!(updated.points.len(), 2);
    }

    #[test]
    fn test_delete_default_curve_is_refused() {
        let store = CurveStore::with_defaults();
        let default_id = store.list(None)[0].id;
        assert!(matches!(store.delete(default_id), Err(StoreError::Refused(_))));
        let created = store.create("Mine".into(), CurveKind::Hue, 0, 2);
        assert!(store.delete(created.id).is_ok());
        assert_eq!(store.get(created.id), Err(StoreError::NotFound(created.id)));
    }

    #[test]
    fn test_update_meta() {
        let store = CurveStore::new();
        let curve = store.create("Old".into(), CurveKind::Brightness, 0, 2);
        let updated = store.update_meta(curve.id, Some("New".into()), None).unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.offset, 0);
        let updated = store.update_meta(curve.id, None, Some(-40)).unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.offset, -40);
    }

    #[test]
    fn test_edit_sequence_keeps_points_ordered() {
        let store = CurveStore::with_defaults();
        let id = store.list(Some(CurveKind::Brightness))[0].id;
        let mut curve = store.insert_point(id, 1, InsertPosition::After).unwrap();
        curve = store.update_point(curve.id, 2, 600, 50).unwrap();
        curve = store.delete_point(curve.id, 3).unwrap();
        curve = store.update_point(curve.id, 1, 900, 230).unwrap();
        for pair in curve.points.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
        assert_eq!(curve.points[0].x, 0);
        assert_eq!(curve.points[curve.points.len() - 1].x, 1440);
    }
}
