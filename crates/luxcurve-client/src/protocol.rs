//! Wire types for the curve store API.

use luxcurve_core::{Curve, CurveKind, InsertPosition, RequestId};
use serde::{Deserialize, Serialize};

use crate::client::ApiError;

/// Body of `PUT /curves/{id}/{index}`: the new point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointUpdate {
    pub x: i32,
    pub y: i32,
}

/// Body of `POST /curves/{id}/{index}`: where the new point goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointInsert {
    pub position: InsertPosition,
}

/// Body of `PUT /curves/{id}`: metadata edits. Absent fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
}

/// Body of `POST /curves/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveCreate {
    pub name: String,
    pub kind: CurveKind,
    /// Number of evenly spaced initial points; the store defaults to the
    /// two boundary anchors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// A request for the store, dispatched through [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum CurveRequest {
    /// `GET /curves/`
    FetchAll,
    /// `GET /curves/{id}`
    Fetch { id: i64 },
    /// `POST /curves/`
    Create { body: CurveCreate },
    /// `PUT /curves/{id}`
    UpdateMeta { id: i64, body: CurveUpdate },
    /// `DELETE /curves/{id}`
    Delete { id: i64 },
    /// `PUT /curves/{id}/{index}`
    ChangePoint { id: i64, index: usize, body: PointUpdate },
    /// `POST /curves/{id}/{index}`
    InsertPoint { id: i64, index: usize, body: PointInsert },
    /// `DELETE /curves/{id}/{index}`
    DeletePoint { id: i64, index: usize },
}

impl CurveRequest {
    /// The curve a request addresses, when it addresses one.
    pub fn curve_id(&self) -> Option<i64> {
        match self {
            CurveRequest::FetchAll | CurveRequest::Create { .. } => None,
            CurveRequest::Fetch { id }
            | CurveRequest::UpdateMeta { id, .. }
            | CurveRequest::Delete { id }
            | CurveRequest::ChangePoint { id, .. }
            | CurveRequest::InsertPoint { id, .. }
            | CurveRequest::DeletePoint { id, .. } => Some(*id),
        }
    }
}

/// One resolved request, drained via `poll_events()`.
#[derive(Debug)]
pub struct CurveEvent {
    /// Token returned by `submit` for the originating request.
    pub request: RequestId,
    /// The curve the request addressed, if any.
    pub curve_id: Option<i64>,
    pub outcome: CurveOutcome,
}

/// What the store answered.
#[derive(Debug)]
pub enum CurveOutcome {
    /// The full curve list.
    Curves(Vec<Curve>),
    /// A single authoritative curve (fetches, creates, and every edit).
    Curve(Curve),
    /// A curve was deleted.
    Deleted { id: i64 },
    /// The round trip failed; the caller reverts to its last known state.
    Failed(ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_update_wire_shape() {
        let body = PointUpdate { x: 720, y: 254 };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"x":720,"y":254}"#);
    }

    #[test]
    fn test_point_insert_wire_shape() {
        let body = PointInsert { position: InsertPosition::After };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"position":"after"}"#);
    }

    #[test]
    fn test_curve_update_skips_absent_fields() {
        let body = CurveUpdate { name: None, offset: Some(-40) };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"offset":-40}"#);
        let body = CurveUpdate { name: Some("Evening".into()), offset: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":"Evening"}"#);
    }

    #[test]
    fn test_curve_create_wire_shape() {
        let body = CurveCreate { name: "Evening".into(), kind: CurveKind::Brightness, count: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":"Evening","kind":"bri"}"#);
    }

    #[test]
    fn test_request_curve_id() {
        assert_eq!(CurveRequest::FetchAll.curve_id(), None);
        assert_eq!(CurveRequest::Fetch { id: 3 }.curve_id(), Some(3));
        let change = CurveRequest::ChangePoint {
            id: 9,
            index: 1,
            body: PointUpdate { x: 60, y: 0 },
        };
        assert_eq!(change.curve_id(), Some(9));
    }

    #[test]
    fn test_curve_response_parses() {
        let json = r#"{
            "id": 1,
            "name": "Default",
            "kind": "ct",
            "default": true,
            "offset": 0,
            "points": [{"x": 0, "y": 153}, {"x": 1440, "y": 500}]
        }"#;
        let curve: Curve = serde_json::from_str(json).unwrap();
        assert_eq!(curve.kind, CurveKind::ColorTemperature);
        assert!(curve.is_default);
        assert_eq!(curve.points.len(), 2);
        assert!(curve.check_invariants().is_ok());
    }
}
