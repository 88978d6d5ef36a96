//! Luxcurve Core Library
//!
//! Platform-agnostic data model and editing logic for day-long light
//! schedule curves: the canonical point sequence, drag quantization,
//! the derived offset curve, per-kind color gradients, and the edit
//! session state machine that serializes writes to the curve store.

pub mod curve;
pub mod error;
pub mod gradient;
pub mod offset;
pub mod session;
pub mod snap;

pub use curve::{Curve, CurveKind, CurvePoint, EditIntent, InsertPosition, ValueRange, DAY_END, DAY_START};
pub use error::CurveError;
pub use gradient::{color_stops, fill_stops, marker_stops, ColorStop, FILL_ALPHA, MARKER_ALPHA};
pub use offset::project;
pub use session::{EditSession, EditorState, Modal, RequestId};
pub use snap::{quantize, SNAP_STEP_MINUTES};
