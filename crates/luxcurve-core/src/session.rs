//! Per-curve edit session: gesture state machine and write serialization.
//!
//! The session holds a write-through cache of the last authoritative curve
//! received from the store. Gestures only produce previews and intents; the
//! cache is replaced wholesale when the store answers, and reverted to (by
//! simply dropping the preview) when a request fails.
//!
//! At most one request per curve is in flight. An intent issued while the
//! session is busy is deferred (latest wins) and dispatched when the
//! outstanding response resolves; a failure drops the deferred intent, since
//! it was derived from a state the store just refused.

use crate::curve::{Curve, CurvePoint, EditIntent, InsertPosition};
use crate::error::CurveError;
use crate::snap;
use kurbo::Point;
use uuid::Uuid;

/// Token identifying one dispatched request.
pub type RequestId = Uuid;

/// Which modal is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Direct x/y entry for the active point.
    ValueEntry,
    /// Contextual action menu (delete / edit / insert).
    ActionMenu,
}

/// The gesture state of the editor for one curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No interaction.
    Idle,
    /// A point is hovered/selected; gestures target the active index.
    PointSelected,
    /// A point is being dragged; the preview follows the pointer.
    Dragging { index: usize },
    /// A modal owns the interaction; closing it discards pending input.
    ModalOpen(Modal),
}

/// Editing state for a single open curve.
#[derive(Debug, Clone)]
pub struct EditSession {
    curve: Curve,
    state: EditorState,
    active_index: usize,
    drag_preview: Option<CurvePoint>,
    in_flight: Option<RequestId>,
    deferred: Option<EditIntent>,
}

impl EditSession {
    /// Start a session from an authoritative curve.
    pub fn new(curve: Curve) -> Self {
        Self {
            curve,
            state: EditorState::Idle,
            active_index: 0,
            drag_preview: None,
            in_flight: None,
            deferred: None,
        }
    }

    /// The last authoritative curve.
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Current gesture state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The point index gestures currently target.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Whether a request for this curve is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight request token, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// The quantized drag preview, if a drag is in progress.
    pub fn drag_preview(&self) -> Option<(usize, CurvePoint)> {
        match self.state {
            EditorState::Dragging { index } => self.drag_preview.map(|p| (index, p)),
            _ => None,
        }
    }

    /// Points to display this frame: the cache, with the dragged point
    /// replaced by its preview. Never mutates the cache.
    pub fn display_points(&self) -> Vec<CurvePoint> {
        let mut points = self.curve.points.clone();
        if let Some((index, preview)) = self.drag_preview() {
            if let Some(slot) = points.get_mut(index) {
                *slot = preview;
            }
        }
        points
    }

    /// A point was hovered or clicked; make it the gesture target.
    pub fn select(&mut self, index: usize) {
        if index >= self.curve.len() {
            return;
        }
        if matches!(self.state, EditorState::Idle | EditorState::PointSelected) {
            self.active_index = index;
            self.state = EditorState::PointSelected;
        }
    }

    /// Claim a drag gesture that began on `index`.
    ///
    /// Returns false (and leaves the state alone) when the gesture cannot
    /// start: unknown point, a modal open, or a drag already running.
    pub fn begin_drag(&mut self, index: usize) -> bool {
        if index >= self.curve.len() {
            return false;
        }
        match self.state {
            EditorState::Idle | EditorState::PointSelected => {
                self.active_index = index;
                self.state = EditorState::Dragging { index };
                self.drag_preview = self.curve.point(index);
                true
            }
            _ => false,
        }
    }

    /// Move the drag to a raw position (curve coordinates, already clamped
    /// to the plot area by the drag surface). Returns the snapped preview.
    pub fn drag_to(&mut self, raw: Point) -> Option<CurvePoint> {
        match self.state {
            EditorState::Dragging { .. } => {
                let snapped = snap::quantize(raw);
                self.drag_preview = Some(snapped);
                Some(snapped)
            }
            _ => None,
        }
    }

    /// Release the drag, producing the change intent for the preview
    /// position. Boundary anchoring and range clamping are applied here.
    pub fn end_drag(&mut self) -> Option<EditIntent> {
        let EditorState::Dragging { index } = self.state else {
            return None;
        };
        self.state = EditorState::PointSelected;
        let preview = self.drag_preview.take()?;
        match self.curve.change_point(index, preview.x, preview.y) {
            Ok(intent) => Some(intent),
            Err(err) => {
                log::error!("drag released on invalid point: {err}");
                None
            }
        }
    }

    /// Abort the drag without producing an intent.
    pub fn cancel_drag(&mut self) {
        if matches!(self.state, EditorState::Dragging { .. }) {
            self.state = EditorState::PointSelected;
            self.drag_preview = None;
        }
    }

    /// Open the direct value entry modal for the active point.
    /// Returns the point to prefill the form with.
    pub fn open_value_entry(&mut self) -> Option<CurvePoint> {
        let point = self.curve.point(self.active_index)?;
        self.state = EditorState::ModalOpen(Modal::ValueEntry);
        Some(point)
    }

    /// Open the contextual action menu for the active point.
    pub fn open_action_menu(&mut self) {
        if self.curve.point(self.active_index).is_some() {
            self.state = EditorState::ModalOpen(Modal::ActionMenu);
        }
    }

    /// Dismiss the open modal, discarding any pending input.
    pub fn close_modal(&mut self) {
        if matches!(self.state, EditorState::ModalOpen(_)) {
            self.state = EditorState::PointSelected;
        }
    }

    /// Confirm the value entry modal with exact coordinates.
    pub fn submit_value_entry(&mut self, x: i32, y: i32) -> Result<EditIntent, CurveError> {
        let intent = self.curve.change_point(self.active_index, x, y)?;
        self.close_modal();
        Ok(intent)
    }

    /// Delete the active point from the action menu.
    pub fn menu_delete(&mut self) -> Result<EditIntent, CurveError> {
        let intent = self.curve.delete_point(self.active_index)?;
        self.close_modal();
        Ok(intent)
    }

    /// Insert a point next to the active point from the action menu.
    pub fn menu_insert(&mut self, position: InsertPosition) -> Result<EditIntent, CurveError> {
        let intent = self.curve.insert_point(self.active_index, position)?;
        self.close_modal();
        Ok(intent)
    }

    /// Record that `id` was dispatched for this curve.
    pub fn begin_request(&mut self, id: RequestId) {
        debug_assert!(self.in_flight.is_none(), "overlapping dispatch for one curve");
        self.in_flight = Some(id);
    }

    /// Park an intent until the outstanding request resolves. Latest wins.
    pub fn defer(&mut self, intent: EditIntent) {
        if let Some(dropped) = self.deferred.replace(intent) {
            log::debug!("deferred edit superseded: {dropped:?}");
        }
    }

    /// Apply an authoritative response.
    ///
    /// The cache is replaced regardless of which request produced the
    /// response — the store's latest word always wins. If the response
    /// resolves the in-flight request, the deferred intent (if any) is
    /// returned for dispatch.
    pub fn apply_response(&mut self, id: RequestId, curve: Curve) -> Option<EditIntent> {
        if let Err(reason) = curve.check_invariants() {
            log::error!("store returned malformed curve {}: {reason}", curve.id);
        }
        self.curve = curve;
        self.active_index = self.active_index.min(self.curve.len().saturating_sub(1));
        if self.in_flight == Some(id) {
            self.in_flight = None;
            self.deferred.take()
        } else {
            None
        }
    }

    /// A request failed: keep the cache (last authoritative state), drop the
    /// preview and any deferred intent.
    pub fn apply_failure(&mut self, id: RequestId) {
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
        self.drag_preview = None;
        self.deferred = None;
        if matches!(self.state, EditorState::Dragging { .. }) {
            self.state = EditorState::PointSelected;
        }
    }
}
