//! The edit controller: translates store answers and chart gestures into
//! session transitions and outgoing requests.
//!
//! Point-level intents are serialized per curve: while one is in flight,
//! later intents are deferred in the session (latest wins) and dispatched
//! when the authoritative response lands. Metadata writes (name, offset)
//! ride alongside; they cannot race on point indices and the cache is
//! replaced by whichever response arrives last either way.

use egui::Pos2;
use luxcurve_client::{
    CurveCreate, CurveEvent, CurveOutcome, CurveRequest, CurveUpdate, PointInsert, PointUpdate,
};
use luxcurve_core::{Curve, EditIntent, EditSession, RequestId};
use luxcurve_widgets::{ChartEvent, PickerState, PointMenuAction};

use crate::app::{App, Screen};

impl App {
    /// Reconcile one resolved request.
    pub(crate) fn handle_store_event(&mut self, event: CurveEvent) {
        match event.outcome {
            CurveOutcome::Curves(mut list) => {
                if self.pending_list == Some(event.request) {
                    self.pending_list = None;
                }
                list.sort_by_key(|c| c.id);
                self.curves = list;
            }
            CurveOutcome::Curve(curve) => self.apply_curve(event.request, curve),
            CurveOutcome::Deleted { id } => {
                self.curves.retain(|c| c.id != id);
                self.sessions.remove(&id);
                if self.screen == (Screen::CurveDetail { id }) {
                    self.go_to_list();
                }
            }
            CurveOutcome::Failed(error) => {
                if self.pending_list == Some(event.request) {
                    self.pending_list = None;
                }
                if self.pending_create == Some(event.request) {
                    self.pending_create = None;
                }
                if let Some(id) = event.curve_id {
                    if let Some(session) = self.sessions.get_mut(&id) {
                        session.apply_failure(event.request);
                    }
                }
                self.show_banner(format!("Request failed: {error}"));
            }
        }
    }

    /// An authoritative curve arrived; it replaces every local copy.
    fn apply_curve(&mut self, request: RequestId, curve: Curve) {
        match self.curves.iter_mut().find(|c| c.id == curve.id) {
            Some(slot) => *slot = curve.clone(),
            None => {
                self.curves.push(curve.clone());
                self.curves.sort_by_key(|c| c.id);
            }
        }

        let id = curve.id;
        if self.pending_create == Some(request) {
            self.pending_create = None;
            self.create_name.clear();
            self.sessions.insert(id, EditSession::new(curve));
            self.screen = Screen::CurveDetail { id };
            return;
        }

        let followup = match self.sessions.get_mut(&id) {
            Some(session) => session.apply_response(request, curve),
            None => None,
        };
        if let Some(intent) = followup {
            self.dispatch_intent(id, intent);
        }
    }

    /// Send a point intent, or defer it while the curve is busy.
    pub(crate) fn dispatch_intent(&mut self, curve_id: i64, intent: EditIntent) {
        let busy = match self.sessions.get(&curve_id) {
            Some(session) => session.is_busy(),
            None => return,
        };
        if busy {
            if let Some(session) = self.sessions.get_mut(&curve_id) {
                session.defer(intent);
            }
            return;
        }
        let request = intent_request(curve_id, intent);
        if let Some(rid) = self.submit(request) {
            if let Some(session) = self.sessions.get_mut(&curve_id) {
                session.begin_request(rid);
            }
        }
    }

    pub(crate) fn refresh_list(&mut self) {
        if self.pending_list.is_some() {
            return;
        }
        self.pending_list = self.submit(CurveRequest::FetchAll);
    }

    /// Open a curve from the list and reload its authoritative state.
    pub(crate) fn open_curve(&mut self, id: i64) {
        let Some(curve) = self.curves.iter().find(|c| c.id == id).cloned() else {
            return;
        };
        self.sessions.entry(id).or_insert_with(|| EditSession::new(curve));
        self.screen = Screen::CurveDetail { id };
        self.rename_text = None;
        self.confirm_delete = false;
        self.picker = None;
        self.menu_anchor = None;
        self.offset_drag = None;

        let already_busy = self.sessions.get(&id).is_some_and(|s| s.is_busy());
        if !already_busy {
            if let Some(rid) = self.submit(CurveRequest::Fetch { id }) {
                if let Some(session) = self.sessions.get_mut(&id) {
                    session.begin_request(rid);
                }
            }
        }
    }

    pub(crate) fn go_to_list(&mut self) {
        self.screen = Screen::CurveList;
        self.refresh_list();
    }

    pub(crate) fn create_curve(&mut self) {
        let name = self.create_name.trim().to_string();
        if name.is_empty() || self.pending_create.is_some() {
            return;
        }
        let body = CurveCreate {
            name,
            kind: self.create_kind,
            count: None,
        };
        self.pending_create = self.submit(CurveRequest::Create { body });
    }

    pub(crate) fn delete_curve(&mut self, id: i64) {
        self.submit(CurveRequest::Delete { id });
    }

    pub(crate) fn rename_curve(&mut self, id: i64, name: String) {
        let body = CurveUpdate {
            name: Some(name),
            offset: None,
        };
        self.submit(CurveRequest::UpdateMeta { id, body });
    }

    pub(crate) fn set_offset(&mut self, id: i64, offset: i32) {
        let body = CurveUpdate {
            name: None,
            offset: Some(offset),
        };
        self.submit(CurveRequest::UpdateMeta { id, body });
    }

    /// Feed this frame's chart gestures into the session.
    pub(crate) fn handle_chart_events(
        &mut self,
        id: i64,
        events: Vec<ChartEvent>,
        pointer: Option<Pos2>,
    ) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        let mut intents = Vec::new();
        let mut swipe = None;

        for event in events {
            match event {
                ChartEvent::PointHovered { index } => session.select(index),
                ChartEvent::DragStarted { index } => {
                    session.begin_drag(index);
                }
                ChartEvent::DragMoved { raw, .. } => {
                    session.drag_to(raw);
                }
                ChartEvent::DragEnded { .. } => {
                    if let Some(intent) = session.end_drag() {
                        intents.push(intent);
                    }
                }
                ChartEvent::PointClicked { index } => {
                    session.select(index);
                    if let Some(point) = session.open_value_entry() {
                        self.picker = Some(PickerState::for_point(point));
                    }
                }
                ChartEvent::MenuRequested { index } => {
                    session.select(index);
                    session.open_action_menu();
                    self.menu_anchor = pointer;
                }
                ChartEvent::Swiped { delta_x } => swipe = Some(delta_x),
            }
        }

        for intent in intents {
            self.dispatch_intent(id, intent);
        }
        if let Some(delta_x) = swipe {
            self.swipe_navigate(id, delta_x);
        }
    }

    /// Act on a choice from the point menu.
    pub(crate) fn handle_menu_action(&mut self, id: i64, action: PointMenuAction) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        self.menu_anchor = None;
        let intent = match action {
            PointMenuAction::Dismiss => {
                session.close_modal();
                return;
            }
            PointMenuAction::EditValues => {
                session.close_modal();
                if let Some(point) = session.open_value_entry() {
                    self.picker = Some(PickerState::for_point(point));
                }
                return;
            }
            PointMenuAction::Delete => session.menu_delete(),
            PointMenuAction::Insert(position) => session.menu_insert(position),
        };
        match intent {
            Ok(intent) => self.dispatch_intent(id, intent),
            // Disabled menu rows make these unreachable through the UI.
            Err(err) => log::error!("menu action on invalid point: {err}"),
        }
    }

    /// The picker was confirmed for the active point of `id`.
    pub(crate) fn picker_saved(&mut self, id: i64, x: i32, y: i32) {
        self.picker = None;
        let intent = match self.sessions.get_mut(&id) {
            Some(session) => session.submit_value_entry(x, y),
            None => return,
        };
        match intent {
            Ok(intent) => self.dispatch_intent(id, intent),
            Err(err) => log::error!("value entry targeted an invalid point: {err}"),
        }
    }

    pub(crate) fn picker_cancelled(&mut self, id: i64) {
        self.picker = None;
        if let Some(session) = self.sessions.get_mut(&id) {
            session.close_modal();
        }
    }

    /// A horizontal swipe over empty chart area moves between curves.
    pub(crate) fn swipe_navigate(&mut self, id: i64, delta_x: f32) {
        let Some(position) = self.curves.iter().position(|c| c.id == id) else {
            return;
        };
        let target = if delta_x < 0.0 {
            position + 1
        } else {
            position.wrapping_sub(1)
        };
        if let Some(curve) = self.curves.get(target) {
            let target_id = curve.id;
            log::debug!("swipe navigation {id} -> {target_id}");
            self.open_curve(target_id);
        }
    }
}

/// The request a validated intent maps to.
fn intent_request(curve_id: i64, intent: EditIntent) -> CurveRequest {
    match intent {
        EditIntent::ChangePoint { index, x, y } => CurveRequest::ChangePoint {
            id: curve_id,
            index,
            body: PointUpdate { x, y },
        },
        EditIntent::InsertPoint { index, position } => CurveRequest::InsertPoint {
            id: curve_id,
            index,
            body: PointInsert { position },
        },
        EditIntent::DeletePoint { index } => CurveRequest::DeletePoint {
            id: curve_id,
            index,
        },
    }
}
