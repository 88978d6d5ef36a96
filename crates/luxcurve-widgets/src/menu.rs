//! Contextual action menu for a curve point.
//!
//! Opened by a long-hold or secondary click on a point. Actions that would
//! be refused by the store (deleting an anchor, inserting past an end) are
//! disabled rather than surfaced as errors.

use egui::{vec2, Align2, Color32, Context, CornerRadius, CursorIcon, FontId, Pos2, Sense, Ui};
use luxcurve_core::InsertPosition;

use crate::layout::panel_frame;
use crate::{sizing, theme};

/// What the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointMenuAction {
    /// Delete the point.
    Delete,
    /// Open direct value entry.
    EditValues,
    /// Insert a new point next to this one.
    Insert(InsertPosition),
    /// Close the menu without acting.
    Dismiss,
}

/// The point action menu.
pub struct PointMenu {
    index: usize,
    point_count: usize,
}

impl PointMenu {
    /// Menu for the point at `index` of a curve with `point_count` points.
    pub fn new(index: usize, point_count: usize) -> Self {
        Self { index, point_count }
    }

    /// Show the menu near `anchor`; returns the chosen action, if any.
    pub fn show(self, ctx: &Context, anchor: Pos2) -> Option<PointMenuAction> {
        let mut action = None;
        let is_first = self.index == 0;
        let is_last = self.index + 1 == self.point_count;

        let area = egui::Area::new(egui::Id::new(("point_menu", self.index)))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .pivot(Align2::LEFT_TOP)
            .show(ctx, |ui| {
                panel_frame().show(ui, |ui| {
                    ui.set_min_width(150.0);
                    if action_item(ui, "Edit values", true) {
                        action = Some(PointMenuAction::EditValues);
                    }
                    if action_item(ui, "Insert before", !is_first) {
                        action = Some(PointMenuAction::Insert(InsertPosition::Before));
                    }
                    if action_item(ui, "Insert after", !is_last) {
                        action = Some(PointMenuAction::Insert(InsertPosition::After));
                    }
                    menu_separator(ui);
                    if danger_item(ui, "Delete point", !(is_first || is_last)) {
                        action = Some(PointMenuAction::Delete);
                    }
                    if action_item(ui, "Cancel", true) {
                        action = Some(PointMenuAction::Dismiss);
                    }
                });
            });

        // A click anywhere outside the menu dismisses it.
        if action.is_none() {
            let clicked_outside = ctx.input(|i| {
                i.pointer.any_pressed()
                    && i.pointer
                        .interact_pos()
                        .is_some_and(|pos| !area.response.rect.contains(pos))
            });
            if clicked_outside {
                action = Some(PointMenuAction::Dismiss);
            }
        }

        action
    }
}

/// One clickable menu row. Disabled rows are dimmed and inert.
fn action_item(ui: &mut Ui, label: &str, enabled: bool) -> bool {
    item(ui, label, enabled, theme::TEXT)
}

/// A destructive menu row.
fn danger_item(ui: &mut Ui, label: &str, enabled: bool) -> bool {
    item(ui, label, enabled, theme::DANGER)
}

fn item(ui: &mut Ui, label: &str, enabled: bool, text_color: Color32) -> bool {
    let size = vec2(ui.available_width(), 26.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        if enabled && response.hovered() {
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), theme::HOVER_BG);
        }
        let color = if enabled { text_color } else { Color32::from_gray(180) };
        ui.painter().text(
            Pos2::new(rect.left() + 10.0, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            color,
        );
    }

    let clicked = response.clicked();
    if enabled {
        response.on_hover_cursor(CursorIcon::PointingHand);
    }
    enabled && clicked
}

fn menu_separator(ui: &mut Ui) {
    ui.add_space(4.0);
    let rect = ui.available_rect_before_wrap();
    let y = rect.top();
    ui.painter().line_segment(
        [Pos2::new(rect.left() + 6.0, y), Pos2::new(rect.right() - 6.0, y)],
        egui::Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(4.0);
}
