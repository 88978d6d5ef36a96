//! Screen rendering: the curve list and the curve detail editor.

use egui::{Align, Color32, Frame, Layout, Margin, RichText, Slider};
use luxcurve_core::{CurveKind, EditorState, Modal};
use luxcurve_widgets::{
    kind_badge, panel_frame, section_label, theme, CurveChart, PickerAction, PointMenu, ValuePicker,
};

use crate::app::{App, BANNER_SECS};

impl App {
    /// Transient failure notice across the top of the window.
    pub(crate) fn render_banner(&mut self, ctx: &egui::Context) {
        if self
            .banner
            .as_ref()
            .is_some_and(|b| b.shown_at.elapsed().as_secs() >= BANNER_SECS)
        {
            self.banner = None;
        }
        let Some(banner) = &self.banner else { return };

        let mut dismissed = false;
        egui::TopBottomPanel::top("banner")
            .frame(Frame::new().fill(theme::DANGER).inner_margin(Margin::symmetric(10, 6)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&banner.message).color(Color32::WHITE));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });
        if dismissed {
            self.banner = None;
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }
    }

    /// The curve list with the create form.
    pub(crate) fn render_list(&mut self, ctx: &egui::Context) {
        let mut open_id = None;
        let mut refresh = false;
        let mut create = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Curves");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if self.pending_list.is_some() {
                        ui.spinner();
                    } else if ui.button("Reload").clicked() {
                        refresh = true;
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for curve in &self.curves {
                    ui.horizontal(|ui| {
                        if ui
                            .selectable_label(false, RichText::new(&curve.name).size(14.0))
                            .clicked()
                        {
                            open_id = Some(curve.id);
                        }
                        kind_badge(ui, curve.kind);
                        if curve.is_default {
                            section_label(ui, "built-in");
                        }
                    });
                }
                if self.curves.is_empty() && self.pending_list.is_none() {
                    ui.label(RichText::new("No curves yet.").color(theme::TEXT_MUTED));
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.create_name)
                        .hint_text("New curve name")
                        .desired_width(180.0),
                );
                egui::ComboBox::from_id_salt("create_kind")
                    .selected_text(self.create_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in CurveKind::ALL {
                            ui.selectable_value(&mut self.create_kind, kind, kind.label());
                        }
                    });
                let can_create =
                    !self.create_name.trim().is_empty() && self.pending_create.is_none();
                if ui.add_enabled(can_create, egui::Button::new("Create")).clicked() {
                    create = true;
                }
                if self.pending_create.is_some() {
                    ui.spinner();
                }
            });
        });

        if refresh {
            self.refresh_list();
        }
        if create {
            self.create_curve();
        }
        if let Some(id) = open_id {
            self.open_curve(id);
        }
    }

    /// The curve editor screen.
    pub(crate) fn render_detail(&mut self, ctx: &egui::Context, id: i64) {
        let Some(session) = self.sessions.get(&id) else {
            self.go_to_list();
            return;
        };
        let curve = session.curve().clone();
        let display = session.display_points();
        let active = session.active_index();
        let state = session.state();
        let busy = session.is_busy();

        let offset_preview = self.offset_drag.unwrap_or(curve.offset);

        let mut nav_back = false;
        let mut rename_open = false;
        let mut chart_events = Vec::new();
        let mut offset_submit = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("< Curves").clicked() {
                    nav_back = true;
                }
                ui.heading(&curve.name);
                kind_badge(ui, curve.kind);
                if busy {
                    ui.spinner();
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(RichText::new("Name").color(theme::TEXT_MUTED));
                ui.label(&curve.name);
                if ui.small_button("Rename").clicked() {
                    rename_open = true;
                }
                if curve.is_default {
                    section_label(ui, "built-in");
                }
            });
            ui.add_space(8.0);

            panel_frame().show(ui, |ui| {
                let chart = CurveChart::new(&display, curve.kind)
                    .offset(offset_preview)
                    .active(active)
                    .show(ui);
                chart_events = chart.events;
            });

            ui.add_space(8.0);
            let mut value = offset_preview;
            let slider = ui.add(
                Slider::new(&mut value, -250..=250)
                    .step_by(5.0)
                    .text("Offset"),
            );
            if slider.changed() {
                self.offset_drag = Some(value);
            }
            if slider.drag_stopped() {
                if let Some(value) = self.offset_drag.take() {
                    if value != curve.offset {
                        offset_submit = Some(value);
                    }
                }
            }
            section_label(ui, "Shifts the whole curve without touching its points.");

            if !curve.is_default {
                ui.add_space(12.0);
                let delete = egui::Button::new(RichText::new("Delete curve").color(Color32::WHITE))
                    .fill(theme::DANGER);
                if ui.add(delete).clicked() {
                    self.confirm_delete = true;
                }
            }
        });

        // Modals own the interaction until closed.
        let pointer = ctx.input(|i| i.pointer.latest_pos());
        let mut menu_action = None;
        if state == EditorState::ModalOpen(Modal::ActionMenu) {
            if let Some(anchor) = self.menu_anchor {
                menu_action = PointMenu::new(active, display.len()).show(ctx, anchor);
            }
        }

        let mut picker_action = PickerAction::None;
        if state == EditorState::ModalOpen(Modal::ValueEntry) {
            if let Some(picker) = self.picker.as_mut() {
                picker_action = ValuePicker::new(picker, curve.kind.value_range())
                    .show_percent(curve.kind == CurveKind::Brightness)
                    .show(ctx);
            }
        }

        let rename_action = self.render_rename_window(ctx);
        let delete_confirmed = self.render_delete_window(ctx, &curve.name);

        // Apply this frame's actions.
        self.handle_chart_events(id, chart_events, pointer);
        if let Some(action) = menu_action {
            self.handle_menu_action(id, action);
        }
        match picker_action {
            PickerAction::Save { x, y } => self.picker_saved(id, x, y),
            PickerAction::Cancel => self.picker_cancelled(id),
            PickerAction::None => {}
        }
        if rename_open {
            self.rename_text = Some(curve.name.clone());
        }
        if let Some(Some(name)) = rename_action {
            self.rename_text = None;
            if !name.trim().is_empty() {
                self.rename_curve(id, name.trim().to_string());
            }
        } else if let Some(None) = rename_action {
            self.rename_text = None;
        }
        if let Some(offset) = offset_submit {
            self.set_offset(id, offset);
        }
        if delete_confirmed {
            self.confirm_delete = false;
            self.delete_curve(id);
        }
        if nav_back {
            self.go_to_list();
        }
    }

    /// Rename dialog. `Some(Some(name))` on confirm, `Some(None)` on cancel.
    fn render_rename_window(&mut self, ctx: &egui::Context) -> Option<Option<String>> {
        let text = self.rename_text.as_mut()?;
        let mut action = None;
        egui::Window::new("Rename curve")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.text_edit_singleline(text);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = Some(None);
                    }
                    if ui.button("Done").clicked() {
                        action = Some(Some(text.clone()));
                    }
                });
            });
        action
    }

    /// Delete confirmation dialog; true when confirmed.
    fn render_delete_window(&mut self, ctx: &egui::Context, name: &str) -> bool {
        if !self.confirm_delete {
            return false;
        }
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Delete curve?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("\"{name}\" will be removed for every light using it."));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    let delete = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                        .fill(theme::DANGER);
                    if ui.add(delete).clicked() {
                        confirmed = true;
                    }
                });
            });
        if cancelled {
            self.confirm_delete = false;
        }
        confirmed
    }
}
