//! Shared layout helpers: panel frames, labels, kind badges.

use egui::{Color32, CornerRadius, Frame, Margin, RichText, Stroke, Ui};
use luxcurve_core::CurveKind;

use crate::{sizing, theme};

/// Standard floating panel frame with a soft shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

/// Small muted section label.
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// A representative color for a curve kind, used for list badges.
pub fn kind_color(kind: CurveKind) -> Color32 {
    match kind {
        CurveKind::Brightness => Color32::from_rgb(250, 219, 20),
        CurveKind::ColorTemperature => Color32::from_rgb(255, 149, 43),
        CurveKind::Hue => Color32::from_rgb(139, 92, 246),
        CurveKind::Saturation => Color32::from_rgb(120, 120, 120),
    }
}

/// Draw a small colored badge naming the curve kind.
pub fn kind_badge(ui: &mut Ui, kind: CurveKind) {
    let color = kind_color(kind);
    Frame::new()
        .fill(color.gamma_multiply(0.25))
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(kind.label()).size(11.0).color(theme::TEXT));
        });
}
