//! egui widgets for the Luxcurve editor.
//!
//! - **Chart**: the interactive curve plot (gradient fill, draggable points,
//!   offset curve, swipe pass-through)
//! - **Picker**: direct time/value entry modal
//! - **Menu**: contextual point actions (delete, edit, insert)
//! - **Layout**: small shared helpers (badges, labels, frames)

pub mod chart;
pub mod layout;
pub mod menu;
pub mod picker;

pub use chart::{format_minutes, ChartEvent, ChartResponse, CurveChart};
pub use layout::{kind_badge, kind_color, panel_frame, section_label};
pub use menu::{PointMenu, PointMenuAction};
pub use picker::{PickerAction, PickerState, ValidationError, ValuePicker};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Radius of a curve point marker.
    pub const POINT_RADIUS: f32 = 9.0;
    /// Hit-test radius around a point marker.
    pub const POINT_HIT_RADIUS: f32 = 16.0;
    /// Standard corner radius.
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius.
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Chart grid lines
    pub const GRID: Color32 = Color32::from_rgb(102, 102, 102);
    /// The offset curve and destructive actions
    pub const DANGER: Color32 = Color32::from_rgb(235, 68, 90);
}
