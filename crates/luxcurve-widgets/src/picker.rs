//! Direct value entry modal for the active point.
//!
//! Lets the user type exact time/value coordinates. Input is validated
//! inline; a malformed field blocks submission and no request is sent.
//! Confirming produces the same change intent a drag would.

use egui::{Align2, Color32, Context, RichText, TextEdit};
use luxcurve_core::{CurvePoint, ValueRange, DAY_END, DAY_START};
use thiserror::Error;

use crate::theme;

/// Why a field was rejected. Shown inline next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("enter a whole number")]
    NotANumber,
    #[error("must be between {min} and {max}")]
    OutOfBounds { min: i32, max: i32 },
}

/// Parse a field and check it against inclusive bounds.
fn parse_field(text: &str, min: i32, max: i32) -> Result<i32, ValidationError> {
    let value: i32 = text.trim().parse().map_err(|_| ValidationError::NotANumber)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfBounds { min, max });
    }
    Ok(value)
}

/// Form state for the picker, kept by the caller while the modal is open.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    pub time_text: String,
    pub value_text: String,
    time_error: Option<ValidationError>,
    value_error: Option<ValidationError>,
}

impl PickerState {
    /// Prefill the form with the point being edited.
    pub fn for_point(point: CurvePoint) -> Self {
        Self {
            time_text: point.x.to_string(),
            value_text: point.y.to_string(),
            time_error: None,
            value_error: None,
        }
    }

    /// Validate both fields, recording inline errors.
    fn validate(&mut self, range: ValueRange) -> Option<(i32, i32)> {
        let time = parse_field(&self.time_text, DAY_START, DAY_END);
        let value = parse_field(&self.value_text, range.min, range.max);
        self.time_error = time.err();
        self.value_error = value.err();
        match (time, value) {
            (Ok(x), Ok(y)) => Some((x, y)),
            _ => None,
        }
    }
}

/// What the user did with the picker this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    /// Confirmed with validated coordinates.
    Save { x: i32, y: i32 },
    /// Dismissed; the pending edit is discarded.
    Cancel,
}

/// The direct entry modal.
pub struct ValuePicker<'a> {
    state: &'a mut PickerState,
    range: ValueRange,
    show_percent: bool,
}

impl<'a> ValuePicker<'a> {
    pub fn new(state: &'a mut PickerState, range: ValueRange) -> Self {
        Self {
            state,
            range,
            show_percent: false,
        }
    }

    /// Show the value as a percentage of the range maximum (brightness).
    pub fn show_percent(mut self, show: bool) -> Self {
        self.show_percent = show;
        self
    }

    /// Show the modal; returns what the user did.
    pub fn show(self, ctx: &Context) -> PickerAction {
        let mut action = PickerAction::None;

        egui::Window::new("Edit point")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(220.0);

                ui.label("Time (minutes of day)");
                ui.add(TextEdit::singleline(&mut self.state.time_text).desired_width(f32::INFINITY));
                if let Some(err) = self.state.time_error {
                    ui.label(RichText::new(err.to_string()).color(theme::DANGER).size(11.0));
                }

                ui.add_space(6.0);
                ui.label(format!("Value ({}..{})", self.range.min, self.range.max));
                ui.add(TextEdit::singleline(&mut self.state.value_text).desired_width(f32::INFINITY));
                if let Some(err) = self.state.value_error {
                    ui.label(RichText::new(err.to_string()).color(theme::DANGER).size(11.0));
                }
                if self.show_percent {
                    if let Ok(value) = self.state.value_text.trim().parse::<i32>() {
                        let percent = (value as f32 / self.range.max as f32 * 100.0).round();
                        ui.label(
                            RichText::new(format!("≈ {percent:.0}%"))
                                .color(Color32::from_gray(140))
                                .size(11.0),
                        );
                    }
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        action = PickerAction::Cancel;
                    }
                    if ui.button("Save").clicked() {
                        if let Some((x, y)) = self.state.validate(self.range) {
                            action = PickerAction::Save { x, y };
                        }
                    }
                });
            });

        action
    }
}
