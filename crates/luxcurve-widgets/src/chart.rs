//! The interactive curve chart.
//!
//! Plots a curve's points over the schedule day [0, 1440] with a vertical
//! gradient fill and gradient-tinted markers, plus the derived offset curve.
//! The chart claims pointer gestures only when they begin on a point; drags
//! that start on empty plot area are reported as swipes for the screen-level
//! navigation to consume.

use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, vec2};
use luxcurve_core::gradient::{fill_stops, marker_stops, ColorStop};
use luxcurve_core::{project, CurveKind, CurvePoint, DAY_END};

use crate::{sizing, theme};

/// Hold duration that opens the point menu.
const LONG_PRESS_SECS: f64 = 0.5;
/// Minimum horizontal travel for a background drag to count as a swipe.
const SWIPE_MIN_DISTANCE: f32 = 60.0;
/// Widest fill column before subdivision, in points.
const FILL_COLUMN_WIDTH: f32 = 8.0;

/// Label the minutes-of-day axis. The schedule day is anchored at 04:00,
/// so x = 0 reads "04:00" and the day wraps through midnight.
pub fn format_minutes(minutes: i32) -> String {
    let total = (240 + minutes).rem_euclid(1440);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Gesture-level events produced by the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// The pointer is over a point; it becomes the active point.
    PointHovered { index: usize },
    /// A point was clicked (opens direct value entry).
    PointClicked { index: usize },
    /// Long-hold or secondary button on a point (opens the action menu).
    MenuRequested { index: usize },
    /// A drag gesture began on a point.
    DragStarted { index: usize },
    /// The dragged point moved; `raw` is in curve coordinates, clamped to
    /// the plot area. Quantization happens in the edit session.
    DragMoved { index: usize, raw: kurbo::Point },
    /// The drag was released.
    DragEnded { index: usize },
    /// A horizontal drag over empty chart area finished; positive is right.
    Swiped { delta_x: f32 },
}

/// Result of showing a [`CurveChart`].
pub struct ChartResponse {
    pub response: egui::Response,
    pub events: Vec<ChartEvent>,
}

/// Per-frame pointer state kept in egui memory.
#[derive(Debug, Clone, Copy, Default)]
struct ChartState {
    dragging: Option<usize>,
    swipe_origin: Option<Pos2>,
    press_started: Option<f64>,
    press_index: Option<usize>,
    menu_fired: bool,
}

/// The curve plot widget.
pub struct CurveChart<'a> {
    points: &'a [CurvePoint],
    kind: CurveKind,
    offset: i32,
    active_index: Option<usize>,
    expanded: bool,
}

impl<'a> CurveChart<'a> {
    /// Plot `points` (the session's display points) for a curve kind.
    pub fn new(points: &'a [CurvePoint], kind: CurveKind) -> Self {
        Self {
            points,
            kind,
            offset: 0,
            active_index: None,
            expanded: false,
        }
    }

    /// Scalar offset for the derived secondary curve.
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Highlight the active point.
    pub fn active(mut self, index: usize) -> Self {
        self.active_index = Some(index);
        self
    }

    /// Expanded charts fill the available height and use denser ticks.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Show the chart and report this frame's gesture events.
    pub fn show(self, ui: &mut Ui) -> ChartResponse {
        let width = ui.available_width();
        let height = if self.expanded {
            ui.available_height().max(200.0)
        } else {
            (width * 0.5).clamp(160.0, 320.0)
        };
        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::click_and_drag());

        // Plot area inside axis padding; the bottom strip holds tick labels.
        let plot = Rect::from_min_max(
            rect.min + vec2(10.0, 20.0),
            rect.max - vec2(10.0, 18.0),
        );

        let range = self.kind.value_range();
        let span = range.span() as f32;
        let to_screen = |p: CurvePoint| -> Pos2 {
            Pos2::new(
                plot.left() + p.x as f32 / DAY_END as f32 * plot.width(),
                plot.top() + (range.max - p.y) as f32 / span * plot.height(),
            )
        };
        let to_curve = |pos: Pos2| -> kurbo::Point {
            let clamped = pos.clamp(plot.min, plot.max);
            let x = (clamped.x - plot.left()) / plot.width() * DAY_END as f32;
            let y = range.max as f32 - (clamped.y - plot.top()) / plot.height() * span;
            kurbo::Point::new(f64::from(x), f64::from(y))
        };

        let screen_pts: Vec<Pos2> = self.points.iter().map(|&p| to_screen(p)).collect();
        let hit = |pos: Pos2| -> Option<usize> {
            screen_pts
                .iter()
                .enumerate()
                .map(|(i, sp)| (i, sp.distance(pos)))
                .filter(|&(_, d)| d <= sizing::POINT_HIT_RADIUS)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i)
        };

        let mut events = Vec::new();
        let mut state: ChartState = ui
            .ctx()
            .data_mut(|d| d.get_temp(response.id))
            .unwrap_or_default();

        if state.dragging.is_none() {
            if let Some(index) = response.hover_pos().and_then(hit) {
                events.push(ChartEvent::PointHovered { index });
            }
        }

        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(origin) = origin {
                match hit(origin) {
                    Some(index) => {
                        state.dragging = Some(index);
                        events.push(ChartEvent::DragStarted { index });
                    }
                    // Not ours: hand the gesture to swipe navigation.
                    None => state.swipe_origin = Some(origin),
                }
            }
        }

        if response.dragged() {
            if let (Some(index), Some(pos)) = (state.dragging, response.interact_pointer_pos()) {
                events.push(ChartEvent::DragMoved {
                    index,
                    raw: to_curve(pos),
                });
            }
        }

        if response.drag_stopped() {
            if let Some(index) = state.dragging.take() {
                events.push(ChartEvent::DragEnded { index });
            } else if let Some(origin) = state.swipe_origin.take() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let delta = pos - origin;
                    if delta.x.abs() >= SWIPE_MIN_DISTANCE && delta.x.abs() > 2.0 * delta.y.abs() {
                        events.push(ChartEvent::Swiped { delta_x: delta.x });
                    }
                }
            }
        }

        if response.clicked() {
            if let Some(index) = response.interact_pointer_pos().and_then(hit) {
                events.push(ChartEvent::PointClicked { index });
            }
        }
        if response.secondary_clicked() {
            if let Some(index) = response.interact_pointer_pos().and_then(hit) {
                events.push(ChartEvent::MenuRequested { index });
            }
        }

        // Long-hold on a point (touch path for the action menu). A hold that
        // turns into a drag no longer qualifies.
        if response.is_pointer_button_down_on() && state.dragging.is_none() {
            let now = ui.input(|i| i.time);
            match state.press_started {
                None => {
                    state.press_started = Some(now);
                    state.press_index = ui.input(|i| i.pointer.press_origin()).and_then(hit);
                }
                Some(started) => {
                    if !state.menu_fired && now - started >= LONG_PRESS_SECS {
                        if let Some(index) = state.press_index {
                            events.push(ChartEvent::MenuRequested { index });
                        }
                        state.menu_fired = true;
                    }
                }
            }
            ui.ctx().request_repaint_after(std::time::Duration::from_millis(100));
        } else if !response.is_pointer_button_down_on() {
            state.press_started = None;
            state.press_index = None;
            state.menu_fired = false;
        }

        ui.ctx().data_mut(|d| d.insert_temp(response.id, state));

        self.paint(ui, plot, rect, &screen_pts, to_screen);

        ChartResponse { response, events }
    }

    fn paint(
        &self,
        ui: &Ui,
        plot: Rect,
        rect: Rect,
        screen_pts: &[Pos2],
        to_screen: impl Fn(CurvePoint) -> Pos2,
    ) {
        let painter = ui.painter_at(rect);
        let range = self.kind.value_range();

        // Hour grid and tick labels.
        let step = if self.expanded { 180 } else { 360 };
        let mut minutes = 0;
        while minutes <= DAY_END {
            let x = plot.left() + minutes as f32 / DAY_END as f32 * plot.width();
            painter.line_segment(
                [Pos2::new(x, plot.top()), Pos2::new(x, plot.bottom())],
                Stroke::new(1.0, theme::GRID.gamma_multiply(0.5)),
            );
            painter.text(
                Pos2::new(x, rect.bottom() - 2.0),
                Align2::CENTER_BOTTOM,
                format_minutes(minutes),
                FontId::proportional(10.0),
                theme::TEXT_MUTED,
            );
            minutes += step;
        }

        let fill = sorted_stops(&fill_stops(self.kind));
        let markers = sorted_stops(&marker_stops(self.kind));
        let offset_along = |y: f32| (y - plot.top()) / plot.height();

        paint_fill(&painter, plot, screen_pts, &fill);

        // The primary curve, stroked segment-wise in the marker gradient.
        for seg in screen_pts.windows(2) {
            let mid = (seg[0].y + seg[1].y) / 2.0;
            painter.line_segment(
                [seg[0], seg[1]],
                Stroke::new(2.5, color_at(&markers, offset_along(mid))),
            );
        }

        // The derived offset curve; suppressed entirely at offset 0.
        if self.offset != 0 {
            let projected = project(self.points, self.offset, range);
            let offset_pts: Vec<Pos2> = projected.into_iter().map(&to_screen).collect();
            for seg in offset_pts.windows(2) {
                painter.line_segment([seg[0], seg[1]], Stroke::new(2.0, theme::DANGER));
            }
        }

        // Point markers, tinted by the gradient at their height.
        for (i, sp) in screen_pts.iter().enumerate() {
            let color = color_at(&markers, offset_along(sp.y));
            painter.circle_filled(*sp, sizing::POINT_RADIUS, color);
            painter.circle_stroke(*sp, sizing::POINT_RADIUS, Stroke::new(1.0, theme::BORDER));
            if self.active_index == Some(i) {
                painter.circle_stroke(*sp, sizing::POINT_RADIUS + 3.0, Stroke::new(2.0, theme::ACCENT));
            }
        }
    }
}

/// Stops sorted by offset, for interpolation.
fn sorted_stops(stops: &[ColorStop]) -> Vec<ColorStop> {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    sorted
}

/// Linear interpolation over a sorted stop list at `t` in [0, 1].
pub fn color_at(sorted: &[ColorStop], t: f32) -> Color32 {
    let to_color = |s: &ColorStop| {
        Color32::from_rgba_unmultiplied(s.red, s.green, s.blue, (s.alpha * 255.0).round() as u8)
    };
    let Some(first) = sorted.first() else {
        return Color32::TRANSPARENT;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return to_color(first);
    }
    for pair in sorted.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if t <= b.offset {
            let f = if b.offset > a.offset {
                (t - a.offset) / (b.offset - a.offset)
            } else {
                0.0
            };
            let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * f).round() as u8;
            let alpha = a.alpha + (b.alpha - a.alpha) * f;
            return Color32::from_rgba_unmultiplied(
                lerp(a.red, b.red),
                lerp(a.green, b.green),
                lerp(a.blue, b.blue),
                (alpha * 255.0).round() as u8,
            );
        }
    }
    to_color(sorted.last().unwrap())
}

/// Fill the area under the curve with the vertical stop gradient.
///
/// Segments are cut into narrow columns and each column into horizontal
/// bands at the stop lines, so vertex-color interpolation reproduces the
/// piecewise-linear gradient.
fn paint_fill(painter: &egui::Painter, plot: Rect, screen_pts: &[Pos2], sorted: &[ColorStop]) {
    let mut mesh = Mesh::default();
    let color = |y: f32| color_at(sorted, (y - plot.top()) / plot.height());

    for seg in screen_pts.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        if b.x <= a.x {
            continue;
        }
        let columns = (((b.x - a.x) / FILL_COLUMN_WIDTH).ceil() as usize).max(1);
        for c in 0..columns {
            let f0 = c as f32 / columns as f32;
            let f1 = (c + 1) as f32 / columns as f32;
            let xa = a.x + (b.x - a.x) * f0;
            let xb = a.x + (b.x - a.x) * f1;
            let ya = a.y + (b.y - a.y) * f0;
            let yb = a.y + (b.y - a.y) * f1;

            // Band boundaries: the (sloped) curve edge, each stop line
            // below it, then the plot bottom.
            let top_edge = ya.max(yb);
            let mut rows: Vec<f32> = sorted
                .iter()
                .map(|s| plot.top() + s.offset * plot.height())
                .filter(|&y| y > top_edge && y < plot.bottom())
                .collect();
            rows.push(plot.bottom());

            let (mut left, mut right) = (ya, yb);
            for row in rows {
                push_quad(
                    &mut mesh,
                    [
                        Pos2::new(xa, left),
                        Pos2::new(xb, right),
                        Pos2::new(xb, row),
                        Pos2::new(xa, row),
                    ],
                    [color(left), color(right), color(row), color(row)],
                );
                left = row;
                right = row;
            }
        }
    }

    painter.add(Shape::mesh(mesh));
}

fn push_quad(mesh: &mut Mesh, corners: [Pos2; 4], colors: [Color32; 4]) {
    let base = mesh.vertices.len() as u32;
    for (pos, color) in corners.into_iter().zip(colors) {
        mesh.colored_vertex(pos, color);
    }
    mesh.add_triangle(base, base + 1, base + 2);
    mesh.add_triangle(base, base + 2, base + 3);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_anchored_at_four() {
        assert_eq!(format_minutes(0), "04:00");
        assert_eq!(format_minutes(720), "16:00");
        assert_eq!(format_minutes(1440), "04:00");
        assert_eq!(format_minutes(1260), "01:00");
        assert_eq!(format_minutes(121), "06:01");
    }

    #[test]
    fn test_color_at_endpoints() {
        let stops = sorted_stops(&fill_stops(CurveKind::Saturation));
        assert_eq!(color_at(&stops, 0.0), Color32::from_rgba_unmultiplied(0, 0, 0, 179));
        assert_eq!(color_at(&stops, 1.0), Color32::from_rgba_unmultiplied(255, 255, 255, 179));
    }

    #[test]
    fn test_color_at_interpolates_midway() {
        let stops = sorted_stops(&fill_stops(CurveKind::Saturation));
        let mid = color_at(&stops, 0.5);
        assert_eq!(mid, Color32::from_rgba_unmultiplied(128, 128, 128, 179));
    }

    #[test]
    fn test_color_at_clamps_out_of_range() {
        let stops = sorted_stops(&marker_stops(CurveKind::Brightness));
        assert_eq!(color_at(&stops, -1.0), color_at(&stops, 0.0));
        assert_eq!(color_at(&stops, 2.0), color_at(&stops, 1.0));
    }
}
