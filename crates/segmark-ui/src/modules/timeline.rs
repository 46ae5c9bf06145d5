// crates/segmark-ui/src/modules/timeline.rs
use super::{EditorModule, PanelState};
use std::collections::HashSet;
use segmark_core::catalog::DEFAULT_ACTION_COLOR;
use segmark_core::commands::EditorCommand;
use segmark_core::timecode;
use crate::helpers::format::fit_label;
use crate::theme::{
    segment_color, ACCENT, DARK_BG_0, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, IN_MARKER, OVERLAP,
    PLAYHEAD,
};
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

const RULER_H:   f32 = 24.0;
const LANE_H:    f32 = 56.0;
const ZOOM_STEP: f64 = 1.25;

pub struct TimelineModule {
    /// A primary press started on the strip and has not been released yet.
    pressing:    bool,
    /// Screen x of the last PointerDrag sent. A held but motionless button
    /// sends nothing.
    last_drag_x: Option<f32>,
}

impl TimelineModule {
    pub fn new() -> Self {
        Self { pressing: false, last_drag_x: None }
    }
}

/// Standard toolbar button, consistent height.
fn tool_btn(label: impl Into<egui::WidgetText>) -> egui::Button<'static> {
    egui::Button::new(label).min_size(egui::vec2(0.0, 26.0))
}

/// Mark buttons get a tint so IN/OUT read as the primary actions.
fn mark_btn(label: impl Into<egui::WidgetText>) -> egui::Button<'static> {
    egui::Button::new(label)
        .fill(Color32::from_rgb(24, 70, 40))
        .stroke(Stroke::new(1.0, IN_MARKER))
        .min_size(egui::vec2(0.0, 26.0))
}

impl TimelineModule {
    fn shortcuts(&self, ui: &Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        // Text fields in the segment list own the keyboard while focused.
        if ui.ctx().wants_keyboard_input() {
            return;
        }
        ui.input(|i| {
            // Ctrl/Cmd combos are app-level (save, open).
            if i.modifiers.command {
                return;
            }
            if i.key_pressed(egui::Key::I)      { cmd.push(EditorCommand::MarkIn); }
            if i.key_pressed(egui::Key::O)      { cmd.push(EditorCommand::MarkOut); }
            if i.key_pressed(egui::Key::Escape) { cmd.push(EditorCommand::CancelIn); }
            if i.key_pressed(egui::Key::Space)  { cmd.push(EditorCommand::TogglePlayback); }
            if i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace) {
                if let Some(sel) = state.session.store().selected_index() {
                    cmd.push(EditorCommand::RemoveSegment(sel));
                }
            }
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                cmd.push(EditorCommand::ZoomBy(ZOOM_STEP));
            }
            if i.key_pressed(egui::Key::Minus) {
                cmd.push(EditorCommand::ZoomBy(1.0 / ZOOM_STEP));
            }
        });
    }

    fn toolbar(&self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        let session = state.session;
        let store   = session.store();
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.group(|ui| {
                        if ui.add(tool_btn(if state.is_playing { "⏸" } else { "▶" }))
                            .on_hover_text("Play / pause  [Space]")
                            .clicked()
                        {
                            cmd.push(EditorCommand::TogglePlayback);
                        }
                    });

                    ui.group(|ui| {
                        if ui.add(mark_btn("⇤ Mark IN")).on_hover_text("Mark IN at playhead  [I]").clicked() {
                            cmd.push(EditorCommand::MarkIn);
                        }
                        if ui.add_enabled(store.in_marker().is_some(), mark_btn("⇥ Mark OUT"))
                            .on_hover_text("Commit IN..playhead as a segment  [O]")
                            .on_disabled_hover_text("Mark an IN point first")
                            .clicked()
                        {
                            cmd.push(EditorCommand::MarkOut);
                        }
                        if ui.add_enabled(store.in_marker().is_some(), tool_btn("✖ Cancel IN"))
                            .on_hover_text("Discard the IN point  [Esc]")
                            .clicked()
                        {
                            cmd.push(EditorCommand::CancelIn);
                        }
                    });

                    ui.group(|ui| {
                        if ui.add_enabled(store.selected_index().is_some(), tool_btn("🗑 Delete"))
                            .on_hover_text("Remove the selected segment  [Del]")
                            .on_disabled_hover_text("Select a segment first")
                            .clicked()
                        {
                            if let Some(sel) = store.selected_index() {
                                cmd.push(EditorCommand::RemoveSegment(sel));
                            }
                        }
                    });

                    let action = session.current_action().unwrap_or("none");
                    ui.label(RichText::new(format!("Action: {action}")).size(11.0).color(DARK_TEXT_DIM));

                    // ── Right side: zoom ──────────────────────────────────────
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(tool_btn("🔍+")).on_hover_text("Zoom in  [+]").clicked() {
                            cmd.push(EditorCommand::ZoomBy(ZOOM_STEP));
                        }
                        if ui.add(tool_btn("🔍-")).on_hover_text("Zoom out  [-]").clicked() {
                            cmd.push(EditorCommand::ZoomBy(1.0 / ZOOM_STEP));
                        }
                        ui.label(format!("{:.1} px/s", session.viewport().scale()));
                    });
                });
            });
    }

    fn pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response, cmd: &mut Vec<EditorCommand>) {
        let (pressed, down, released, pos) = ui.input(|i| (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        ));
        let strip_x = |p: Pos2| (p.x - rect.min.x) as f64;

        if pressed && response.hovered() {
            if let Some(p) = pos {
                cmd.push(EditorCommand::PointerDown(strip_x(p)));
                self.pressing    = true;
                self.last_drag_x = Some(p.x);
            }
        } else if self.pressing && down {
            if let Some(p) = pos {
                if self.last_drag_x != Some(p.x) {
                    cmd.push(EditorCommand::PointerDrag(strip_x(p)));
                    self.last_drag_x = Some(p.x);
                }
            }
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        }

        if released && self.pressing {
            cmd.push(EditorCommand::PointerUp);
            self.pressing    = false;
            self.last_drag_x = None;
        }
    }
}

impl EditorModule for TimelineModule {
    fn name(&self) -> &str { "Timeline" }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        let session = state.session;
        let store   = session.store();
        let vp      = session.viewport();

        self.shortcuts(ui, state, cmd);

        ui.vertical(|ui| {
            self.toolbar(ui, state, cmd);
            ui.separator();

            let width = ui.available_width();
            if (vp.viewport_width() - width as f64).abs() > 0.5 {
                cmd.push(EditorCommand::SetViewportWidth(width as f64));
            }

            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(width, RULER_H + LANE_H), Sense::click_and_drag());
            self.pointer(ui, rect, &response, cmd);

            // Wheel: ctrl/pinch zooms around the playhead, plain wheel scrolls.
            if response.hovered() {
                let (zoom, scroll) = ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta));
                if zoom != 1.0 {
                    cmd.push(EditorCommand::ZoomBy(zoom as f64));
                } else {
                    let d = if scroll.x != 0.0 { scroll.x } else { scroll.y };
                    if d != 0.0 {
                        cmd.push(EditorCommand::SetScroll(vp.scroll_offset() - d as f64));
                    }
                }
            }

            let painter = ui.painter_at(rect);
            let sx = |x: f64| rect.min.x + x as f32;
            let ruler = Rect::from_min_size(rect.min, egui::vec2(width, RULER_H));
            let lane  = Rect::from_min_max(Pos2::new(rect.min.x, ruler.max.y), rect.max);

            painter.rect_filled(rect, 0.0, DARK_BG_0);
            painter.rect_filled(ruler, 0.0, Color32::from_rgb(16, 16, 20));

            if vp.duration() == 0 {
                painter.text(lane.center(), Align2::CENTER_CENTER,
                    "Open a video to start annotating", FontId::proportional(12.0), DARK_TEXT_DIM);
                return;
            }

            // Ruler
            for tick in vp.ruler_ticks() {
                let x      = sx(tick.x);
                let tick_h = if tick.major { RULER_H } else { RULER_H * 0.4 };
                painter.line_segment(
                    [Pos2::new(x, ruler.max.y - tick_h), Pos2::new(x, ruler.max.y)],
                    Stroke::new(1.0, Color32::from_gray(60)));
                if tick.major {
                    painter.text(Pos2::new(x + 3.0, ruler.min.y + 3.0), Align2::LEFT_TOP,
                        timecode::format_ruler(tick.time_ms), FontId::monospace(10.0),
                        Color32::from_gray(140));
                }
            }

            // Pending IN..playhead range
            if let Some(in_ms) = store.in_marker() {
                let x_in = sx(vp.pixel_for(in_ms));
                let x_ph = sx(vp.pixel_for(vp.current_position()));
                if x_ph > x_in {
                    painter.rect_filled(
                        Rect::from_min_max(Pos2::new(x_in, lane.min.y), Pos2::new(x_ph, lane.max.y)),
                        0.0, IN_MARKER.linear_multiply(0.12));
                }
            }

            // Segments
            let overlapping: HashSet<usize> = store.overlapping_pairs()
                .into_iter()
                .flat_map(|(a, b)| [a, b])
                .collect();
            for (i, seg) in store.segments().iter().enumerate() {
                let (x0, x1) = vp.pixel_range_for(seg);
                let (x0, x1) = (sx(x0), sx(x1).max(sx(x0) + 2.0));
                if x1 < rect.min.x || x0 > rect.max.x {
                    continue;
                }
                let seg_rect = Rect::from_min_max(
                    Pos2::new(x0, lane.min.y + 4.0), Pos2::new(x1, lane.max.y - 4.0));
                let fill = segment_color(seg.color.unwrap_or(DEFAULT_ACTION_COLOR));
                painter.rect_filled(seg_rect, 3.0, fill.linear_multiply(0.85));

                let selected = store.selected_index() == Some(i);
                let (w, c) = if selected { (2.0, ACCENT) }
                    else if overlapping.contains(&i) { (1.5, OVERLAP) }
                    else { (1.0, DARK_BORDER) };
                painter.rect_stroke(seg_rect, 3.0, Stroke::new(w, c), egui::StrokeKind::Inside);

                let seg_w = seg_rect.width();
                if seg_w > 24.0 {
                    painter.text(seg_rect.min + Vec2::new(4.0, 4.0), Align2::LEFT_TOP,
                        fit_label(&seg.action, seg_w - 8.0), FontId::proportional(11.0),
                        Color32::from_rgba_unmultiplied(255, 255, 255, 230));
                }
                if seg_w > 60.0 {
                    painter.text(seg_rect.right_bottom() - Vec2::new(4.0, 4.0), Align2::RIGHT_BOTTOM,
                        timecode::format_seconds(seg.duration()), FontId::monospace(9.0),
                        Color32::from_rgba_unmultiplied(255, 255, 255, 150));
                }
            }

            // IN marker
            if let Some(in_ms) = store.in_marker() {
                let x = sx(vp.pixel_for(in_ms));
                painter.line_segment([Pos2::new(x, ruler.min.y), Pos2::new(x, lane.max.y)],
                    Stroke::new(2.0, IN_MARKER));
                painter.text(Pos2::new(x + 3.0, lane.min.y + 2.0), Align2::LEFT_TOP, "IN",
                    FontId::monospace(9.0), IN_MARKER);
            }

            // Playhead
            let ph_x = sx(vp.pixel_for(vp.current_position()));
            painter.line_segment(
                [Pos2::new(ph_x + 1.0, rect.min.y), Pos2::new(ph_x + 1.0, rect.max.y)],
                Stroke::new(1.0, Color32::from_black_alpha(60)));
            painter.line_segment(
                [Pos2::new(ph_x, rect.min.y), Pos2::new(ph_x, rect.max.y)],
                Stroke::new(2.0, PLAYHEAD));
            painter.add(egui::Shape::convex_polygon(
                vec![Pos2::new(ph_x - 6.0, rect.min.y),
                     Pos2::new(ph_x + 6.0, rect.min.y),
                     Pos2::new(ph_x, rect.min.y + 10.0)],
                PLAYHEAD, Stroke::NONE));

            // Hover readout
            if let Some(p) = response.hover_pos() {
                let x = (p.x - rect.min.x) as f64;
                let text = match vp.segment_at_pixel(x, store).and_then(|i| store.get(i)) {
                    Some(seg) => format!("{}  {} - {}", seg.action,
                        timecode::format(seg.start), timecode::format(seg.end)),
                    None => timecode::format(vp.time_at_pixel(x)),
                };
                response.on_hover_text(text);
            }

            // Horizontal scroll
            let max = vp.max_scroll();
            if max > 0.0 {
                let mut offset = vp.scroll_offset();
                ui.spacing_mut().slider_width = width;
                if ui.add(egui::Slider::new(&mut offset, 0.0..=max).show_value(false)).changed() {
                    cmd.push(EditorCommand::SetScroll(offset));
                }
            }
        });
    }
}
