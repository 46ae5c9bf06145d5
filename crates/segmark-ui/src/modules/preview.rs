// crates/segmark-ui/src/modules/preview.rs
//
// Monitor area. Frames are not decoded; the surface shows the clip name,
// the playhead time code and what a mark-out right now would commit.

use super::{EditorModule, PanelState};
use segmark_core::commands::EditorCommand;
use segmark_core::timecode;
use crate::helpers::format::file_label;
use crate::theme::{ACCENT, DARK_BG_0, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, IN_MARKER, PLAYHEAD};
use egui::{Align2, FontId, RichText, Sense, Stroke, Ui};

pub struct PreviewModule;

impl EditorModule for PreviewModule {
    fn name(&self) -> &str { "Preview" }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        let session = state.session;
        let vp      = session.viewport();

        ui.vertical(|ui| {
            // ── Header ───────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📺 Monitor").size(12.0).strong());
                        ui.separator();
                        ui.label(RichText::new(file_label(session.video_path())).size(11.0));
                        if session.is_dirty() {
                            ui.label(RichText::new("● unsaved").size(10.0).color(PLAYHEAD));
                        }
                    });
                });

            // ── Surface ──────────────────────────────────────────────────────
            let h = (ui.available_height() - 40.0).max(80.0);
            let (rect, response) = ui.allocate_exact_size(egui::vec2(ui.available_width(), h), Sense::click());
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 4.0, DARK_BG_0);
            painter.rect_stroke(rect, 4.0, Stroke::new(1.0, DARK_BORDER), egui::StrokeKind::Inside);

            if vp.duration() == 0 {
                painter.text(rect.center(), Align2::CENTER_CENTER,
                    "File ▸ Open Video…", FontId::proportional(14.0), DARK_TEXT_DIM);
            } else {
                painter.text(rect.center(), Align2::CENTER_CENTER,
                    timecode::format(vp.current_position()), FontId::monospace(32.0), ACCENT);
                painter.text(rect.center() + egui::vec2(0.0, 30.0), Align2::CENTER_TOP,
                    format!("/ {}", timecode::format(vp.duration())),
                    FontId::monospace(12.0), DARK_TEXT_DIM);
            }
            if response.clicked() {
                cmd.push(EditorCommand::TogglePlayback);
            }

            // ── Readouts ─────────────────────────────────────────────────────
            ui.horizontal(|ui| {
                match session.store().in_marker() {
                    Some(in_ms) => {
                        ui.label(RichText::new(format!("IN: {}", timecode::format_seconds(in_ms)))
                            .monospace().color(IN_MARKER));
                        let pos = vp.current_position();
                        if pos > in_ms {
                            let action = session.current_action().unwrap_or("?");
                            ui.label(RichText::new(format!(
                                "OUT → {} ({})", timecode::format_seconds(pos), action,
                            )).monospace().color(DARK_TEXT_DIM));
                        }
                    }
                    None => {
                        ui.label(RichText::new("IN: -").monospace().color(DARK_TEXT_DIM));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(seg) = session.store().selected() {
                        ui.label(RichText::new(format!(
                            "{}  {} - {}", seg.action,
                            timecode::format_seconds(seg.start),
                            timecode::format_seconds(seg.end),
                        )).monospace());
                    }
                });
            });
        });
    }
}
