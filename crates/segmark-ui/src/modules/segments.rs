// crates/segmark-ui/src/modules/segments.rs
//
// Segment list plus an inspector for the selected segment.
//
// Time-code fields keep a draft while focused and commit on focus loss, so
// half-typed values never reach the session. The inspector's drag values
// send milliseconds directly.

use super::{EditorModule, PanelState};
use std::collections::HashMap;
use segmark_core::catalog::DEFAULT_ACTION_COLOR;
use segmark_core::commands::{EditorCommand, SegmentField};
use segmark_core::segment::Segment;
use segmark_core::timecode;
use crate::theme::{segment_color, ACCENT, DARK_BG_2, DARK_TEXT_DIM, OVERLAP};
use egui::{RichText, Sense, Ui};

pub struct SegmentListModule {
    drafts:    HashMap<(usize, SegmentField), String>,
    /// Row count the drafts were typed against.
    draft_len: usize,
}

impl SegmentListModule {
    pub fn new() -> Self {
        Self { drafts: HashMap::new(), draft_len: 0 }
    }

    /// Drafts are keyed by row, so any insert or removal invalidates them.
    fn sync_drafts(&mut self, len: usize) {
        if len != self.draft_len {
            self.drafts.clear();
            self.draft_len = len;
        }
    }

    fn time_field(
        &mut self,
        ui:    &mut Ui,
        index: usize,
        field: SegmentField,
        value: u64,
        cmd:   &mut Vec<EditorCommand>,
    ) {
        let key = (index, field);
        let mut text = self.drafts.get(&key).cloned().unwrap_or_else(|| timecode::format(value));
        let resp = ui.add(egui::TextEdit::singleline(&mut text)
            .id_salt(("segment_time", key))
            .desired_width(92.0)
            .font(egui::TextStyle::Monospace));
        if resp.changed() {
            self.drafts.insert(key, text);
        }
        if resp.lost_focus() {
            if let Some(text) = self.drafts.remove(&key) {
                cmd.push(EditorCommand::SetSegmentTimeText { index, field, text });
            }
        }
    }

    fn inspector(&self, ui: &mut Ui, state: &PanelState<'_>, index: usize, seg: &Segment, cmd: &mut Vec<EditorCommand>) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.label(RichText::new(format!("Segment #{}", index + 1)).strong());
                egui::Grid::new("segment_inspector").num_columns(2).show(ui, |ui| {
                    let mut start = seg.start;
                    ui.label("Start (ms)");
                    if ui.add(egui::DragValue::new(&mut start).speed(10.0).range(0..=seg.end.saturating_sub(1)))
                        .changed()
                    {
                        cmd.push(EditorCommand::SetSegmentTime { index, field: SegmentField::Start, ms: start });
                    }
                    ui.end_row();

                    let mut end = seg.end;
                    ui.label("End (ms)");
                    let max = state.session.viewport().duration().max(seg.end);
                    if ui.add(egui::DragValue::new(&mut end).speed(10.0).range(seg.start + 1..=max))
                        .changed()
                    {
                        cmd.push(EditorCommand::SetSegmentTime { index, field: SegmentField::End, ms: end });
                    }
                    ui.end_row();

                    ui.label("Duration");
                    ui.label(timecode::format_seconds(seg.duration()));
                    ui.end_row();

                    ui.label("Action");
                    let mut chosen: Option<String> = None;
                    egui::ComboBox::from_id_salt("inspector_action")
                        .selected_text(seg.action.as_str())
                        .show_ui(ui, |ui| {
                            for label in state.session.catalog().labels() {
                                if ui.selectable_label(label == seg.action, label).clicked() {
                                    chosen = Some(label.to_string());
                                }
                            }
                        });
                    if let Some(label) = chosen.filter(|l| *l != seg.action) {
                        cmd.push(EditorCommand::SetSegmentAction { index, label });
                    }
                    ui.end_row();
                });
            });
    }
}

impl EditorModule for SegmentListModule {
    fn name(&self) -> &str { "Segments" }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        let store = state.session.store();

        ui.horizontal(|ui| {
            ui.label(RichText::new("🎞 Segments").size(12.0).strong());
            ui.label(RichText::new(format!("{}", store.len())).size(11.0).color(DARK_TEXT_DIM));
        });

        let overlaps = store.overlapping_pairs();
        if !overlaps.is_empty() {
            let pairs: Vec<String> = overlaps.iter().map(|(a, b)| format!("#{}/#{}", a + 1, b + 1)).collect();
            ui.label(RichText::new(format!("⚠ Overlapping: {}", pairs.join(", "))).size(10.0).color(OVERLAP));
        }

        self.sync_drafts(store.len());

        if let Some(sel) = store.selected_index() {
            if let Some(seg) = store.get(sel) {
                self.inspector(ui, state, sel, seg, cmd);
            }
        }
        ui.separator();

        if store.is_empty() {
            ui.label(RichText::new("Mark IN [I] and OUT [O] to add a segment").size(11.0).weak());
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("segment_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, seg) in store.segments().iter().enumerate() {
                    let selected = store.selected_index() == Some(i);
                    ui.horizontal(|ui| {
                        let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 18.0), Sense::hover());
                        ui.painter().rect_filled(swatch, 2.0,
                            segment_color(seg.color.unwrap_or(DEFAULT_ACTION_COLOR)));

                        let name = RichText::new(format!("{:>2}. {}", i + 1, seg.action));
                        let name = if selected { name.color(ACCENT).strong() } else { name };
                        if ui.selectable_label(selected, name).clicked() {
                            if selected {
                                cmd.push(EditorCommand::ClearSelection);
                            } else {
                                cmd.push(EditorCommand::SelectSegment(i));
                            }
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✖").on_hover_text("Remove segment").clicked() {
                                cmd.push(EditorCommand::RemoveSegment(i));
                            }
                            self.time_field(ui, i, SegmentField::End, seg.end, cmd);
                            ui.label("→");
                            self.time_field(ui, i, SegmentField::Start, seg.start, cmd);
                        });
                    });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_drop_when_rows_shift() {
        let mut list = SegmentListModule::new();
        list.sync_drafts(3);
        list.drafts.insert((2, SegmentField::Start), "00:00:09".into());
        list.sync_drafts(3);
        assert_eq!(list.drafts.len(), 1);
        list.sync_drafts(2);
        assert!(list.drafts.is_empty());
    }
}
