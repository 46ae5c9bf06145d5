// crates/segmark-ui/src/modules/actions.rs
//
// Action pick list. Every catalog row is shown, headers and separators
// included; clicking one just sends its index and the session decides
// whether it is selectable.

use super::{EditorModule, PanelState};
use segmark_core::catalog::CatalogEntry;
use segmark_core::commands::EditorCommand;
use crate::theme::{segment_color, ACCENT, DARK_TEXT_DIM};
use egui::{RichText, Sense, Ui};

pub struct ActionModule;

impl EditorModule for ActionModule {
    fn name(&self) -> &str { "Actions" }

    fn ui(&mut self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>) {
        let catalog  = state.session.catalog();
        let selected = state.session.action_selection().index();

        ui.horizontal(|ui| {
            ui.label(RichText::new("🏷 Actions").size(12.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("📂 Load…").on_hover_text("Load a Category,Technique,Color CSV").clicked() {
                    cmd.push(EditorCommand::LoadCatalogDialog);
                }
            });
        });
        if catalog.is_fallback() {
            ui.label(RichText::new("Built-in labels").size(10.0).color(DARK_TEXT_DIM));
        }
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("action_list")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, entry) in catalog.entries().iter().enumerate() {
                    match entry {
                        CatalogEntry::Separator => {
                            ui.separator();
                        }
                        CatalogEntry::Header(_) => {
                            let text = RichText::new(entry.display_text()).strong().color(DARK_TEXT_DIM);
                            if ui.add(egui::Label::new(text).sense(Sense::click())).clicked() {
                                cmd.push(EditorCommand::ChooseAction(i));
                            }
                        }
                        CatalogEntry::Technique { color, .. } => {
                            let is_sel = selected == Some(i);
                            ui.horizontal(|ui| {
                                let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 16.0), Sense::hover());
                                ui.painter().rect_filled(swatch, 2.0, segment_color(*color));
                                let text = RichText::new(entry.display_text());
                                let text = if is_sel { text.color(ACCENT).strong() } else { text };
                                if ui.selectable_label(is_sel, text).clicked() {
                                    cmd.push(EditorCommand::ChooseAction(i));
                                }
                            });
                        }
                    }
                }
            });
    }
}
