// crates/segmark-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing EditorModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field and one show() call in app.rs

pub mod actions;
pub mod preview;
pub mod segments;
pub mod timeline;

use egui::Ui;
use segmark_core::commands::EditorCommand;
use segmark_core::session::AnnotationSession;

/// Read-only view handed to every panel for one frame.
pub struct PanelState<'a> {
    pub session:    &'a AnnotationSession,
    pub is_playing: bool,
}

/// Every editor panel implements this trait.
/// Panels read the session and emit commands; they never mutate it directly.
pub trait EditorModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &PanelState<'_>, cmd: &mut Vec<EditorCommand>);
}
