// crates/segmark-ui/src/dialogs.rs
//
// Native file pickers. Each returns None when the user cancels.

use std::path::{Path, PathBuf};
use rfd::FileDialog;
use segmark_core::persistence::{PROJECT_EXTENSION, VIDEO_EXTENSIONS};

fn dialog(start: Option<&Path>) -> FileDialog {
    match start {
        Some(dir) => FileDialog::new().set_directory(dir),
        None      => FileDialog::new(),
    }
}

pub fn pick_video(start: Option<&Path>) -> Option<PathBuf> {
    dialog(start)
        .set_title("Open video")
        .add_filter("Video", &VIDEO_EXTENSIONS)
        .pick_file()
}

pub fn pick_project(start: Option<&Path>) -> Option<PathBuf> {
    dialog(start)
        .set_title("Open project")
        .add_filter("Segment project", &[PROJECT_EXTENSION])
        .pick_file()
}

/// Save dialog pre-filled with `suggested` (usually the video's sibling csv).
pub fn save_project(start: Option<&Path>, suggested: Option<&Path>) -> Option<PathBuf> {
    let mut d = dialog(start)
        .set_title("Save project")
        .add_filter("Segment project", &[PROJECT_EXTENSION]);
    if let Some(name) = suggested.and_then(|p| p.file_name()) {
        d = d.set_file_name(name.to_string_lossy());
    }
    d.save_file()
}

pub fn pick_catalog(start: Option<&Path>) -> Option<PathBuf> {
    dialog(start)
        .set_title("Load action catalog")
        .add_filter("CSV", &["csv"])
        .pick_file()
}

pub fn pick_export_log(start: Option<&Path>) -> Option<PathBuf> {
    dialog(start)
        .set_title("Append to annotations log")
        .set_file_name("annotations.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
}
