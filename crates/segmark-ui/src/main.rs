#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod dialogs;
mod helpers;
mod modules;
mod theme;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Without FFmpeg the editor still starts; opening a video reports the probe error.
    if let Err(e) = segmark_media::init() {
        log::error!("[main] {e:#}");
    }

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("Segmark")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 560.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Segmark",
        native_options,
        Box::new(|cc| Ok(Box::new(app::SegmarkApp::new(cc)))),
    )
}
