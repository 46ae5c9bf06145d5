// crates/segmark-ui/src/app.rs
use std::path::{Path, PathBuf};

use segmark_core::catalog::ActionCatalog;
use segmark_core::commands::{EditorCommand, Notice, NoticeLevel, SessionEffect};
use segmark_core::config::{self, AppConfig};
use segmark_core::player::MediaPlayer;
use segmark_core::session::AnnotationSession;
use segmark_media::{probe_duration_ms, ClockPlayer};

use crate::dialogs;
use crate::theme::{configure_style, notice_color, ACCENT, DARK_TEXT_DIM};
use crate::modules::{
    EditorModule,
    PanelState,
    actions::ActionModule,
    preview::PreviewModule,
    segments::SegmentListModule,
    timeline::TimelineModule,
};
use eframe::egui;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct SegmarkApp {
    session:      AnnotationSession,
    player:       ClockPlayer,
    config:       AppConfig,
    config_path:  Option<PathBuf>,
    /// Latest message for the status bar; replaced by each new notice.
    notice:       Option<Notice>,
    actions:      ActionModule,
    preview:      PreviewModule,
    segments:     SegmentListModule,
    timeline:     TimelineModule,
    /// Commands emitted by panels each frame, processed after the UI pass
    pending_cmds: Vec<EditorCommand>,
    repaint:      bool,
}

impl SegmarkApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode so OS theme changes don't overwrite the palette.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let config_path = config::config_path();
        let config = config_path.as_deref().map(AppConfig::load).unwrap_or_default();
        log::info!("[app] starting, scale {:.1} px/s", config.scale);

        Self {
            session:      AnnotationSession::new(ActionCatalog::builtin(), config.scale),
            player:       ClockPlayer::default(),
            config,
            config_path,
            notice:       None,
            actions:      ActionModule,
            preview:      PreviewModule,
            segments:     SegmentListModule::new(),
            timeline:     TimelineModule::new(),
            pending_cmds: Vec::new(),
            repaint:      false,
        }
    }

    fn start_dir(&self) -> Option<PathBuf> {
        self.config.start_directory()
    }

    fn process_command(&mut self, cmd: EditorCommand) {
        match cmd {
            // ── Playback ─────────────────────────────────────────────────────
            EditorCommand::Play           => self.player.play(),
            EditorCommand::Pause          => self.player.pause(),
            EditorCommand::TogglePlayback => self.player.toggle(),

            // ── Files ────────────────────────────────────────────────────────
            EditorCommand::OpenVideoDialog => {
                if let Some(path) = dialogs::pick_video(self.start_dir().as_deref()) {
                    self.open_video(&path);
                }
            }
            EditorCommand::OpenProjectDialog => {
                if let Some(path) = dialogs::pick_project(self.start_dir().as_deref()) {
                    self.open_project(&path);
                }
            }
            EditorCommand::SaveProject => match self.session.project_path().map(Path::to_path_buf) {
                Some(path) => self.save_project(&path),
                None       => self.process_command(EditorCommand::SaveProjectAs),
            },
            EditorCommand::SaveProjectAs => {
                let suggested = self.session.project_path().map(Path::to_path_buf);
                if let Some(path) = dialogs::save_project(self.start_dir().as_deref(), suggested.as_deref()) {
                    self.save_project(&path);
                }
            }
            EditorCommand::LoadCatalogDialog => {
                if let Some(path) = dialogs::pick_catalog(self.start_dir().as_deref()) {
                    let effects = self.session.load_catalog(&path);
                    self.apply_effects(effects);
                    self.config.remember_file(&path);
                }
            }
            EditorCommand::ExportLogDialog => {
                if let Some(path) = dialogs::pick_export_log(self.start_dir().as_deref()) {
                    let effects = self.session.export_to_log(&path);
                    self.apply_effects(effects);
                }
            }
            EditorCommand::DismissNotice => {
                self.notice = None;
            }

            // ── Everything else belongs to the session ───────────────────────
            other => {
                let effects = self.session.apply(other);
                self.apply_effects(effects);
            }
        }
    }

    fn apply_effects(&mut self, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::SeekRequested(ms) => self.player.seek(ms),
                SessionEffect::SegmentSelected(i) => log::debug!("[app] segment {i} selected"),
                SessionEffect::Notice(notice) => {
                    match notice.level {
                        NoticeLevel::Info    => log::info!("[notice] {}", notice.message),
                        NoticeLevel::Warning => log::warn!("[notice] {}", notice.message),
                        NoticeLevel::Error   => log::error!("[notice] {}", notice.message),
                    }
                    self.notice = Some(notice);
                }
                SessionEffect::SelectionCleared
                | SessionEffect::SegmentsChanged
                | SessionEffect::InMarkerChanged(_)
                | SessionEffect::ViewChanged => {}
            }
            self.repaint = true;
        }
    }

    fn open_video(&mut self, path: &Path) {
        let duration = match probe_duration_ms(path) {
            Ok(d)  => d,
            Err(e) => {
                log::error!("[app] {e:#}");
                self.notice = Some(Notice::error(format!("Cannot open video: {e}")));
                return;
            }
        };
        self.player.load(duration);
        let effects = self.session.open_video(path, duration);
        self.apply_effects(effects);
        self.config.remember_file(path);
    }

    fn open_project(&mut self, path: &Path) {
        let (effects, video) = self.session.open_project(path);
        // The session has let go of the previous video; so does the player.
        self.player.load(0);
        self.apply_effects(effects);
        self.config.remember_file(path);

        let Some(video) = video else { return };
        match probe_duration_ms(&video) {
            Ok(duration) => {
                self.player.load(duration);
                let effects = self.session.attach_video(&video, duration);
                self.apply_effects(effects);
            }
            Err(e) => {
                log::error!("[app] {e:#}");
                self.notice = Some(Notice::warning(format!("Project loaded, video unreadable: {e}")));
            }
        }
    }

    fn save_project(&mut self, path: &Path) {
        let effects = self.session.save_project(path);
        self.apply_effects(effects);
        self.config.remember_file(path);
    }

    fn global_shortcuts(&mut self, ctx: &egui::Context) {
        let (save, open) = ctx.input(|i| (
            i.modifiers.command && i.key_pressed(egui::Key::S),
            i.modifiers.command && i.key_pressed(egui::Key::O),
        ));
        if save { self.pending_cmds.push(EditorCommand::SaveProject); }
        if open { self.pending_cmds.push(EditorCommand::OpenVideoDialog); }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        let cmd = &mut self.pending_cmds;
        egui::menu::bar(ui, |ui| {
            ui.label(egui::RichText::new("▮▯ Segmark").strong().size(14.0).color(ACCENT));
            ui.separator();
            ui.menu_button("File", |ui| {
                let mut item = |ui: &mut egui::Ui, label: &str, c: EditorCommand| {
                    if ui.button(label).clicked() {
                        cmd.push(c);
                        ui.close_menu();
                    }
                };
                item(ui, "Open Video…   Ctrl+O", EditorCommand::OpenVideoDialog);
                item(ui, "Open Project…", EditorCommand::OpenProjectDialog);
                ui.separator();
                item(ui, "Save Project   Ctrl+S", EditorCommand::SaveProject);
                item(ui, "Save Project As…", EditorCommand::SaveProjectAs);
                ui.separator();
                item(ui, "Load Action Catalog…", EditorCommand::LoadCatalogDialog);
                item(ui, "Export to Annotations Log…", EditorCommand::ExportLogDialog);
            });
        });
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            match &self.notice {
                Some(n) => {
                    ui.label(egui::RichText::new(&n.message).size(11.0).color(notice_color(n.level)));
                    if ui.small_button("✖").clicked() {
                        self.pending_cmds.push(EditorCommand::DismissNotice);
                    }
                }
                None => {
                    ui.label(
                        egui::RichText::new("Space=Play  I=Mark IN  O=Mark OUT  Esc=Cancel IN  Del=Remove  +/-=Zoom")
                            .size(10.0).color(DARK_TEXT_DIM),
                    );
                }
            }
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for SegmarkApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.scale = self.session.viewport().scale();
        if let Some(path) = &self.config_path {
            self.config.save(path);
        }
        if self.session.is_dirty() {
            log::warn!("[app] exiting with unsaved segments");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.global_shortcuts(ctx);

        egui::TopBottomPanel::top("menu_panel")
            .exact_height(30.0)
            .show(ctx, |ui| self.menu_bar(ui));

        egui::TopBottomPanel::bottom("status_panel")
            .exact_height(24.0)
            .show(ctx, |ui| self.status_bar(ui));

        let state = PanelState {
            session:    &self.session,
            is_playing: self.player.is_playing(),
        };

        egui::TopBottomPanel::bottom("timeline_panel")
            .resizable(false)
            .min_height(150.0)
            .show(ctx, |ui| {
                self.timeline.ui(ui, &state, &mut self.pending_cmds);
            });

        egui::SidePanel::left("actions_panel")
            .resizable(true)
            .default_width(200.0)
            .min_width(150.0)
            .show(ctx, |ui| {
                self.actions.ui(ui, &state, &mut self.pending_cmds);
            });

        egui::SidePanel::right("segments_panel")
            .resizable(true)
            .default_width(340.0)
            .min_width(260.0)
            .show(ctx, |ui| {
                self.segments.ui(ui, &state, &mut self.pending_cmds);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.ui(ui, &state, &mut self.pending_cmds);
        });

        // ── Process commands emitted by panels this frame ─────────────────────
        let cmds: Vec<EditorCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // ── Playback clock ────────────────────────────────────────────────────
        let dt = ctx.input(|i| i.stable_dt as f64);
        if let Some(ms) = self.player.advance(dt) {
            let effects = self.session.handle_position_changed(ms);
            self.apply_effects(effects);
        }
        if self.player.is_playing() || std::mem::take(&mut self.repaint) {
            ctx.request_repaint();
        }
    }
}
