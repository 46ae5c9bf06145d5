// crates/segmark-core/src/session.rs
//
// AnnotationSession owns the whole editable state of one open video: the
// segment store, the action catalog and current pick, and the timeline
// viewport. Every handler returns the effects the host has to carry out
// (seek the player, redraw, show a notice) instead of calling back into it.
//
// Handlers never panic on bad input. Rejected edits leave state unchanged
// and come back as a Warning notice.

use std::path::{Path, PathBuf};

use crate::catalog::{ActionCatalog, ActionSelection};
use crate::commands::{EditorCommand, SegmentField, SessionEffect};
use crate::error::ValidationError;
use crate::persistence;
use crate::store::{SegmentStore, StoreEvent};
use crate::timecode;
use crate::viewport::{TimelineViewport, DEFAULT_SCALE};

pub type Effects = Vec<SessionEffect>;

#[derive(Debug, Clone)]
pub struct AnnotationSession {
    store:        SegmentStore,
    catalog:      ActionCatalog,
    action:       ActionSelection,
    viewport:     TimelineViewport,
    video_path:   Option<PathBuf>,
    project_path: Option<PathBuf>,
    /// A primary press is in progress on the timeline.
    dragging:     bool,
    /// Segments changed since the last load or save.
    dirty:        bool,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new(ActionCatalog::builtin(), DEFAULT_SCALE)
    }
}

impl From<StoreEvent> for SessionEffect {
    fn from(event: StoreEvent) -> Self {
        match event {
            StoreEvent::Selected(i)      => SessionEffect::SegmentSelected(i),
            StoreEvent::SelectionCleared => SessionEffect::SelectionCleared,
        }
    }
}

impl AnnotationSession {
    pub fn new(catalog: ActionCatalog, scale: f64) -> Self {
        let action = ActionSelection::first_of(&catalog);
        Self {
            store:        SegmentStore::new(),
            catalog,
            action,
            viewport:     TimelineViewport::new(0, scale),
            video_path:   None,
            project_path: None,
            dragging:     false,
            dirty:        false,
        }
    }

    // ── Read access ──────────────────────────────────────────────────────────

    pub fn store(&self) -> &SegmentStore { &self.store }
    pub fn catalog(&self) -> &ActionCatalog { &self.catalog }
    pub fn action_selection(&self) -> ActionSelection { self.action }
    pub fn viewport(&self) -> &TimelineViewport { &self.viewport }
    pub fn video_path(&self) -> Option<&Path> { self.video_path.as_deref() }
    pub fn project_path(&self) -> Option<&Path> { self.project_path.as_deref() }
    pub fn is_dragging(&self) -> bool { self.dragging }
    pub fn is_dirty(&self) -> bool { self.dirty }

    pub fn position(&self) -> u64 {
        self.viewport.current_position()
    }

    /// Label new segments get on mark-out.
    pub fn current_action(&self) -> Option<&str> {
        self.action.label(&self.catalog)
    }

    // ── Command routing ──────────────────────────────────────────────────────

    /// Route a session-scoped command to its handler. Host-scoped commands
    /// produce no effects here.
    pub fn apply(&mut self, cmd: EditorCommand) -> Effects {
        match cmd {
            EditorCommand::PointerDown(x)  => self.handle_pointer_down(x),
            EditorCommand::PointerDrag(x)  => self.handle_pointer_drag(x),
            EditorCommand::PointerUp       => self.handle_pointer_up(),
            EditorCommand::MarkIn          => self.mark_in(),
            EditorCommand::MarkOut         => self.mark_out(),
            EditorCommand::CancelIn        => self.cancel_in(),
            EditorCommand::SelectSegment(i) => self.select_segment(i),
            EditorCommand::ClearSelection  => self.clear_selection(),
            EditorCommand::RemoveSegment(i) => self.remove_segment(i),
            EditorCommand::SetSegmentTime { index, field, ms } => {
                self.handle_value_change(index, field, ms)
            }
            EditorCommand::SetSegmentTimeText { index, field, text } => {
                self.handle_time_text(index, field, &text)
            }
            EditorCommand::SetSegmentAction { index, label } => {
                self.set_segment_action(index, &label)
            }
            EditorCommand::ChooseAction(i)      => self.choose_action(i),
            EditorCommand::SetScale(s)          => self.set_scale(s),
            EditorCommand::ZoomBy(f)            => self.zoom_by(f),
            EditorCommand::SetScroll(px)        => self.set_scroll(px),
            EditorCommand::SetViewportWidth(px) => self.set_viewport_width(px),
            host => {
                log::debug!("[session] {host:?} is handled by the host");
                Vec::new()
            }
        }
    }

    // ── Pointer ──────────────────────────────────────────────────────────────

    /// Primary press: always seek; select the segment under the pointer or
    /// clear the selection.
    pub fn handle_pointer_down(&mut self, x: f64) -> Effects {
        self.dragging = true;
        let t = self.viewport.time_at_pixel(x);
        self.viewport.set_position(t);

        let mut effects = vec![SessionEffect::SeekRequested(t)];
        match self.viewport.segment_at_pixel(x, &self.store) {
            Some(i) => effects.extend(self.store.select(i).map(SessionEffect::from)),
            None    => effects.push(self.store.clear_selection().into()),
        }
        effects
    }

    /// Scrub. Never touches segments.
    pub fn handle_pointer_drag(&mut self, x: f64) -> Effects {
        if !self.dragging {
            return Vec::new();
        }
        let t = self.viewport.time_at_pixel(x);
        self.viewport.set_position(t);
        vec![SessionEffect::SeekRequested(t)]
    }

    pub fn handle_pointer_up(&mut self) -> Effects {
        self.dragging = false;
        Vec::new()
    }

    /// Player reported a new position. Scrolls to keep the playhead visible.
    pub fn handle_position_changed(&mut self, ms: u64) -> Effects {
        self.viewport.set_position(ms);
        if self.viewport.follow_playhead() {
            vec![SessionEffect::ViewChanged]
        } else {
            Vec::new()
        }
    }

    // ── Segment edits ────────────────────────────────────────────────────────

    /// Numeric edit of one edge. Keeps `start < end`; overlap with other
    /// segments is not rechecked.
    pub fn handle_value_change(&mut self, index: usize, field: SegmentField, ms: u64) -> Effects {
        let result = match field {
            SegmentField::Start => self.store.set_start(index, ms),
            SegmentField::End   => self.store.set_end(index, ms),
        };
        match result {
            Ok(()) => {
                self.dirty = true;
                vec![SessionEffect::SegmentsChanged]
            }
            Err(e) => rejected(e),
        }
    }

    pub fn handle_time_text(&mut self, index: usize, field: SegmentField, text: &str) -> Effects {
        match timecode::parse(text) {
            Ok(ms) => self.handle_value_change(index, field, ms),
            Err(e) => {
                log::debug!("[session] {field} edit rejected: {e}");
                vec![SessionEffect::warning(e.to_string())]
            }
        }
    }

    pub fn set_segment_action(&mut self, index: usize, label: &str) -> Effects {
        match self.store.set_action(index, label, &self.catalog) {
            Ok(()) => {
                self.dirty = true;
                vec![SessionEffect::SegmentsChanged]
            }
            Err(e) => rejected(e),
        }
    }

    pub fn remove_segment(&mut self, index: usize) -> Effects {
        let was_selected = self.store.selected_index() == Some(index);
        let Some(removed) = self.store.remove(index) else {
            return Vec::new();
        };
        log::info!("[session] removed {} {}..{}", removed.action, removed.start, removed.end);
        self.dirty = true;

        let mut effects = vec![SessionEffect::SegmentsChanged];
        if was_selected {
            effects.push(SessionEffect::SelectionCleared);
        } else if let Some(sel) = self.store.selected_index() {
            effects.push(SessionEffect::SegmentSelected(sel));
        }
        effects
    }

    /// Select from the segment list and jump the playhead to its start.
    pub fn select_segment(&mut self, index: usize) -> Effects {
        let Some(event) = self.store.select(index) else {
            return Vec::new();
        };
        let mut effects = vec![event.into()];
        if let Some(seg) = self.store.get(index) {
            self.viewport.set_position(seg.start);
            effects.push(SessionEffect::SeekRequested(seg.start));
        }
        effects
    }

    pub fn clear_selection(&mut self) -> Effects {
        vec![self.store.clear_selection().into()]
    }

    // ── Marking ──────────────────────────────────────────────────────────────

    pub fn mark_in(&mut self) -> Effects {
        let t = self.position();
        self.store.set_in_marker(t);
        vec![
            SessionEffect::InMarkerChanged(Some(t)),
            SessionEffect::info(format!("IN: {}", timecode::format_seconds(t))),
        ]
    }

    /// Commit `[IN, playhead)` as a new segment with the current action.
    pub fn mark_out(&mut self) -> Effects {
        match self.commit_marked() {
            Ok(index) => {
                self.store.clear_in_marker();
                self.dirty = true;
                let seg = &self.store.segments()[index];
                let message = format!(
                    "Added {} ({} - {})",
                    seg.action,
                    timecode::format_seconds(seg.start),
                    timecode::format_seconds(seg.end),
                );
                vec![
                    SessionEffect::SegmentsChanged,
                    SessionEffect::InMarkerChanged(None),
                    SessionEffect::info(message),
                ]
            }
            Err(e) => rejected(e),
        }
    }

    fn commit_marked(&mut self) -> Result<usize, ValidationError> {
        let in_ms = self.store.in_marker().ok_or(ValidationError::MissingIn)?;
        let out_ms = self.position();
        if out_ms <= in_ms {
            return Err(ValidationError::OutBeforeIn { in_ms, out_ms });
        }
        let label = self.current_action().ok_or(ValidationError::NoActionSelected)?.to_string();
        let color = self.catalog.color_for(&label);
        self.store.add(in_ms, out_ms, label, Some(color))
    }

    pub fn cancel_in(&mut self) -> Effects {
        if self.store.in_marker().is_none() {
            return Vec::new();
        }
        self.store.clear_in_marker();
        vec![SessionEffect::InMarkerChanged(None)]
    }

    // ── Catalog ──────────────────────────────────────────────────────────────

    /// Headers and separators are rejected; the previous pick stays.
    pub fn choose_action(&mut self, entry: usize) -> Effects {
        self.action.choose(&self.catalog, entry);
        Vec::new()
    }

    // ── View ─────────────────────────────────────────────────────────────────

    pub fn set_scale(&mut self, scale: f64) -> Effects {
        view_changed(self.viewport.set_scale(scale))
    }

    pub fn zoom_by(&mut self, factor: f64) -> Effects {
        view_changed(self.viewport.zoom_by(factor))
    }

    pub fn set_scroll(&mut self, px: f64) -> Effects {
        let before = self.viewport.scroll_offset();
        self.viewport.set_scroll(px);
        view_changed(self.viewport.scroll_offset() != before)
    }

    pub fn set_viewport_width(&mut self, px: f64) -> Effects {
        let before = self.viewport.viewport_width();
        self.viewport.set_viewport_width(px);
        view_changed(self.viewport.viewport_width() != before)
    }

    // ── Files ────────────────────────────────────────────────────────────────

    /// Point the session at a video without touching the segments.
    pub fn attach_video(&mut self, path: &Path, duration_ms: u64) -> Effects {
        self.video_path = Some(path.to_path_buf());
        self.viewport.set_duration(duration_ms);
        self.viewport.set_position(0);
        self.viewport.set_scroll(0.0);
        log::info!("[session] video {} ({} ms)", path.display(), duration_ms);
        vec![SessionEffect::ViewChanged, SessionEffect::SeekRequested(0)]
    }

    /// Forget the current video. The timeline collapses to zero length.
    pub fn detach_video(&mut self) -> Effects {
        if let Some(old) = self.video_path.take() {
            log::info!("[session] video {} detached", old.display());
        }
        self.viewport.set_duration(0);
        self.viewport.set_position(0);
        self.viewport.set_scroll(0.0);
        vec![SessionEffect::ViewChanged, SessionEffect::SeekRequested(0)]
    }

    /// Open a video and, if one sits next to it, its project file.
    /// A missing project is not an error: the session starts empty.
    pub fn open_video(&mut self, path: &Path, duration_ms: u64) -> Effects {
        let mut effects = self.reset_segments();
        effects.extend(self.attach_video(path, duration_ms));

        let project = persistence::project_path_for(path);
        if project.exists() {
            effects.extend(self.read_project(&project));
        } else {
            self.project_path = Some(project);
            effects.push(SessionEffect::info(format!(
                "No project for {}, starting empty",
                file_name(path),
            )));
        }
        effects
    }

    /// Load a project file. Returns the sibling video for the host to open
    /// with [`AnnotationSession::attach_video`], if one exists. The previous
    /// video is detached either way.
    pub fn open_project(&mut self, path: &Path) -> (Effects, Option<PathBuf>) {
        let mut effects = self.reset_segments();
        effects.extend(self.detach_video());
        effects.extend(self.read_project(path));

        let video = persistence::find_sibling_video(path);
        if video.is_none() {
            effects.push(SessionEffect::warning(format!(
                "No video found next to {}",
                file_name(path),
            )));
        }
        (effects, video)
    }

    pub fn save_project(&mut self, path: &Path) -> Effects {
        match persistence::save(path, &self.store) {
            Ok(()) => {
                self.project_path = Some(path.to_path_buf());
                self.dirty = false;
                vec![SessionEffect::info(format!(
                    "Saved {} segments to {}",
                    self.store.len(),
                    file_name(path),
                ))]
            }
            Err(e) => {
                log::error!("[session] save to {} failed: {e}", path.display());
                vec![SessionEffect::error(format!("Save failed: {e}"))]
            }
        }
    }

    /// Replace the catalog. On failure the built-in labels are used.
    /// Existing segments keep their labels and get their colors re-derived.
    pub fn load_catalog(&mut self, path: &Path) -> Effects {
        let (catalog, notice) = match ActionCatalog::from_csv_path(path) {
            Ok(catalog) => {
                let msg = format!("Loaded {} actions from {}", catalog.labels().count(), file_name(path));
                (catalog, SessionEffect::info(msg))
            }
            Err(e) => {
                log::error!("[session] catalog {} unreadable: {e}", path.display());
                (ActionCatalog::builtin(), SessionEffect::error(format!("Catalog not loaded: {e}")))
            }
        };
        self.set_catalog(catalog);
        vec![SessionEffect::SegmentsChanged, notice]
    }

    pub fn set_catalog(&mut self, catalog: ActionCatalog) {
        self.catalog = catalog;
        self.action  = ActionSelection::first_of(&self.catalog);
        self.store.recolor(&self.catalog);
    }

    /// Append every segment to a shared annotations log.
    pub fn export_to_log(&mut self, log_path: &Path) -> Effects {
        let Some(video) = self.video_path.clone() else {
            return vec![SessionEffect::warning("Open a video before exporting")];
        };
        match persistence::append_to_log(log_path, &video, &self.store) {
            Ok(()) => vec![SessionEffect::info(format!(
                "Exported {} segments to {}",
                self.store.len(),
                file_name(log_path),
            ))],
            Err(e) => {
                log::error!("[session] export to {} failed: {e}", log_path.display());
                vec![SessionEffect::error(format!("Export failed: {e}"))]
            }
        }
    }

    fn reset_segments(&mut self) -> Effects {
        self.store.clear();
        self.dragging     = false;
        self.dirty        = false;
        self.project_path = None;
        vec![
            SessionEffect::SegmentsChanged,
            SessionEffect::SelectionCleared,
            SessionEffect::InMarkerChanged(None),
        ]
    }

    /// Load errors leave an empty store and no project path behind, so a
    /// later save has to ask where to write.
    fn read_project(&mut self, path: &Path) -> Effects {
        match persistence::load_store(path, &self.catalog) {
            Ok(store) => {
                self.project_path = Some(path.to_path_buf());
                let overlaps = store.overlapping_pairs().len();
                self.store = store;
                let mut effects = vec![
                    SessionEffect::SegmentsChanged,
                    SessionEffect::info(format!(
                        "Loaded {} segments from {}",
                        self.store.len(),
                        file_name(path),
                    )),
                ];
                if overlaps > 0 {
                    effects.push(SessionEffect::warning(format!(
                        "{overlaps} overlapping segment pairs in {}",
                        file_name(path),
                    )));
                }
                effects
            }
            Err(e) => {
                self.project_path = None;
                log::error!("[session] project {} unreadable: {e}", path.display());
                vec![SessionEffect::error(format!("Project not loaded: {e}"))]
            }
        }
    }
}

fn rejected(e: ValidationError) -> Effects {
    log::debug!("[session] rejected: {e}");
    vec![SessionEffect::warning(e.to_string())]
}

fn view_changed(changed: bool) -> Effects {
    if changed { vec![SessionEffect::ViewChanged] } else { Vec::new() }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::catalog::CatalogRow;
    use crate::commands::NoticeLevel;
    use crate::segment::Rgb;

    fn skating_catalog() -> ActionCatalog {
        ActionCatalog::load(vec![
            CatalogRow::new("Jump", "Toe Loop", Some(Rgb::new(255, 0, 0))),
            CatalogRow::new("Jump", "Axel",     Some(Rgb::new(0, 255, 0))),
            CatalogRow::new("Spin", "Camel",    Some(Rgb::new(0, 0, 255))),
        ])
    }

    /// 60 s video, 10 px/s, 300 px strip: x = t / 100.
    fn session() -> AnnotationSession {
        let mut s = AnnotationSession::new(skating_catalog(), 10.0);
        s.attach_video(Path::new("clip.mp4"), 60_000);
        s.set_viewport_width(300.0);
        s
    }

    fn mark(s: &mut AnnotationSession, from: u64, to: u64) -> Effects {
        s.handle_position_changed(from);
        s.mark_in();
        s.handle_position_changed(to);
        s.mark_out()
    }

    fn warnings(effects: &[SessionEffect]) -> usize {
        effects.iter()
            .filter(|e| matches!(e, SessionEffect::Notice(n) if n.level == NoticeLevel::Warning))
            .count()
    }

    #[test]
    fn mark_in_out_commits_with_current_action() {
        let mut s = session();
        let effects = mark(&mut s, 1_000, 2_500);
        assert!(effects.contains(&SessionEffect::SegmentsChanged));
        assert!(effects.contains(&SessionEffect::InMarkerChanged(None)));
        let seg = &s.store().segments()[0];
        assert_eq!((seg.start, seg.end), (1_000, 2_500));
        assert_eq!(seg.action, "Toe Loop");
        assert_eq!(seg.color, Some(Rgb::new(255, 0, 0)));
        assert_eq!(s.store().in_marker(), None);
        assert!(s.is_dirty());
    }

    #[test]
    fn mark_out_without_in_is_rejected() {
        let mut s = session();
        s.handle_position_changed(3_000);
        let effects = s.mark_out();
        assert_eq!(warnings(&effects), 1);
        assert!(s.store().is_empty());
    }

    #[test]
    fn mark_out_before_in_keeps_marker() {
        let mut s = session();
        s.handle_position_changed(5_000);
        s.mark_in();
        s.handle_position_changed(5_000);
        assert_eq!(warnings(&s.mark_out()), 1);
        assert!(s.store().is_empty());
        assert_eq!(s.store().in_marker(), Some(5_000));
    }

    #[test]
    fn overlapping_mark_is_rejected() {
        let mut s = session();
        mark(&mut s, 1_000, 3_000);
        let effects = mark(&mut s, 2_000, 4_000);
        assert_eq!(warnings(&effects), 1);
        assert_eq!(s.store().len(), 1);
        // adjacency is fine
        mark(&mut s, 3_000, 4_000);
        assert_eq!(s.store().len(), 2);
    }

    #[test]
    fn cancel_in_clears_marker() {
        let mut s = session();
        s.mark_in();
        assert_eq!(s.cancel_in(), vec![SessionEffect::InMarkerChanged(None)]);
        assert!(s.cancel_in().is_empty());
    }

    #[test]
    fn click_on_segment_seeks_and_selects() {
        let mut s = session();
        mark(&mut s, 10_000, 20_000);
        let effects = s.handle_pointer_down(150.0);
        assert_eq!(effects, vec![
            SessionEffect::SeekRequested(15_000),
            SessionEffect::SegmentSelected(0),
        ]);
        assert_eq!(s.store().selected_index(), Some(0));
    }

    #[test]
    fn click_on_empty_area_clears_selection() {
        let mut s = session();
        mark(&mut s, 10_000, 20_000);
        s.select_segment(0);
        let effects = s.handle_pointer_down(250.0);
        assert_eq!(effects, vec![
            SessionEffect::SeekRequested(25_000),
            SessionEffect::SelectionCleared,
        ]);
        assert_eq!(s.store().selected_index(), None);
    }

    #[test]
    fn drag_scrubs_without_editing() {
        let mut s = session();
        mark(&mut s, 10_000, 20_000);
        let before = s.store().segments().to_vec();

        assert!(s.handle_pointer_drag(50.0).is_empty(), "no press yet");
        s.handle_pointer_down(120.0);
        assert_eq!(s.handle_pointer_drag(180.0), vec![SessionEffect::SeekRequested(18_000)]);
        assert_eq!(s.handle_pointer_drag(-20.0), vec![SessionEffect::SeekRequested(0)]);
        s.handle_pointer_up();
        assert!(s.handle_pointer_drag(100.0).is_empty());
        assert_eq!(s.store().segments(), before.as_slice());
    }

    #[test]
    fn numeric_edit_bypasses_overlap_check() {
        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        mark(&mut s, 3_000, 4_000);
        let effects = s.handle_value_change(0, SegmentField::End, 3_500);
        assert_eq!(effects, vec![SessionEffect::SegmentsChanged]);
        assert_eq!(s.store().overlapping_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn numeric_edit_keeps_start_before_end() {
        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        assert_eq!(warnings(&s.handle_value_change(0, SegmentField::Start, 2_000)), 1);
        assert_eq!(warnings(&s.handle_value_change(4, SegmentField::Start, 0)), 1);
        assert_eq!(s.store().segments()[0].start, 1_000);
    }

    #[test]
    fn time_text_is_parsed() {
        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        s.handle_time_text(0, SegmentField::End, "0:05.5");
        assert_eq!(s.store().segments()[0].end, 5_500);
        assert_eq!(warnings(&s.handle_time_text(0, SegmentField::End, "a:b:c")), 1);
        assert_eq!(s.store().segments()[0].end, 5_500);
    }

    #[test]
    fn header_pick_keeps_previous_action() {
        let mut s = session();
        s.choose_action(2); // Axel
        assert_eq!(s.current_action(), Some("Axel"));
        s.choose_action(0); // 📁 Jump
        s.choose_action(3); // ───
        assert_eq!(s.current_action(), Some("Axel"));
    }

    #[test]
    fn remove_fixes_up_selection() {
        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        mark(&mut s, 3_000, 4_000);
        s.select_segment(1);
        let effects = s.remove_segment(0);
        assert_eq!(effects, vec![SessionEffect::SegmentsChanged, SessionEffect::SegmentSelected(0)]);
        assert_eq!(s.remove_segment(0), vec![SessionEffect::SegmentsChanged, SessionEffect::SelectionCleared]);
        assert!(s.remove_segment(0).is_empty());
    }

    #[test]
    fn list_selection_seeks_to_start() {
        let mut s = session();
        mark(&mut s, 7_000, 8_000);
        let effects = s.select_segment(0);
        assert_eq!(effects, vec![SessionEffect::SegmentSelected(0), SessionEffect::SeekRequested(7_000)]);
        assert_eq!(s.position(), 7_000);
    }

    #[test]
    fn playback_scrolls_to_follow() {
        let mut s = session();
        assert_eq!(s.handle_position_changed(45_000), vec![SessionEffect::ViewChanged]);
        assert_eq!(s.viewport().scroll_offset(), 150.0);
        assert!(s.handle_position_changed(40_000).is_empty());
    }

    #[test]
    fn view_commands_route_through_apply() {
        let mut s = session();
        assert_eq!(s.apply(EditorCommand::ZoomBy(2.0)), vec![SessionEffect::ViewChanged]);
        assert_eq!(s.viewport().scale(), 20.0);
        assert!(s.apply(EditorCommand::SetScale(f64::NAN)).is_empty());
        assert!(s.apply(EditorCommand::Play).is_empty());
    }

    #[test]
    fn export_requires_a_video() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = AnnotationSession::default();
        assert_eq!(warnings(&s.export_to_log(&dir.path().join("log.csv"))), 1);
    }

    #[test]
    fn catalog_to_save_to_reload() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("actions.csv");
        fs::write(&catalog_path, concat!(
            "Category,Technique,Color\n",
            "Jump,Toe Loop,#FF0000\n",
            "Jump,Axel,#00FF00\n",
            "Spin,Camel,#0000FF\n",
        )).unwrap();
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"").unwrap();

        let mut s = AnnotationSession::default();
        s.load_catalog(&catalog_path);
        assert!(!s.catalog().is_fallback());
        s.open_video(&video, 60_000);
        s.set_viewport_width(300.0);

        s.choose_action(2);
        mark(&mut s, 1_000, 2_000);
        s.choose_action(5);
        mark(&mut s, 5_000, 7_000);

        let project = persistence::project_path_for(&video);
        s.save_project(&project);
        assert!(!s.is_dirty());
        assert_eq!(
            fs::read_to_string(&project).unwrap(),
            "00:00:01.000,00:00:02.000,Axel\n00:00:05.000,00:00:07.000,Camel\n",
        );

        let mut reopened = AnnotationSession::new(s.catalog().clone(), 10.0);
        reopened.open_video(&video, 60_000);
        assert_eq!(reopened.store().segments(), s.store().segments());
        assert_eq!(reopened.store().segments()[1].color, Some(Rgb::new(0, 0, 255)));
        assert_eq!(reopened.project_path(), Some(project.as_path()));

        let (_, sibling) = reopened.open_project(&project);
        assert_eq!(sibling, Some(video));
        assert_eq!(reopened.store().len(), 2);
    }

    #[test]
    fn missing_catalog_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        let effects = s.load_catalog(&dir.path().join("missing.csv"));
        assert!(effects.iter().any(|e| matches!(e, SessionEffect::Notice(n) if n.level == NoticeLevel::Error)));
        assert!(s.catalog().is_fallback());
        assert_eq!(s.current_action(), Some("jump"));
    }

    fn errors(effects: &[SessionEffect]) -> usize {
        effects.iter()
            .filter(|e| matches!(e, SessionEffect::Notice(n) if n.level == NoticeLevel::Error))
            .count()
    }

    #[test]
    fn unreadable_project_is_not_armed_for_save() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("clip.csv");
        fs::create_dir(&project).unwrap();

        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        let (effects, _) = s.open_project(&project);
        assert_eq!(errors(&effects), 1);
        assert!(s.store().is_empty());
        assert!(!s.is_dirty());
        assert_eq!(s.project_path(), None);
        assert!(project.is_dir());
    }

    #[test]
    fn video_with_unreadable_project_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        fs::create_dir(persistence::project_path_for(&video)).unwrap();

        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        let effects = s.open_video(&video, 30_000);
        assert_eq!(errors(&effects), 1);
        assert!(s.store().is_empty());
        assert!(!s.is_dirty());
        assert_eq!(s.project_path(), None);
        assert_eq!(s.video_path(), Some(video.as_path()));
        assert_eq!(s.viewport().duration(), 30_000);
    }

    #[test]
    fn project_with_bad_bytes_keeps_good_rows_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("clip.csv");
        let mut bytes = b"00:00:01.000,00:00:02.000,Axel\n00:00:03.000,00:00:04.000,".to_vec();
        bytes.push(0xff);
        bytes.push(b'\n');
        fs::write(&project, &bytes).unwrap();

        let mut s = AnnotationSession::new(skating_catalog(), 10.0);
        s.open_project(&project);
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.project_path(), Some(project.as_path()));
        assert_eq!(fs::read(&project).unwrap(), bytes);
    }

    #[test]
    fn project_without_video_detaches_previous_one() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("other.csv");
        fs::write(&project, "00:00:01.000,00:00:02.000,Axel\n").unwrap();

        let mut s = session();
        let (effects, sibling) = s.open_project(&project);
        assert_eq!(sibling, None);
        assert!(effects.contains(&SessionEffect::SeekRequested(0)));
        assert_eq!(s.video_path(), None);
        assert_eq!(s.viewport().duration(), 0);
        assert_eq!(s.store().len(), 1);

        let log = dir.path().join("annotations.csv");
        assert_eq!(warnings(&s.export_to_log(&log)), 1);
        assert!(!log.exists());
    }

    #[test]
    fn video_without_project_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session();
        mark(&mut s, 1_000, 2_000);
        let video = dir.path().join("fresh.mp4");
        s.open_video(&video, 30_000);
        assert!(s.store().is_empty());
        assert_eq!(s.viewport().duration(), 30_000);
        assert_eq!(s.project_path(), Some(dir.path().join("fresh.csv").as_path()));
    }
}
