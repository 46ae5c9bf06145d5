// crates/segmark-core/src/commands.rs
//
// Every user action in Segmark is expressed as an EditorCommand.
// Panels emit these; app.rs processes them after the UI pass.
// Session-scoped variants go through AnnotationSession::apply, which answers
// with SessionEffects. Host-scoped variants (playback, file dialogs) are
// handled by the app itself because they need the player or a native dialog.

use std::fmt;

/// Which edge of a segment an edit control targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentField {
    Start,
    End,
}

impl fmt::Display for SegmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentField::Start => f.write_str("start"),
            SegmentField::End   => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // ── Playback (host) ──────────────────────────────────────────────────────
    Play,
    Pause,
    TogglePlayback,

    // ── Timeline pointer ─────────────────────────────────────────────────────
    /// Primary press at strip x.
    PointerDown(f64),
    /// Press-drag moved to strip x. Ignored unless a press is in progress.
    PointerDrag(f64),
    PointerUp,

    // ── Marking ──────────────────────────────────────────────────────────────
    MarkIn,
    /// Commit `[IN, playhead)` with the current action.
    MarkOut,
    CancelIn,

    // ── Segments ─────────────────────────────────────────────────────────────
    SelectSegment(usize),
    ClearSelection,
    RemoveSegment(usize),
    /// Numeric edit control, already in ms.
    SetSegmentTime { index: usize, field: SegmentField, ms: u64 },
    /// Time-code text field; parsed before it is applied.
    SetSegmentTimeText { index: usize, field: SegmentField, text: String },
    SetSegmentAction { index: usize, label: String },

    // ── Catalog ──────────────────────────────────────────────────────────────
    /// Pick-list row index. Headers and separators are rejected.
    ChooseAction(usize),

    // ── View ─────────────────────────────────────────────────────────────────
    SetScale(f64),
    ZoomBy(f64),
    SetScroll(f64),
    SetViewportWidth(f64),

    // ── Files (host) ─────────────────────────────────────────────────────────
    OpenVideoDialog,
    OpenProjectDialog,
    /// Save to the current project path, asking for one if there is none.
    SaveProject,
    SaveProjectAs,
    LoadCatalogDialog,
    ExportLogDialog,
    DismissNotice,
}

impl EditorCommand {
    /// True for variants the host handles itself.
    pub fn is_host(&self) -> bool {
        matches!(
            self,
            EditorCommand::Play
                | EditorCommand::Pause
                | EditorCommand::TogglePlayback
                | EditorCommand::OpenVideoDialog
                | EditorCommand::OpenProjectDialog
                | EditorCommand::SaveProject
                | EditorCommand::SaveProjectAs
                | EditorCommand::LoadCatalogDialog
                | EditorCommand::ExportLogDialog
                | EditorCommand::DismissNotice
        )
    }
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-line message for the notice strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level:   NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// What the host must do after a session handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Move the player to this position.
    SeekRequested(u64),
    SegmentSelected(usize),
    SelectionCleared,
    /// Segment list or geometry changed; redraw timeline and list.
    SegmentsChanged,
    InMarkerChanged(Option<u64>),
    /// Zoom, scroll or width changed; redraw the timeline.
    ViewChanged,
    Notice(Notice),
}

impl SessionEffect {
    pub fn info(message: impl Into<String>) -> Self {
        SessionEffect::Notice(Notice::info(message))
    }

    pub fn warning(message: impl Into<String>) -> Self {
        SessionEffect::Notice(Notice::warning(message))
    }

    pub fn error(message: impl Into<String>) -> Self {
        SessionEffect::Notice(Notice::error(message))
    }
}
