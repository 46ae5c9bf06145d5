// crates/segmark-core/src/lib.rs
//
// The annotation model. No egui, no ffmpeg: everything here runs in plain
// `cargo test`.
//
// Leaf-first:
//   segment, timecode   plain values
//   store, viewport     the segment list and its pixel mapping
//   catalog             action labels and colors
//   persistence         project files, video pairing, shared log
//   config              per-user settings
//   commands, session   the command/effect interface and its state owner

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod persistence;
pub mod player;
pub mod segment;
pub mod session;
pub mod store;
pub mod timecode;
pub mod viewport;

pub use catalog::{ActionCatalog, ActionSelection, CatalogEntry};
pub use commands::{EditorCommand, Notice, NoticeLevel, SegmentField, SessionEffect};
pub use config::AppConfig;
pub use error::{Result, SegmarkError, ValidationError};
pub use player::MediaPlayer;
pub use segment::{Rgb, Segment};
pub use session::AnnotationSession;
pub use store::SegmentStore;
pub use viewport::TimelineViewport;
