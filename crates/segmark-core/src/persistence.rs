// crates/segmark-core/src/persistence.rs
//
// Project files: one CSV row per segment, no header, store order.
//
//   00:00:01.000,00:00:02.000,Axel
//   00:00:05.250,00:00:07.000,Camel
//
// A project is paired with its video by base name: `clip.mp4` <-> `clip.csv`.
// Colors are never written; they are re-derived from the catalog on load.
//
// The loader trusts the file: segments are not checked against each other.
// Rows it cannot turn into a valid segment are skipped with a warning.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::catalog::ActionCatalog;
use crate::error::{Result, SegmarkError};
use crate::segment::Segment;
use crate::store::SegmentStore;
use crate::timecode;

pub const PROJECT_EXTENSION: &str = "csv";

/// Sibling video extensions, in lookup priority order. Matched case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "m4v", "mov"];

// ── Save / load ───────────────────────────────────────────────────────────────

/// Write every segment as `start,end,action`. Errors are returned, not retried.
pub fn save(path: &Path, store: &SegmentStore) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    for seg in store.segments() {
        let start = timecode::format(seg.start);
        let end   = timecode::format(seg.end);
        writer.write_record([start.as_str(), end.as_str(), seg.action.as_str()])?;
    }
    writer.flush()?;
    log::info!("[project] saved {} segments to {}", store.len(), path.display());
    Ok(())
}

/// Read segments in file order. Colors come from `catalog`.
pub fn load(path: &Path, catalog: &ActionCatalog) -> Result<Vec<Segment>> {
    if !path.exists() {
        return Err(SegmarkError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut segments = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = record?;
        if record.len() < 3 {
            log::warn!("[project] row {}: expected 3 fields, found {}; skipped", row + 1, record.len());
            continue;
        }
        match decode_row(&record, catalog) {
            Ok(seg) => segments.push(seg),
            Err(e)  => log::warn!("[project] row {}: {e}; skipped", row + 1),
        }
    }

    log::info!("[project] loaded {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

/// `start,end,action` -> segment. Fields are decoded one at a time so a
/// bad byte sequence only costs its own row.
fn decode_row(record: &csv::ByteRecord, catalog: &ActionCatalog) -> Result<Segment> {
    let start  = timecode::parse(utf8_field(record, 0)?)?;
    let end    = timecode::parse(utf8_field(record, 1)?)?;
    let action = utf8_field(record, 2)?.to_string();
    let color  = Some(catalog.color_for(&action));
    Ok(Segment::new(start, end, action, color)?)
}

fn utf8_field(record: &csv::ByteRecord, index: usize) -> Result<&str> {
    Ok(std::str::from_utf8(&record[index])?)
}

/// [`load`] wrapped into a fresh store with nothing selected.
pub fn load_store(path: &Path, catalog: &ActionCatalog) -> Result<SegmentStore> {
    load(path, catalog).map(SegmentStore::from_segments)
}

// ── Video pairing ─────────────────────────────────────────────────────────────

/// `dir/clip.mp4` -> `dir/clip.csv`.
pub fn project_path_for(video: &Path) -> PathBuf {
    video.with_extension(PROJECT_EXTENSION)
}

/// The video sharing `project`'s base name, if one exists on disk.
/// When several match, the extension earliest in [`VIDEO_EXTENSIONS`] wins.
pub fn find_sibling_video(project: &Path) -> Option<PathBuf> {
    let stem = project.file_stem()?;
    let dir = match project.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let rank = |path: &Path| -> Option<usize> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        VIDEO_EXTENSIONS.iter().position(|v| *v == ext)
    };

    let mut candidates: Vec<(usize, PathBuf)> = fs::read_dir(dir).ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.file_stem() == Some(stem))
        .filter_map(|path| rank(&path).map(|r| (r, path)))
        .collect();
    candidates.sort();
    candidates.into_iter().next().map(|(_, path)| path)
}

// ── Shared annotation log ─────────────────────────────────────────────────────

/// Append `video,start_ms,end_ms,action` rows to a shared log file, creating
/// it if needed. Existing content is never rewritten.
pub fn append_to_log(log_path: &Path, video: &Path, store: &SegmentStore) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    let video = video.display().to_string();
    for seg in store.segments() {
        let start = seg.start.to_string();
        let end   = seg.end.to_string();
        writer.write_record([video.as_str(), start.as_str(), end.as_str(), seg.action.as_str()])?;
    }
    writer.flush()?;
    log::info!("[project] appended {} rows to {}", store.len(), log_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRow;
    use crate::segment::Rgb;

    fn catalog() -> ActionCatalog {
        ActionCatalog::load(vec![
            CatalogRow::new("Jump", "Toe Loop", Some(Rgb::new(255, 0, 0))),
            CatalogRow::new("Jump", "Axel",     Some(Rgb::new(0, 255, 0))),
            CatalogRow::new("Spin", "Camel",    Some(Rgb::new(0, 0, 255))),
        ])
    }

    #[test]
    fn save_writes_one_row_per_segment_in_store_order() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        let mut store = SegmentStore::new();
        store.try_add(5_000, 6_500, "Camel", None);
        store.try_add(1_000, 2_000, "Axel",  None);

        save(&path, &store).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec![
            "00:00:05.000,00:00:06.500,Camel",
            "00:00:01.000,00:00:02.000,Axel",
        ]);
    }

    #[test]
    fn load_round_trips_and_resolves_colors() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        let mut store = SegmentStore::new();
        store.try_add(1_000, 2_000, "Axel", None);
        store.try_add(3_723_456, 3_800_000, "Unknown move", None);
        save(&path, &store).unwrap();

        let loaded = load(&path, &catalog()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!((loaded[0].start, loaded[0].end), (1_000, 2_000));
        assert_eq!(loaded[0].color, Some(Rgb::new(0, 255, 0)));
        assert_eq!(loaded[1].start, 3_723_456);
        assert_eq!(loaded[1].color, Some(crate::catalog::DEFAULT_ACTION_COLOR));
    }

    #[test]
    fn load_skips_short_and_broken_rows() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        fs::write(&path, concat!(
            "00:00:01.000,00:00:02.000\n",
            "00:00:01.000,00:00:02.000,Axel\n",
            "xx:00:01,00:00:02.000,Axel\n",
            "00:00:09.000,00:00:08.000,Axel\n",
            "1:30,1:45.5,Camel,extra\n",
        )).unwrap();

        let loaded = load(&path, &catalog()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].action, "Axel");
        assert_eq!((loaded[1].start, loaded[1].end), (90_000, 105_500));
    }

    #[test]
    fn load_skips_rows_that_are_not_utf8() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        let mut bytes = b"00:00:01.000,00:00:02.000,Axel\n00:00:03.000,00:00:04.000,Ax".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"el\n00:00:05.000,00:00:06.000,Camel\n");
        fs::write(&path, bytes).unwrap();

        let loaded = load(&path, &catalog()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].action, "Axel");
        assert_eq!(loaded[1].action, "Camel");
        assert_eq!(loaded[1].start, 5_000);
    }

    #[test]
    fn row_errors_keep_their_cause() {
        let row = |fields: [&str; 3]| csv::ByteRecord::from(fields.to_vec());
        let bad_time  = decode_row(&row(["1:2:3:4", "0:05", "Axel"]), &catalog()).unwrap_err();
        let backwards = decode_row(&row(["0:05", "0:01", "Axel"]), &catalog()).unwrap_err();
        assert!(matches!(bad_time, SegmarkError::TimeCode(_)));
        assert!(matches!(backwards, SegmarkError::Validation(_)));
    }

    #[test]
    fn unreadable_project_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        fs::create_dir(&path).unwrap();
        assert!(load(&path, &catalog()).is_err());
    }

    #[test]
    fn load_does_not_validate_overlap() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.csv");
        fs::write(&path, "0:01,0:05,Axel\n0:02,0:03,Camel\n").unwrap();
        let store = load_store(&path, &catalog()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.overlapping_pairs(), vec![(0, 1)]);
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn missing_project_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("none.csv"), &catalog()).unwrap_err();
        assert!(matches!(err, SegmarkError::NotFound(_)));
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("clip.csv");
        assert!(save(&path, &SegmentStore::new()).is_err());
    }

    #[test]
    fn pairs_project_and_video_by_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("skate.MP4");
        fs::write(&video, b"").unwrap();
        fs::write(dir.path().join("skate.mov"), b"").unwrap();
        fs::write(dir.path().join("other.mp4"), b"").unwrap();

        let project = project_path_for(&video);
        assert_eq!(project, dir.path().join("skate.csv"));
        assert_eq!(find_sibling_video(&project), Some(video));
        assert_eq!(find_sibling_video(&dir.path().join("lonely.csv")), None);
    }

    #[test]
    fn appends_to_shared_log() {
        let dir  = tempfile::tempdir().unwrap();
        let log  = dir.path().join("annotations.csv");
        let mut store = SegmentStore::new();
        store.try_add(1_000, 2_000, "Axel", None);

        append_to_log(&log, Path::new("a.mp4"), &store).unwrap();
        append_to_log(&log, Path::new("b.mp4"), &store).unwrap();
        let text = fs::read_to_string(&log).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![
            "a.mp4,1000,2000,Axel",
            "b.mp4,1000,2000,Axel",
        ]);
    }
}
