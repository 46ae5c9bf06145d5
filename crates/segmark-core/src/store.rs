// crates/segmark-core/src/store.rs
//
// Ordered collection of non-overlapping segments plus selection state.
//
// Order is insertion order, not time order: index N is the N-th segment the
// user committed (or the N-th row of the loaded project file). Nothing here
// ever sorts.
//
// Invariants:
//   - after every successful add(), no two segments overlap
//   - selected_index, when set, is a valid index
//
// Known gap: set_start()/set_end() (the numeric edit fields) do NOT check
// the new bounds against other segments. overlapping_pairs() exposes any
// overlap such edits introduce.

use crate::catalog::ActionCatalog;
use crate::error::ValidationError;
use crate::segment::{Rgb, Segment};

/// Selection notifications raised by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    Selected(usize),
    SelectionCleared,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentStore {
    segments:       Vec<Segment>,
    selected_index: Option<usize>,
    /// Provisional IN point waiting for its OUT point.
    in_marker:      Option<u64>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-decoded segments without checking them against each
    /// other. Used by the project loader, which trusts the file.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments, selected_index: None, in_marker: None }
    }

    // ── Read access ──────────────────────────────────────────────────────────

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&Segment> {
        self.selected_index.and_then(|i| self.segments.get(i))
    }

    pub fn in_marker(&self) -> Option<u64> {
        self.in_marker
    }

    /// First segment, in store order, whose closed range contains `t`.
    pub fn index_at_time(&self, t: u64) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(t))
    }

    /// Every `(i, j)` with `i < j` whose segments overlap.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.segments.iter().enumerate() {
            for (j, b) in self.segments.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    // ── Insertion / removal ──────────────────────────────────────────────────

    /// Append a new segment, rejecting empty ranges and overlaps.
    /// Returns the new segment's index. On error nothing is stored.
    pub fn add(
        &mut self,
        start:  u64,
        end:    u64,
        action: impl Into<String>,
        color:  Option<Rgb>,
    ) -> Result<usize, ValidationError> {
        let candidate = Segment::new(start, end, action, color)?;
        if self.segments.iter().any(|s| s.overlaps(&candidate)) {
            return Err(ValidationError::Overlap { start, end });
        }
        self.segments.push(candidate);
        Ok(self.segments.len() - 1)
    }

    /// Boolean form of [`SegmentStore::add`].
    pub fn try_add(
        &mut self,
        start:  u64,
        end:    u64,
        action: impl Into<String>,
        color:  Option<Rgb>,
    ) -> bool {
        self.add(start, end, action, color).is_ok()
    }

    /// Remove the segment at `index`. Out-of-range is a silent no-op.
    ///
    /// Selection fix-up: removing below the selection shifts it down by one;
    /// removing the selected segment clears it.
    pub fn remove(&mut self, index: usize) -> Option<Segment> {
        if index >= self.segments.len() {
            return None;
        }
        let removed = self.segments.remove(index);
        self.selected_index = match self.selected_index {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index  => Some(sel - 1),
            other                     => other,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.selected_index = None;
        self.in_marker      = None;
    }

    // ── Selection ────────────────────────────────────────────────────────────

    /// Select `index`. Out-of-range is a silent no-op (returns `None`).
    pub fn select(&mut self, index: usize) -> Option<StoreEvent> {
        if index >= self.segments.len() {
            return None;
        }
        self.selected_index = Some(index);
        Some(StoreEvent::Selected(index))
    }

    pub fn clear_selection(&mut self) -> StoreEvent {
        self.selected_index = None;
        StoreEvent::SelectionCleared
    }

    // ── IN marker ────────────────────────────────────────────────────────────

    pub fn set_in_marker(&mut self, t: u64) {
        self.in_marker = Some(t);
    }

    pub fn clear_in_marker(&mut self) {
        self.in_marker = None;
    }

    // ── In-place edits ───────────────────────────────────────────────────────

    /// Move the start edge. Keeps `start < end`; does not check neighbours.
    pub fn set_start(&mut self, index: usize, start: u64) -> Result<(), ValidationError> {
        let seg = self.segments.get_mut(index).ok_or(ValidationError::IndexOutOfRange(index))?;
        if start >= seg.end {
            return Err(ValidationError::EmptyRange { start, end: seg.end });
        }
        seg.start = start;
        Ok(())
    }

    /// Move the end edge. Keeps `start < end`; does not check neighbours.
    pub fn set_end(&mut self, index: usize, end: u64) -> Result<(), ValidationError> {
        let seg = self.segments.get_mut(index).ok_or(ValidationError::IndexOutOfRange(index))?;
        if end <= seg.start {
            return Err(ValidationError::EmptyRange { start: seg.start, end });
        }
        seg.end = end;
        Ok(())
    }

    /// Relabel a segment; its color is re-derived from the catalog.
    pub fn set_action(
        &mut self,
        index:   usize,
        label:   &str,
        catalog: &ActionCatalog,
    ) -> Result<(), ValidationError> {
        let seg = self.segments.get_mut(index).ok_or(ValidationError::IndexOutOfRange(index))?;
        seg.action = label.to_string();
        seg.color  = Some(catalog.color_for(label));
        Ok(())
    }

    /// Re-derive every segment's color after a catalog change. Labels stay.
    pub fn recolor(&mut self, catalog: &ActionCatalog) {
        for seg in &mut self.segments {
            seg.color = Some(catalog.color_for(&seg.action));
        }
    }
}
