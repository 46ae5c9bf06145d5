// crates/segmark-core/src/viewport.rs
//
// Pixel <-> time mapping for the timeline strip.
//
// All x coordinates are relative to the left edge of the visible strip, in
// logical pixels. The full timeline is `total_width_px()` wide; the strip
// shows `[scroll_offset, scroll_offset + viewport_width)` of it.
//
//   pixel = (time / duration) * total_width - scroll_offset
//   time  = ((pixel + scroll_offset) / total_width) * duration
//
// Every mutator re-clamps scroll_offset into [0, max_scroll()], so the
// mapping is valid after any sequence of zoom / resize / duration changes.

use crate::segment::Segment;
use crate::store::SegmentStore;

/// The timeline is never narrower than this, however short the video.
pub const MIN_TIMELINE_WIDTH: f64 = 400.0;
pub const MIN_SCALE:          f64 = 0.5;
pub const MAX_SCALE:          f64 = 1000.0;
pub const DEFAULT_SCALE:      f64 = 50.0;

/// One ruler tick, already mapped into strip coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerTick {
    pub x:       f64,
    pub time_ms: u64,
    pub major:   bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineViewport {
    duration:         u64,
    scale:            f64,
    scroll_offset:    f64,
    viewport_width:   f64,
    current_position: u64,
}

impl Default for TimelineViewport {
    fn default() -> Self {
        Self::new(0, DEFAULT_SCALE)
    }
}

impl TimelineViewport {
    pub fn new(duration: u64, scale: f64) -> Self {
        let mut vp = Self {
            duration,
            scale:            DEFAULT_SCALE,
            scroll_offset:    0.0,
            viewport_width:   0.0,
            current_position: 0,
        };
        vp.set_scale(scale);
        vp
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn duration(&self) -> u64 { self.duration }
    pub fn scale(&self) -> f64 { self.scale }
    pub fn scroll_offset(&self) -> f64 { self.scroll_offset }
    pub fn viewport_width(&self) -> f64 { self.viewport_width }
    pub fn current_position(&self) -> u64 { self.current_position }

    pub fn total_width_px(&self) -> f64 {
        (self.duration as f64 / 1000.0 * self.scale).max(MIN_TIMELINE_WIDTH)
    }

    /// Largest valid scroll offset for the current width and zoom.
    pub fn max_scroll(&self) -> f64 {
        (self.total_width_px() - self.viewport_width).max(0.0)
    }

    // ── Mapping ──────────────────────────────────────────────────────────────

    pub fn pixel_for(&self, time_ms: u64) -> f64 {
        if self.duration == 0 {
            return -self.scroll_offset;
        }
        time_ms as f64 * self.total_width_px() / self.duration as f64 - self.scroll_offset
    }

    /// Strip x -> time, rounded to whole ms and clamped to `[0, duration]`.
    pub fn time_at_pixel(&self, x: f64) -> u64 {
        if self.duration == 0 {
            return 0;
        }
        let t = (x + self.scroll_offset) * self.duration as f64 / self.total_width_px();
        t.round().clamp(0.0, self.duration as f64) as u64
    }

    pub fn segment_at_pixel(&self, x: f64, store: &SegmentStore) -> Option<usize> {
        store.index_at_time(self.time_at_pixel(x))
    }

    pub fn pixel_range_for(&self, segment: &Segment) -> (f64, f64) {
        (self.pixel_for(segment.start), self.pixel_for(segment.end))
    }

    /// Time span currently visible in the strip.
    pub fn visible_range(&self) -> (u64, u64) {
        (self.time_at_pixel(0.0), self.time_at_pixel(self.viewport_width))
    }

    // ── Mutators ─────────────────────────────────────────────────────────────

    /// Returns false (and changes nothing) for non-finite or non-positive input.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("[viewport] ignoring invalid scale {scale}");
            return false;
        }
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        self.clamp_scroll();
        true
    }

    /// Multiply the scale by `factor`, keeping the playhead at the same strip x.
    pub fn zoom_by(&mut self, factor: f64) -> bool {
        let anchor_x = self.pixel_for(self.current_position);
        if !self.set_scale(self.scale * factor) {
            return false;
        }
        let unscrolled = self.pixel_for(self.current_position) + self.scroll_offset;
        self.set_scroll(unscrolled - anchor_x);
        true
    }

    pub fn set_scroll(&mut self, offset: f64) {
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
        self.clamp_scroll();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll(self.scroll_offset + delta);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.clamp_scroll();
    }

    pub fn set_duration(&mut self, duration: u64) {
        self.duration         = duration;
        self.current_position = self.current_position.min(duration);
        self.clamp_scroll();
    }

    pub fn set_position(&mut self, time_ms: u64) {
        self.current_position = time_ms.min(self.duration);
    }

    /// Scroll the least amount needed to bring the playhead into view.
    /// Returns true when the offset changed.
    pub fn follow_playhead(&mut self) -> bool {
        if self.viewport_width <= 0.0 {
            return false;
        }
        let x = self.pixel_for(self.current_position);
        let before = self.scroll_offset;
        if x < 0.0 {
            self.scroll_by(x);
        } else if x > self.viewport_width {
            self.scroll_by(x - self.viewport_width);
        }
        (self.scroll_offset - before).abs() > f64::EPSILON
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    // ── Ruler ────────────────────────────────────────────────────────────────

    /// Tick spacing in ms for the effective pixels-per-second.
    pub fn tick_step_ms(&self) -> u64 {
        let px_per_s = if self.duration == 0 {
            self.scale
        } else {
            self.total_width_px() / (self.duration as f64 / 1000.0)
        };
        if px_per_s >= 200.0 { 500 }
        else if px_per_s >= 80.0 { 1_000 }
        else if px_per_s >= 30.0 { 5_000 }
        else if px_per_s >= 8.0 { 10_000 }
        else if px_per_s >= 2.0 { 60_000 }
        else { 300_000 }
    }

    /// Ticks covering the visible part of the timeline. Every fifth tick is major.
    pub fn ruler_ticks(&self) -> Vec<RulerTick> {
        if self.duration == 0 {
            return Vec::new();
        }
        let step = self.tick_step_ms();
        let (from, to) = self.visible_range();
        let mut ticks = Vec::new();
        let mut n = from / step;
        loop {
            let t = n * step;
            if t > to || t > self.duration {
                break;
            }
            ticks.push(RulerTick { x: self.pixel_for(t), time_ms: t, major: n % 5 == 0 });
            n += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute_at_10px() -> TimelineViewport {
        let mut vp = TimelineViewport::new(60_000, 10.0);
        vp.set_viewport_width(300.0);
        vp
    }

    #[test]
    fn inverse_mapping_round_trips() {
        let vp = minute_at_10px();
        assert_eq!(vp.total_width_px(), 600.0);
        let t = vp.time_at_pixel(vp.pixel_for(30_000));
        assert!(t.abs_diff(30_000) <= 1, "{t}");
    }

    #[test]
    fn inverse_mapping_with_scroll() {
        let mut vp = minute_at_10px();
        vp.set_scroll(150.0);
        assert_eq!(vp.pixel_for(30_000), 150.0);
        assert_eq!(vp.time_at_pixel(150.0), 30_000);
    }

    #[test]
    fn short_media_uses_minimum_width() {
        let vp = TimelineViewport::new(2_000, 10.0);
        assert_eq!(vp.total_width_px(), MIN_TIMELINE_WIDTH);
        assert_eq!(vp.time_at_pixel(200.0), 1_000);
    }

    #[test]
    fn time_at_pixel_clamps() {
        let vp = minute_at_10px();
        assert_eq!(vp.time_at_pixel(-50.0), 0);
        assert_eq!(vp.time_at_pixel(10_000.0), 60_000);
    }

    #[test]
    fn zero_duration_is_safe() {
        let vp = TimelineViewport::default();
        assert_eq!(vp.time_at_pixel(123.0), 0);
        assert_eq!(vp.pixel_for(0), 0.0);
        assert!(vp.ruler_ticks().is_empty());
    }

    #[test]
    fn rescale_reclamps_scroll() {
        let mut vp = minute_at_10px();
        vp.set_scroll(300.0);
        assert_eq!(vp.scroll_offset(), 300.0);
        // 60 s at 5 px/s is only 300 px; the minimum width takes over.
        assert!(vp.set_scale(5.0));
        assert_eq!(vp.max_scroll(), 100.0);
        assert_eq!(vp.scroll_offset(), 100.0);
    }

    #[test]
    fn resize_reclamps_scroll() {
        let mut vp = minute_at_10px();
        vp.set_scroll(1_000.0);
        assert_eq!(vp.scroll_offset(), 300.0);
        vp.set_viewport_width(700.0);
        assert_eq!(vp.scroll_offset(), 0.0);
    }

    #[test]
    fn invalid_scale_is_ignored() {
        let mut vp = minute_at_10px();
        assert!(!vp.set_scale(0.0));
        assert!(!vp.set_scale(-3.0));
        assert!(!vp.set_scale(f64::NAN));
        assert_eq!(vp.scale(), 10.0);
        vp.set_scale(1e9);
        assert_eq!(vp.scale(), MAX_SCALE);
    }

    #[test]
    fn zoom_keeps_playhead_in_place() {
        let mut vp = minute_at_10px();
        vp.set_position(20_000);
        let before = vp.pixel_for(20_000);
        vp.zoom_by(2.0);
        assert_eq!(vp.scale(), 20.0);
        assert!((vp.pixel_for(20_000) - before).abs() < 1e-6);
    }

    #[test]
    fn follow_playhead_scrolls_minimally() {
        let mut vp = minute_at_10px();
        vp.set_position(45_000); // x = 450, strip is 300 wide
        assert!(vp.follow_playhead());
        assert_eq!(vp.scroll_offset(), 150.0);
        assert!(!vp.follow_playhead());
        vp.set_position(5_000);
        assert!(vp.follow_playhead());
        assert_eq!(vp.scroll_offset(), 50.0);
    }

    #[test]
    fn segment_hit_testing() {
        let mut store = SegmentStore::new();
        store.try_add(10_000, 20_000, "A", None);
        store.try_add(20_000, 30_000, "B", None);
        let vp = minute_at_10px();
        assert_eq!(vp.segment_at_pixel(150.0, &store), Some(0));
        assert_eq!(vp.segment_at_pixel(250.0, &store), Some(1));
        assert_eq!(vp.segment_at_pixel(50.0, &store), None);
        let seg = store.get(1).unwrap();
        assert_eq!(vp.pixel_range_for(seg), (200.0, 300.0));
    }

    #[test]
    fn ruler_ticks_cover_visible_range() {
        let vp = minute_at_10px();
        let ticks = vp.ruler_ticks();
        assert_eq!(vp.tick_step_ms(), 10_000);
        assert_eq!(ticks.first().map(|t| t.time_ms), Some(0));
        assert!(ticks.first().unwrap().major);
        assert_eq!(ticks.last().map(|t| t.time_ms), Some(30_000));
    }
}
