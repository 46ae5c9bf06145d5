// crates/segmark-core/src/segment.rs
//
// A single labeled time interval plus the small color type attached to it.
// Pure data + interval math; no store, no catalog lookups.

use std::fmt;
use crate::error::ValidationError;

// ── Rgb ───────────────────────────────────────────────────────────────────────

/// Display color for an action label. Written as `#RRGGBB` in catalog files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (any case). Returns `None` for anything else.
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A committed, labeled `[start, end]` interval in milliseconds.
///
/// `start < end` always holds for a segment built through [`Segment::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start:  u64,
    pub end:    u64,
    pub action: String,
    pub color:  Option<Rgb>,
}

impl Segment {
    pub fn new(
        start:  u64,
        end:    u64,
        action: impl Into<String>,
        color:  Option<Rgb>,
    ) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyRange { start, end });
        }
        Ok(Self { start, end, action: action.into(), color })
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }

    /// Closed-interval containment: both edges count as inside.
    pub fn contains(&self, t: u64) -> bool {
        t >= self.start && t <= self.end
    }

    /// True when the two intervals share more than a boundary point.
    /// `a.end == b.start` is adjacency, not overlap.
    pub fn overlaps(&self, other: &Segment) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: u64, end: u64) -> Segment {
        Segment::new(start, end, "jump", None).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert_eq!(
            Segment::new(500, 500, "x", None),
            Err(ValidationError::EmptyRange { start: 500, end: 500 })
        );
        assert!(Segment::new(600, 500, "x", None).is_err());
    }

    #[test]
    fn touching_segments_do_not_overlap() {
        assert!(!seg(0, 1000).overlaps(&seg(1000, 2000)));
        assert!(!seg(1000, 2000).overlaps(&seg(0, 1000)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = seg(0, 1000);
        let b = seg(999, 1500);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Containment counts too.
        assert!(seg(0, 5000).overlaps(&seg(100, 200)));
    }

    #[test]
    fn containment_is_closed() {
        let s = seg(1000, 2000);
        assert!(s.contains(1000));
        assert!(s.contains(2000));
        assert!(!s.contains(999));
        assert!(!s.contains(2001));
        assert_eq!(s.duration(), 1000);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Rgb::from_hex("#00FF00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::from_hex("ff8000"),  Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#12345"),  None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::new(255, 0, 16).to_hex(), "#FF0010");
    }
}
