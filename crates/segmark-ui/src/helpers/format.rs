// crates/segmark-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in segmark-core.
//
// Time formatting lives in segmark_core::timecode. This module holds helpers
// that only make sense when painting text into a fixed pixel budget.

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (11px proportional ≈ 6.5 px/char average). Appends "…" when
/// truncated. Avoids egui font measurement, which requires `&mut Fonts`.
///
/// Used for segment labels on the timeline strip.
pub fn fit_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 6.5;
    const ELLIPSIS: &str = "…";
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let keep = max_chars.saturating_sub(1);
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}

/// "clip.mp4", or a placeholder when nothing is open.
pub fn file_label(path: Option<&std::path::Path>) -> String {
    path.and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "No video".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_label("Axel", 200.0), "Axel");
    }

    #[test]
    fn zero_budget_returns_empty() {
        assert_eq!(fit_label("Axel", 0.0), "");
    }

    #[test]
    fn truncated_text_has_ellipsis() {
        let result = fit_label("Triple Toe Loop", 30.0);
        assert_eq!(result, "Tri…");
    }

    #[test]
    fn file_label_uses_name_only() {
        assert_eq!(file_label(Some(Path::new("/videos/skate.mp4"))), "skate.mp4");
        assert_eq!(file_label(None), "No video");
    }
}
