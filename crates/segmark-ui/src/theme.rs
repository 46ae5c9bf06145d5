// crates/segmark-ui/src/theme.rs
use egui::{Context, Color32, Stroke, Visuals, Style};
use segmark_core::commands::NoticeLevel;
use segmark_core::segment::Rgb;

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 80, 200, 190);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 30, 120, 115);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(130, 225, 215);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 14,  14,  16);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 20,  20,  24);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  28,  34);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 38,  38,  46);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 50,  50,  60);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(220, 220, 230);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(120, 120, 138);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 55,  55,  68);

pub const PLAYHEAD:      Color32 = Color32::from_rgb(255, 160,  50);
pub const IN_MARKER:     Color32 = Color32::from_rgb(110, 220, 110);
pub const OVERLAP:       Color32 = Color32::from_rgb(235,  60,  60);

pub const NOTICE_INFO:   Color32 = Color32::from_rgb(100, 220, 100);
pub const NOTICE_WARN:   Color32 = Color32::from_rgb(240, 190,  60);
pub const NOTICE_ERROR:  Color32 = Color32::from_rgb(240,  90,  80);

pub fn segment_color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info    => NOTICE_INFO,
        NoticeLevel::Warning => NOTICE_WARN,
        NoticeLevel::Error   => NOTICE_ERROR,
    }
}

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(6.0, 5.0);
    style.spacing.window_margin    = egui::Margin::same(10);
    style.spacing.button_padding   = egui::vec2(10.0, 5.0);
    style.spacing.scroll.bar_width = 8.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill       = DARK_BG_1;
    v.window_fill      = DARK_BG_2;
    v.faint_bg_color   = DARK_BG_0;
    v.extreme_bg_color = DARK_BG_0;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);
    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, ACCENT_HOVER);

    for (w, fill, stroke) in [
        (&mut v.widgets.noninteractive, DARK_BG_2,  Stroke::new(1.0, DARK_BORDER)),
        (&mut v.widgets.inactive,       DARK_BG_3,  Stroke::new(1.0, DARK_BORDER)),
        (&mut v.widgets.hovered,        DARK_BG_4,  Stroke::new(1.0, ACCENT_DIM)),
        (&mut v.widgets.active,         ACCENT_DIM, Stroke::new(1.0, ACCENT)),
        (&mut v.widgets.open,           DARK_BG_4,  Stroke::new(1.0, ACCENT_DIM)),
    ] {
        w.bg_fill       = fill;
        w.bg_stroke     = stroke;
        w.corner_radius = cr;
    }
    v.widgets.noninteractive.fg_stroke = Stroke::new(1.0, DARK_TEXT_DIM);
    v.widgets.inactive.fg_stroke       = Stroke::new(1.0, DARK_TEXT);
    v.widgets.hovered.fg_stroke        = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.active.fg_stroke         = Stroke::new(2.0, Color32::WHITE);
    v.widgets.open.fg_stroke           = Stroke::new(1.5, ACCENT_HOVER);

    v.window_corner_radius = cr;
    v.menu_corner_radius   = cr;
    v.override_text_color  = Some(DARK_TEXT);

    // Style carries its own Visuals; install both in one call so neither
    // overwrites the other.
    style.visuals = v;
    ctx.set_style(style);
}
