// LsViz - ui/theme.rs
//
// Visual style, icon glyphs, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{IconKind, SortOrder};
use egui::Color32;

/// Status bar colours.
pub const STATUS_BG: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const STATUS_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300
pub const WARNING_TEXT: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Layout constants.
pub const ROW_HEIGHT: f32 = 20.0;
pub const INDENT_WIDTH: f32 = 16.0;
pub const TOGGLE_WIDTH: f32 = 18.0;
pub const ICON_WIDTH: f32 = 22.0;
pub const MIN_NAME_TEXT_WIDTH: f32 = 40.0;
pub const SIZE_COLUMN_WIDTH: f32 = 120.0;
pub const MODIFIED_COLUMN_WIDTH: f32 = 130.0;
pub const PERMISSIONS_COLUMN_WIDTH: f32 = 100.0;
pub const OWNER_COLUMN_WIDTH: f32 = 180.0;

/// Apply theme and font size to the egui context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_theme(if dark_mode {
        egui::Theme::Dark
    } else {
        egui::Theme::Light
    });
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Small => font_size * 0.8,
                egui::TextStyle::Heading => font_size * 1.4,
                _ => font_size,
            };
        }
    });
}

/// Glyph drawn before an item's name.
pub fn icon_glyph(kind: &IconKind) -> &'static str {
    match kind {
        IconKind::Directory => "\u{1F4C1}",
        IconKind::File => "\u{1F4C4}",
        IconKind::FileWithExtension(ext) => match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" => "\u{1F4CA}",
            "txt" | "log" | "md" => "\u{1F4DD}",
            "gz" | "bz2" | "zip" | "tar" | "snappy" | "lz4" | "zst" => "\u{1F4E6}",
            "parquet" | "orc" | "avro" | "seq" => "\u{1F5C4}",
            "jar" | "py" | "sh" | "sql" => "\u{2699}",
            _ => "\u{1F4C4}",
        },
    }
}

/// Arrow shown next to the sorted column's title.
pub fn sort_indicator(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Ascending => "\u{25B2}",
        SortOrder::Descending => "\u{25BC}",
    }
}

/// Disclosure triangle for a directory row.
pub fn toggle_glyph(expanded: bool) -> &'static str {
    if expanded {
        "\u{25BE}"
    } else {
        "\u{25B8}"
    }
}
