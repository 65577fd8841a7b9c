//! Lucide icon support
//!
//! Uses the Lucide icon font for crisp vector icons at any size. The font is
//! optional; without it icons are skipped and buttons fall back to text.

use macroquad::prelude::*;

/// Where the icon font is looked up at startup
pub const ICON_FONT_PATH: &str = "assets/runtime/fonts/lucide.ttf";

/// Lucide icon codepoints
pub mod icon {
    pub const HOUSE: char = '\u{e0f5}';
    pub const USERS: char = '\u{e1a4}';
    pub const BOX: char = '\u{e061}';
    pub const LAYERS: char = '\u{e529}';
    pub const PLUS: char = '\u{e13d}';
    pub const PENCIL: char = '\u{e1f9}';
    pub const TRASH: char = '\u{e18e}';
    pub const SEARCH: char = '\u{e155}';
    pub const CIRCLE_X: char = '\u{e084}';
    pub const CLOCK: char = '\u{e087}';
    pub const GRID: char = '\u{e0e9}';
}

/// Load the icon font, if present
pub async fn load_icon_font() -> Option<Font> {
    match load_ttf_font(ICON_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("Icon font unavailable ({}): {}", ICON_FONT_PATH, e);
            None
        }
    }
}

/// Draw a Lucide icon centered in a rect
pub fn draw_icon_centered(font: Option<&Font>, icon: char, rect: &super::Rect, size: f32, color: Color) {
    // The default font has no glyphs in the private-use range
    let Some(font) = font else {
        return;
    };

    // Icon glyphs are square, baseline at the bottom
    let x = rect.x + (rect.w - size) * 0.5;
    let y = rect.y + (rect.h + size) * 0.5;

    // Round to integer pixels to avoid blurry subpixel rendering
    draw_text_ex(
        &icon.to_string(),
        x.round(),
        y.round(),
        TextParams {
            font: Some(font),
            font_size: size as u16,
            color,
            ..Default::default()
        },
    );
}
