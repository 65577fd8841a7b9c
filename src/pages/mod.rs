//! Full-screen pages reached from the sidebar (the editor lives in `editor`)

mod dashboard;
mod designers;

pub use dashboard::draw_dashboard;
pub use designers::DesignersPage;

use macroquad::prelude::*;
use crate::ui::{Rect, FONT_SIZE_CONTENT, FONT_SIZE_TITLE, TEXT_COLOR, TEXT_MUTED};

/// Horizontal and top padding around page content
pub const PAGE_PADDING: f32 = 32.0;

/// Page title and subtitle; returns the area below them
fn page_header(rect: Rect, title: &str, subtitle: &str) -> Rect {
    draw_text(title, rect.x, rect.y + 28.0, FONT_SIZE_TITLE, TEXT_COLOR);
    draw_text(subtitle, rect.x, rect.y + 54.0, FONT_SIZE_CONTENT, TEXT_MUTED);
    rect.remaining_after_top(84.0)
}
