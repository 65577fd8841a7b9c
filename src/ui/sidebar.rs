//! Sidebar navigation - one fixed entry per page

use macroquad::prelude::*;
use super::theme::*;
use super::{draw_icon_centered, Rect, UiContext};

/// Sidebar width in pixels
pub const SIDEBAR_WIDTH: f32 = 220.0;

const BRAND_HEIGHT: f32 = 64.0;
const ENTRY_HEIGHT: f32 = 38.0;
const ICON_SIZE: f32 = 16.0;

/// A navigation entry with icon and label
pub struct NavEntry {
    pub icon: char,
    pub label: &'static str,
}

impl NavEntry {
    pub const fn new(icon: char, label: &'static str) -> Self {
        Self { icon, label }
    }
}

/// Draw the sidebar; returns the index of a newly clicked entry
pub fn draw_sidebar(
    ctx: &mut UiContext,
    rect: Rect,
    entries: &[NavEntry],
    active_index: usize,
    icon_font: Option<&Font>,
) -> Option<usize> {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle(rect.right() - 1.0, rect.y, 1.0, rect.h, BORDER_COLOR);

    // Brand
    let brand = Rect::new(rect.x, rect.y, rect.w, BRAND_HEIGHT);
    let mark = Rect::new(brand.x + 16.0, brand.y + 18.0, 28.0, 28.0);
    draw_rectangle(mark.x, mark.y, mark.w, mark.h, ACCENT_COLOR);
    draw_icon_centered(icon_font, super::icon::BOX, &mark, ICON_SIZE, WHITE);
    draw_text("Studio 3D", mark.right() + 10.0, brand.y + 38.0, FONT_SIZE_HEADER, TEXT_COLOR);
    draw_rectangle(rect.x, brand.bottom() - 1.0, rect.w - 1.0, 1.0, BORDER_COLOR);

    let mut clicked = None;
    for (i, entry) in entries.iter().enumerate() {
        let row = Rect::new(
            rect.x + 8.0,
            brand.bottom() + 12.0 + i as f32 * (ENTRY_HEIGHT + 4.0),
            rect.w - 16.0,
            ENTRY_HEIGHT,
        );
        let active = i == active_index;
        let hovered = ctx.mouse.inside(&row);

        if active {
            draw_rectangle(row.x, row.y, row.w, row.h, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.18));
            draw_rectangle(row.x, row.y, 3.0, row.h, ACCENT_COLOR);
        } else if hovered {
            draw_rectangle(row.x, row.y, row.w, row.h, CARD_HOVER);
        }

        let color = if active { TEXT_COLOR } else { TEXT_MUTED };
        let icon_rect = Rect::new(row.x + 10.0, row.y, ICON_SIZE + 8.0, row.h);
        draw_icon_centered(icon_font, entry.icon, &icon_rect, ICON_SIZE, color);
        draw_text(
            entry.label,
            (icon_rect.right() + 8.0).round(),
            (row.y + row.h * 0.5 + 5.0).round(),
            FONT_SIZE_CONTENT,
            color,
        );

        if hovered && ctx.mouse.left_pressed && !active {
            clicked = Some(i);
        }
    }

    clicked
}
