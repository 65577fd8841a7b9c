//! Modal dialog frame
//!
//! Draw the page underneath with input suspended, then call `begin_dialog`
//! with input resumed. The frame darkens the screen, draws the box and
//! header, and hands back the content area.

use macroquad::prelude::*;
use super::theme::*;
use super::{draw_icon_centered, icon, Rect, UiContext};

const HEADER_HEIGHT: f32 = 40.0;

/// Result of drawing a dialog frame
pub struct DialogFrame {
    /// Area below the header for the dialog body
    pub content: Rect,
    /// Close button clicked or Escape pressed
    pub close: bool,
}

/// Draw a centered modal frame of (at most) `w` x `h`
pub fn begin_dialog(ctx: &mut UiContext, title: &str, w: f32, h: f32, icon_font: Option<&Font>) -> DialogFrame {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), MODAL_SHADE);

    let w = w.min(screen_width() - 32.0);
    let h = h.min(screen_height() - 32.0);
    let frame = Rect::screen(screen_width(), screen_height()).centered(w, h);

    draw_rectangle(frame.x, frame.y, frame.w, frame.h, Color::from_rgba(35, 35, 40, 255));
    draw_rectangle_lines(frame.x, frame.y, frame.w, frame.h, 2.0, Color::from_rgba(60, 60, 70, 255));

    draw_rectangle(frame.x, frame.y, frame.w, HEADER_HEIGHT, Color::from_rgba(45, 45, 55, 255));
    draw_text(title, frame.x + 16.0, frame.y + 26.0, 20.0, WHITE);

    let close_rect = Rect::new(frame.right() - 36.0, frame.y + 4.0, 32.0, 32.0);
    let close_hovered = ctx.mouse.inside(&close_rect);
    if close_hovered {
        draw_rectangle(close_rect.x, close_rect.y, close_rect.w, close_rect.h, Color::from_rgba(80, 40, 40, 255));
    }
    let close_color = if close_hovered { WHITE } else { TEXT_MUTED };
    if icon_font.is_some() {
        draw_icon_centered(icon_font, icon::CIRCLE_X, &close_rect, 16.0, close_color);
    } else {
        super::draw_text_centered("x", &close_rect, FONT_SIZE_HEADER, close_color);
    }

    let close = ctx.mouse.clicked(&close_rect) || is_key_pressed(KeyCode::Escape);

    DialogFrame {
        content: Rect::new(frame.x, frame.y + HEADER_HEIGHT, frame.w, frame.h - HEADER_HEIGHT).pad(16.0),
        close,
    }
}

/// Two-button footer (cancel on the left, confirm on the right).
/// Returns (cancel_clicked, confirm_clicked).
pub fn dialog_footer(
    ctx: &mut UiContext,
    content: Rect,
    confirm_label: &str,
    confirm_style: super::ButtonStyle,
    confirm_enabled: bool,
) -> (bool, bool) {
    let row = content.slice_bottom(36.0);
    let confirm_w = super::text_width(confirm_label, FONT_SIZE_CONTENT).max(60.0) + 32.0;
    let confirm = Rect::new(row.right() - confirm_w, row.y, confirm_w, row.h);
    let cancel = Rect::new(confirm.x - 98.0, row.y, 90.0, row.h);

    let cancelled = super::button(ctx, cancel, "Cancel", super::ButtonStyle::Secondary);
    let confirmed = super::button_enabled(ctx, confirm, confirm_label, confirm_style, confirm_enabled);
    (cancelled, confirmed)
}
