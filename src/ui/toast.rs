//! Toast overlay, stacked in the bottom-right corner

use macroquad::prelude::*;
use crate::query::{ToastVariant, Toasts};
use super::theme::*;
use super::{Rect, UiContext};

const TOAST_WIDTH: f32 = 320.0;
const TOAST_HEIGHT: f32 = 58.0;
const MARGIN: f32 = 16.0;

/// Draw visible toasts; clicking one dismisses it
pub fn draw_toasts(ctx: &mut UiContext, toasts: &mut Toasts) {
    let mut dismissed = None;
    let mut y = screen_height() - MARGIN - TOAST_HEIGHT;
    let x = screen_width() - MARGIN - TOAST_WIDTH;

    // Newest at the bottom
    for toast in toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        let rect = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);
        let (bg, border) = match toast.variant {
            ToastVariant::Default => (CARD_BG, BORDER_COLOR),
            ToastVariant::Destructive => (Color::new(0.35, 0.08, 0.08, 1.0), DESTRUCTIVE_COLOR),
        };
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, bg);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);
        draw_text(&toast.title, rect.x + 12.0, rect.y + 22.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        let description = super::truncate_text(&toast.description, rect.w - 24.0, FONT_SIZE_SMALL);
        draw_text(&description, rect.x + 12.0, rect.y + 42.0, FONT_SIZE_SMALL, TEXT_MUTED);

        if ctx.mouse.clicked(&rect) {
            dismissed = Some(toast.id);
        }
        y -= TOAST_HEIGHT + 8.0;
    }

    if let Some(id) = dismissed {
        toasts.dismiss(id);
    }
}
