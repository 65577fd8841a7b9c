//! Basic UI widgets

use macroquad::prelude::*;
use super::{draw_icon_centered, Rect, UiContext};
use super::theme::*;

/// Visual weight of a text button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Ghost,
    Destructive,
}

impl ButtonStyle {
    fn fill(&self) -> Option<Color> {
        match self {
            ButtonStyle::Primary => Some(ACCENT_COLOR),
            ButtonStyle::Secondary => Some(CARD_HOVER),
            ButtonStyle::Ghost => None,
            ButtonStyle::Destructive => Some(DESTRUCTIVE_COLOR),
        }
    }
}

/// Draw a text button, returns true if clicked
pub fn button(ctx: &mut UiContext, rect: Rect, text: &str, style: ButtonStyle) -> bool {
    button_enabled(ctx, rect, text, style, true)
}

/// Draw a text button with enabled state
pub fn button_enabled(ctx: &mut UiContext, rect: Rect, text: &str, style: ButtonStyle, enabled: bool) -> bool {
    let id = ctx.next_id();
    let hovered = enabled && ctx.mouse.inside(&rect);
    let clicked = hovered && ctx.mouse.left_pressed;
    if hovered {
        ctx.set_hot(id);
    }

    let fill = match (enabled, style.fill()) {
        (false, _) => Some(DISABLED_BG),
        (true, Some(c)) if hovered => Some(Color::new(c.r * 1.15, c.g * 1.15, c.b * 1.15, c.a)),
        (true, Some(c)) => Some(c),
        (true, None) if hovered => Some(CARD_HOVER),
        (true, None) => None,
    };
    if let Some(fill) = fill {
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 6.0, fill);
    }
    if style == ButtonStyle::Secondary {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR);
    }

    let text_color = if !enabled {
        TEXT_DIM
    } else if style == ButtonStyle::Ghost {
        TEXT_MUTED
    } else {
        WHITE
    };
    draw_text_centered(text, &rect, FONT_SIZE_CONTENT, text_color);

    clicked
}

/// Square icon button; shows `fallback` text when no icon font is loaded
pub fn icon_button(
    ctx: &mut UiContext,
    rect: Rect,
    icon: char,
    icon_font: Option<&Font>,
    fallback: &str,
    tooltip: &str,
    hover_color: Color,
) -> bool {
    let id = ctx.next_id();
    let hovered = ctx.mouse.inside(&rect);
    let clicked = ctx.mouse.clicked(&rect);

    if hovered {
        ctx.set_hot(id);
        if !tooltip.is_empty() {
            ctx.set_tooltip(tooltip, ctx.mouse.x, ctx.mouse.y);
        }
        draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, Color::new(hover_color.r, hover_color.g, hover_color.b, 0.25));
    }

    let color = if hovered { hover_color } else { TEXT_MUTED };
    if icon_font.is_some() {
        draw_icon_centered(icon_font, icon, &rect, (rect.h * 0.55).min(16.0), color);
    } else {
        draw_text_centered(fallback, &rect, FONT_SIZE_SMALL, color);
    }

    clicked
}

/// Draw a rounded rectangle (simple approximation using overlapping rects)
pub fn draw_rounded_rect(x: f32, y: f32, w: f32, h: f32, r: f32, color: Color) {
    let r = r.min(w * 0.5).min(h * 0.5);
    draw_rectangle(x + r, y, w - r * 2.0, h, color);
    draw_rectangle(x, y + r, w, h - r * 2.0, color);
    draw_circle(x + r, y + r, r, color);
    draw_circle(x + w - r, y + r, r, color);
    draw_circle(x + r, y + h - r, r, color);
    draw_circle(x + w - r, y + h - r, r, color);
}

/// Card background with border; returns true while hovered
pub fn card(ctx: &UiContext, rect: Rect) -> bool {
    let hovered = ctx.mouse.inside(&rect);
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, if hovered { CARD_HOVER } else { CARD_BG });
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR);
    hovered
}

/// Rounded pill with text; returns its width
pub fn badge(x: f32, y: f32, text: &str, bg: Color, fg: Color) -> f32 {
    let dims = measure_text(text, None, FONT_SIZE_SMALL as u16, 1.0);
    let w = dims.width + 14.0;
    let h = 20.0;
    draw_rounded_rect(x, y, w, h, 9.0, bg);
    draw_text(text, (x + 7.0).round(), (y + (h + dims.height) * 0.5 - 1.0).round(), FONT_SIZE_SMALL, fg);
    w
}

/// Text centered in a rect
pub fn draw_text_centered(text: &str, rect: &Rect, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    let tx = rect.x + (rect.w - dims.width) * 0.5;
    let ty = rect.y + (rect.h + dims.height) * 0.5 - 1.0;
    draw_text(text, tx.round(), ty.round(), font_size, color);
}

pub fn text_width(text: &str, font_size: f32) -> f32 {
    measure_text(text, None, font_size as u16, 1.0).width
}

/// Shorten `text` with an ellipsis so it fits in `max_w`
pub fn truncate_text(text: &str, max_w: f32, font_size: f32) -> String {
    if text_width(text, font_size) <= max_w {
        return text.to_string();
    }
    let mut out: String = text.to_string();
    while !out.is_empty() {
        out.pop();
        let candidate = format!("{}...", out);
        if text_width(&candidate, font_size) <= max_w {
            return candidate;
        }
    }
    String::new()
}

/// Segmented picker over a fixed set of options; returns true on change
pub fn option_picker<T: Copy + PartialEq>(ctx: &mut UiContext, rect: Rect, options: &[(T, &str)], selected: &mut T) -> bool {
    if options.is_empty() {
        return false;
    }
    let mut changed = false;
    let seg_w = rect.w / options.len() as f32;
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR);

    for (i, (value, label)) in options.iter().enumerate() {
        let seg = Rect::new(rect.x + i as f32 * seg_w, rect.y, seg_w, rect.h);
        let active = *value == *selected;
        let hovered = ctx.mouse.inside(&seg);
        if active {
            draw_rectangle(seg.x + 1.0, seg.y + 1.0, seg.w - 2.0, seg.h - 2.0, ACCENT_COLOR);
        } else if hovered {
            draw_rectangle(seg.x + 1.0, seg.y + 1.0, seg.w - 2.0, seg.h - 2.0, CARD_HOVER);
        }
        draw_text_centered(label, &seg, FONT_SIZE_SMALL, if active { WHITE } else { TEXT_MUTED });
        if hovered && ctx.mouse.left_pressed && !active {
            *selected = *value;
            changed = true;
        }
    }
    changed
}

/// Color swatch; returns true when clicked
pub fn color_swatch(ctx: &mut UiContext, rect: Rect, color: Color, selected: bool) -> bool {
    draw_rounded_rect(rect.x, rect.y, rect.w, rect.h, 4.0, color);
    if selected {
        draw_rectangle_lines(rect.x - 2.0, rect.y - 2.0, rect.w + 4.0, rect.h + 4.0, 2.0, WHITE);
    } else if ctx.mouse.inside(&rect) {
        draw_rectangle_lines(rect.x - 1.0, rect.y - 1.0, rect.w + 2.0, rect.h + 2.0, 1.0, TEXT_MUTED);
    }
    ctx.mouse.clicked(&rect)
}

/// Pulsing placeholder block shown while a query loads
pub fn skeleton(rect: Rect, time: f64) {
    let pulse = 0.5 + 0.5 * (time * 3.0).sin() as f32;
    let shade = 0.12 + 0.04 * pulse;
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(shade, shade, shade + 0.02, 1.0));
}

/// Label drawn above a form field
pub fn field_label(x: f32, y: f32, text: &str) {
    draw_text(text, x.round(), y.round(), FONT_SIZE_SMALL, TEXT_MUTED);
}

/// Validation message drawn under a form field
pub fn field_error(x: f32, y: f32, message: Option<&str>) {
    if let Some(message) = message {
        draw_text(message, x.round(), y.round(), FONT_SIZE_SMALL, DESTRUCTIVE_COLOR);
    }
}

/// Draw the tooltip requested this frame (call last)
pub fn draw_tooltip(ctx: &UiContext) {
    let Some((text, mx, my)) = ctx.tooltip() else {
        return;
    };
    let dims = measure_text(text, None, FONT_SIZE_SMALL as u16, 1.0);
    let w = dims.width + 12.0;
    let h = 22.0;
    let x = (mx + 12.0).min(screen_width() - w - 4.0);
    let y = (my + 16.0).min(screen_height() - h - 4.0);
    draw_rectangle(x, y, w, h, PANEL_BG);
    draw_rectangle_lines(x, y, w, h, 1.0, BORDER_COLOR);
    draw_text(text, x + 6.0, y + 15.0, FONT_SIZE_SMALL, TEXT_COLOR);
}
