//! Object form fields and the property panel

use macroquad::prelude::*;

use crate::forms::object_form::{FIELD_COLOR, FIELD_DESIGNER, FIELD_NAME};
use crate::forms::{ObjectForm, COLOR_SWATCHES};
use crate::model::{parse_hex_color, Designer, Shape, SizeClass};
use crate::query::{MutationKind, QueryClient};
use crate::ui::{
    button, button_enabled, color_swatch, draw_text_input, field_error, field_label, icon, icon_button,
    option_picker, text_width, truncate_text, ButtonStyle, Rect, UiContext, BORDER_COLOR, DISABLED_BG,
    FONT_SIZE_HEADER, FONT_SIZE_SMALL, PANEL_BG, TEXT_COLOR, TEXT_DIM, TEXT_MUTED,
};
use super::actions;
use super::state::EditorState;

const INPUT_HEIGHT: f32 = 32.0;
const LABEL_GAP: f32 = 18.0;
const ERROR_GAP: f32 = 18.0;
const CHIP_HEIGHT: f32 = 24.0;

/// Draw every field of an object form from `rect.y` down; returns the y below the last field
pub fn draw_object_fields(ctx: &mut UiContext, rect: Rect, form: &mut ObjectForm, designers: &[Designer]) -> f32 {
    let x = rect.x;
    let w = rect.w;
    let mut y = rect.y;

    // Name
    field_label(x, y + 12.0, "Name");
    y += LABEL_GAP;
    draw_text_input(ctx, Rect::new(x, y, w, INPUT_HEIGHT), &mut form.name, "e.g. Red Cube", form.errors.get(FIELD_NAME).is_some());
    y += INPUT_HEIGHT;
    field_error(x, y + 13.0, form.errors.get(FIELD_NAME));
    y += ERROR_GAP;

    // Designer chips, wrapped
    field_label(x, y + 12.0, "Designer");
    y += LABEL_GAP;
    let mut cx = x;
    for designer in designers {
        let chip_w = text_width(&designer.full_name, FONT_SIZE_SMALL) + 20.0;
        if cx + chip_w > x + w && cx > x {
            cx = x;
            y += CHIP_HEIGHT + 6.0;
        }
        let chip = Rect::new(cx, y, chip_w.min(w), CHIP_HEIGHT);
        let selected = form.designer_id == designer.id;
        let style = if selected { ButtonStyle::Primary } else { ButtonStyle::Secondary };
        let label = truncate_text(&designer.full_name, chip.w - 12.0, FONT_SIZE_SMALL);
        if button(ctx, chip, &label, style) {
            form.designer_id = designer.id.clone();
        }
        cx += chip.w + 6.0;
    }
    if designers.is_empty() {
        draw_text("No designers yet", x, y + 16.0, FONT_SIZE_SMALL, TEXT_DIM);
    }
    y += CHIP_HEIGHT;
    field_error(x, y + 13.0, form.errors.get(FIELD_DESIGNER));
    y += ERROR_GAP;

    // Shape and size
    field_label(x, y + 12.0, "Shape");
    y += LABEL_GAP;
    let shapes: Vec<(Shape, &str)> = Shape::ALL.iter().map(|s| (*s, s.label())).collect();
    option_picker(ctx, Rect::new(x, y, w, 28.0), &shapes, &mut form.shape);
    y += 28.0 + 10.0;

    field_label(x, y + 12.0, "Size");
    y += LABEL_GAP;
    let sizes: Vec<(SizeClass, &str)> = SizeClass::ALL.iter().map(|s| (*s, s.label())).collect();
    option_picker(ctx, Rect::new(x, y, w, 28.0), &sizes, &mut form.size);
    y += 28.0 + 10.0;

    // Color: hex input and swatches
    field_label(x, y + 12.0, "Color");
    y += LABEL_GAP;
    let preview = parse_hex_color(form.color.text.trim()).unwrap_or(DISABLED_BG);
    draw_rectangle(x, y, INPUT_HEIGHT, INPUT_HEIGHT, preview);
    draw_rectangle_lines(x, y, INPUT_HEIGHT, INPUT_HEIGHT, 1.0, BORDER_COLOR);
    draw_text_input(
        ctx,
        Rect::new(x + INPUT_HEIGHT + 6.0, y, w - INPUT_HEIGHT - 6.0, INPUT_HEIGHT),
        &mut form.color,
        "#3b82f6",
        form.errors.get(FIELD_COLOR).is_some(),
    );
    y += INPUT_HEIGHT + 6.0;
    let swatch = ((w - 7.0 * 6.0) / COLOR_SWATCHES.len() as f32).min(22.0);
    let current = form.color.text.trim().to_ascii_lowercase();
    for (i, hex) in COLOR_SWATCHES.iter().enumerate() {
        let rect = Rect::new(x + i as f32 * (swatch + 6.0), y, swatch, swatch);
        let color = parse_hex_color(hex).unwrap_or(WHITE);
        if color_swatch(ctx, rect, color, current == *hex) {
            form.set_color(hex);
        }
    }
    y += swatch;
    field_error(x, y + 13.0, form.errors.get(FIELD_COLOR));
    y += ERROR_GAP;

    y
}

/// Right-hand property panel for the selected object
pub fn draw_properties_panel(
    ctx: &mut UiContext,
    rect: Rect,
    state: &mut EditorState,
    designers: &[Designer],
    query: &mut QueryClient,
    icon_font: Option<&Font>,
) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle(rect.x, rect.y, 1.0, rect.h, BORDER_COLOR);

    let header = rect.slice_top(52.0);
    draw_text("Properties", header.x + 16.0, header.y + 32.0, FONT_SIZE_HEADER, TEXT_COLOR);
    let close = Rect::new(header.right() - 40.0, header.y + 12.0, 28.0, 28.0);
    if icon_button(ctx, close, icon::CIRCLE_X, icon_font, "x", "Deselect", TEXT_COLOR) {
        state.clear_selection();
        return;
    }
    draw_rectangle(rect.x, header.bottom() - 1.0, rect.w, 1.0, BORDER_COLOR);

    let Some(form) = state.properties.as_mut() else {
        return;
    };
    let body = rect.remaining_after_top(52.0).pad(16.0);
    let mut y = draw_object_fields(ctx, body, form, designers);

    let saving = query.is_mutating(MutationKind::UpdateObject);
    let label = if saving { "Saving..." } else { "Update Object" };
    if button_enabled(ctx, Rect::new(body.x, y, body.w, 34.0), label, ButtonStyle::Primary, !saving) {
        state.submit_properties(designers, query);
    }
    y += 34.0 + 24.0;

    draw_rectangle(body.x, y, body.w, 1.0, BORDER_COLOR);
    y += 16.0;
    draw_text("Actions", body.x, y + 12.0, FONT_SIZE_SMALL, TEXT_MUTED);
    y += 22.0;
    let deleting = query.is_mutating(MutationKind::DeleteObject);
    let delete_rect = Rect::new(body.x, y, body.w, 34.0);
    if button_enabled(ctx, delete_rect, "Delete Object", ButtonStyle::Destructive, !deleting) {
        state.delete_selected(query);
    }
    if ctx.mouse.inside(&delete_rect) {
        ctx.set_tooltip(&state.actions.tooltip(actions::DELETE), ctx.mouse.x, ctx.mouse.y);
    }
}
