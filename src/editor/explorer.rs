//! Scene explorer: object list and designer overview

use macroquad::prelude::*;

use crate::model::{AppObject, Designer};
use crate::query::QueryClient;
use crate::ui::{
    badge, button, draw_icon_centered, icon, option_picker, truncate_text, ButtonStyle, Rect, UiContext,
    ACCENT_COLOR, BORDER_COLOR, CARD_BG, CARD_HOVER, FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL,
    PANEL_BG, TEXT_COLOR, TEXT_DIM, TEXT_MUTED,
};
use super::actions;
use super::state::{random_spot, EditorState, ExplorerTab};

const ROW_HEIGHT: f32 = 54.0;
const ROW_GAP: f32 = 8.0;

/// Subtitle under an object name, e.g. "Normal • Alice Johnson"
pub fn object_subtitle(object: &AppObject, designers: &[Designer]) -> String {
    let owner = designers
        .iter()
        .find(|d| d.id == object.designer_id)
        .map_or("Unknown", |d| d.full_name.as_str());
    format!("{} • {}", object.size.label(), owner)
}

pub fn draw_explorer(
    ctx: &mut UiContext,
    rect: Rect,
    state: &mut EditorState,
    objects: &[AppObject],
    designers: &[Designer],
    query: &mut QueryClient,
    icon_font: Option<&Font>,
) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle(rect.right() - 1.0, rect.y, 1.0, rect.h, BORDER_COLOR);

    // Header
    let header = rect.slice_top(52.0);
    let icon_rect = Rect::new(header.x + 14.0, header.y + 14.0, 22.0, 24.0);
    draw_icon_centered(icon_font, icon::BOX, &icon_rect, 16.0, ACCENT_COLOR);
    let title_x = if icon_font.is_some() { icon_rect.right() + 6.0 } else { header.x + 16.0 };
    draw_text("Scene Explorer", title_x, header.y + 32.0, FONT_SIZE_HEADER, TEXT_COLOR);
    if query.objects().is_fetching() {
        let dims = measure_text("Syncing...", None, FONT_SIZE_CONTENT as u16, 1.0);
        draw_text("Syncing...", header.right() - dims.width - 14.0, header.y + 32.0, FONT_SIZE_CONTENT, TEXT_MUTED);
    }
    draw_rectangle(rect.x, header.bottom() - 1.0, rect.w, 1.0, BORDER_COLOR);

    // Tabs
    let body = rect.remaining_after_top(52.0).pad(14.0);
    let tabs = body.slice_top(30.0);
    let previous = state.explorer_tab;
    option_picker(
        ctx,
        tabs,
        &[(ExplorerTab::Objects, "Objects"), (ExplorerTab::Designers, "Designers")],
        &mut state.explorer_tab,
    );
    if state.explorer_tab != previous {
        state.explorer_scroll = 0.0;
    }

    let content = body.remaining_after_top(42.0);
    match state.explorer_tab {
        ExplorerTab::Objects => {
            let footer = content.slice_bottom(36.0);
            let list = Rect::new(content.x, content.y, content.w, content.h - 48.0);
            draw_object_list(ctx, list, state, objects, designers);
            if button(ctx, footer, "+  Add Object", ButtonStyle::Primary) {
                state.open_create(random_spot(), designers, query);
            }
            if ctx.mouse.inside(&footer) {
                ctx.set_tooltip(&state.actions.tooltip(actions::ADD), ctx.mouse.x, ctx.mouse.y);
            }
        }
        ExplorerTab::Designers => draw_designer_list(ctx, content, state, designers),
    }
}

/// Scroll the explorer list; returns the first row's y
fn scrolled_top(ctx: &UiContext, list: Rect, state: &mut EditorState, rows: usize) -> f32 {
    let total = rows as f32 * (ROW_HEIGHT + ROW_GAP);
    let max_scroll = (total - list.h).max(0.0);
    if ctx.mouse.inside(&list) && ctx.mouse.scroll != 0.0 {
        state.explorer_scroll -= ctx.mouse.scroll.signum() * (ROW_HEIGHT + ROW_GAP);
    }
    state.explorer_scroll = state.explorer_scroll.clamp(0.0, max_scroll);
    list.y - state.explorer_scroll
}

fn draw_object_list(ctx: &mut UiContext, list: Rect, state: &mut EditorState, objects: &[AppObject], designers: &[Designer]) {
    if objects.is_empty() {
        let cx = list.center_x();
        for (i, line) in ["No objects in scene.", "Double click the grid to add one."].iter().enumerate() {
            let w = crate::ui::text_width(line, FONT_SIZE_SMALL);
            draw_text(line, (cx - w * 0.5).round(), list.y + 40.0 + i as f32 * 20.0, FONT_SIZE_SMALL, TEXT_MUTED);
        }
        return;
    }

    let mut y = scrolled_top(ctx, list, state, objects.len());
    let mut clicked = None;
    for object in objects {
        let row = Rect::new(list.x, y, list.w, ROW_HEIGHT);
        y += ROW_HEIGHT + ROW_GAP;
        if row.y < list.y || row.bottom() > list.bottom() {
            continue;
        }

        let selected = state.is_selected(&object.id);
        let hovered = ctx.mouse.inside(&row);
        let bg = if selected {
            Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.12)
        } else if hovered {
            CARD_HOVER
        } else {
            CARD_BG
        };
        draw_rectangle(row.x, row.y, row.w, row.h, bg);
        if selected {
            draw_rectangle_lines(row.x, row.y, row.w, row.h, 1.0, ACCENT_COLOR);
        }

        draw_circle(row.x + 16.0, row.center_y(), 6.0, object.render_color());
        let text_w = row.w - 60.0;
        let name = truncate_text(&object.name, text_w, FONT_SIZE_CONTENT);
        draw_text(&name, row.x + 32.0, row.y + 22.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        let subtitle = truncate_text(&object_subtitle(object, designers), text_w, FONT_SIZE_SMALL);
        draw_text(&subtitle, row.x + 32.0, row.y + 41.0, FONT_SIZE_SMALL, TEXT_MUTED);
        if selected {
            draw_text("*", row.right() - 20.0, row.y + 32.0, FONT_SIZE_HEADER, ACCENT_COLOR);
        }

        if hovered && ctx.mouse.left_pressed {
            clicked = Some(object.id.clone());
        }
    }

    if let Some(id) = clicked {
        state.select(Some(&id), objects);
    }
}

fn draw_designer_list(ctx: &mut UiContext, list: Rect, state: &mut EditorState, designers: &[Designer]) {
    if designers.is_empty() {
        draw_text("No designers yet.", list.x + 4.0, list.y + 24.0, FONT_SIZE_SMALL, TEXT_DIM);
        return;
    }

    let mut y = scrolled_top(ctx, list, state, designers.len());
    for designer in designers {
        let row = Rect::new(list.x, y, list.w, ROW_HEIGHT);
        y += ROW_HEIGHT + ROW_GAP;
        if row.y < list.y || row.bottom() > list.bottom() {
            continue;
        }

        draw_rectangle(row.x, row.y, row.w, row.h, CARD_BG);
        draw_rectangle_lines(row.x, row.y, row.w, row.h, 1.0, BORDER_COLOR);

        let count = format!("{} items", designer.attached_objects_count);
        let count_w = crate::ui::text_width(&count, FONT_SIZE_SMALL) + 14.0;
        let name = truncate_text(&designer.full_name, row.w - count_w - 36.0, FONT_SIZE_CONTENT);
        draw_text(&name, row.x + 12.0, row.y + 22.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        badge(row.right() - count_w - 10.0, row.y + 8.0, &count, CARD_HOVER, TEXT_MUTED);
        draw_text(&designer.availability_label(), row.x + 12.0, row.y + 42.0, FONT_SIZE_SMALL, TEXT_MUTED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Shape, SizeClass};

    #[test]
    fn test_object_subtitle() {
        let designers = vec![Designer {
            id: "d1".to_string(),
            full_name: "Alice Johnson".to_string(),
            working_hours_from: 9,
            working_hours_to: 17,
            attached_objects_count: 1,
            created_at: 0,
        }];
        let mut object = AppObject {
            id: "o1".to_string(),
            name: "Lamp".to_string(),
            designer_id: "d1".to_string(),
            color: "#ffffff".to_string(),
            shape: Shape::Sphere,
            size: SizeClass::Small,
            position: [0.0; 3],
            created_at: 0,
        };
        assert_eq!(object_subtitle(&object, &designers), "Small • Alice Johnson");
        object.designer_id = "gone".to_string();
        assert_eq!(object_subtitle(&object, &designers), "Small • Unknown");
    }
}
