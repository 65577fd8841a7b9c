//! Dashboard: headline numbers, recent objects and team workload

use macroquad::prelude::*;

use crate::app::Page;
use crate::model::{AppObject, Designer};
use crate::query::QueryClient;
use crate::ui::{
    button, card, draw_icon_centered, draw_rounded_rect, icon, skeleton, text_width, truncate_text, ButtonStyle,
    Rect, UiContext, ACCENT_COLOR, BORDER_COLOR, FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL,
    FONT_SIZE_TITLE, TEXT_COLOR, TEXT_DIM, TEXT_MUTED,
};
use super::{page_header, PAGE_PADDING};

const STAT_HEIGHT: f32 = 104.0;
const GAP: f32 = 24.0;
const RECENT_LIMIT: usize = 5;
const ACTIVITY_ROW: f32 = 52.0;
const WORKLOAD_ROW: f32 = 44.0;

/// Mean availability window, rounded to whole hours ("0h" with no designers)
pub fn average_availability(designers: &[Designer]) -> String {
    if designers.is_empty() {
        return "0h".to_string();
    }
    let total: u32 = designers.iter().map(|d| d.availability_hours() as u32).sum();
    let mean = total as f32 / designers.len() as f32;
    format!("{}h", mean.round() as u32)
}

/// First few objects as (headline, owner) pairs
pub fn recent_activity(objects: &[AppObject], designers: &[Designer]) -> Vec<(String, String)> {
    objects
        .iter()
        .take(RECENT_LIMIT)
        .map(|object| {
            let owner = designers
                .iter()
                .find(|d| d.id == object.designer_id)
                .map_or_else(|| "Unknown designer".to_string(), |d| d.full_name.clone());
            (format!("Object \"{}\" created", object.name), owner)
        })
        .collect()
}

/// Draw the dashboard; returns a page to switch to
pub fn draw_dashboard(ctx: &mut UiContext, rect: Rect, query: &mut QueryClient, icon_font: Option<&Font>) -> Option<Page> {
    let designers_loading = query.designers().is_loading();
    let designers = query.designers().data().to_vec();
    let objects_loading = query.objects().is_loading();
    let objects = query.objects().data().to_vec();

    let content = rect.pad(PAGE_PADDING);
    let body = page_header(content, "Dashboard Overview", "Welcome back to Studio 3D.");

    let stats = [
        ("Total Designers", designers.len().to_string(), icon::USERS, designers_loading),
        ("Active Objects", objects.len().to_string(), icon::BOX, objects_loading),
        ("Avg Availability", average_availability(&designers), icon::CLOCK, designers_loading),
    ];
    for (i, (label, value, glyph, loading)) in stats.iter().enumerate() {
        let cell = body.grid_cell(i, stats.len(), STAT_HEIGHT, GAP);
        card(ctx, cell);
        draw_text(label, cell.x + 20.0, cell.y + 30.0, FONT_SIZE_SMALL, TEXT_MUTED);
        if *loading {
            skeleton(Rect::new(cell.x + 20.0, cell.y + 46.0, 64.0, 32.0), get_time());
        } else {
            draw_text(value, cell.x + 20.0, cell.y + 78.0, FONT_SIZE_TITLE + 6.0, TEXT_COLOR);
        }
        let badge_rect = Rect::new(cell.right() - 56.0, cell.y + 20.0, 36.0, 36.0);
        draw_rounded_rect(badge_rect.x, badge_rect.y, badge_rect.w, badge_rect.h, 8.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.15));
        draw_icon_centered(icon_font, *glyph, &badge_rect, 16.0, ACCENT_COLOR);
    }

    let lower = body.remaining_after_top(STAT_HEIGHT + GAP);
    let activity_rect = lower.grid_cell(0, 2, lower.h, GAP);
    let workload_rect = lower.grid_cell(1, 2, lower.h, GAP);

    let open_editor = draw_activity(ctx, activity_rect, &objects, &designers, icon_font);
    draw_workload(ctx, workload_rect, &designers);

    open_editor.then_some(Page::Editor)
}

fn draw_activity(ctx: &mut UiContext, rect: Rect, objects: &[AppObject], designers: &[Designer], icon_font: Option<&Font>) -> bool {
    card(ctx, rect);
    draw_text("Recent Activity", rect.x + 20.0, rect.y + 34.0, FONT_SIZE_HEADER, TEXT_COLOR);

    let label = "Open Editor";
    let button_w = text_width(label, FONT_SIZE_CONTENT) + 28.0;
    let open = button(ctx, Rect::new(rect.right() - button_w - 16.0, rect.y + 14.0, button_w, 30.0), label, ButtonStyle::Ghost);

    let list = rect.remaining_after_top(60.0).pad_sides(16.0, 0.0, 16.0, 16.0);
    let rows = recent_activity(objects, designers);
    if rows.is_empty() {
        let w = text_width("No recent activity", FONT_SIZE_CONTENT);
        draw_text("No recent activity", list.center_x() - w * 0.5, list.y + 48.0, FONT_SIZE_CONTENT, TEXT_MUTED);
        return open;
    }

    for (i, (headline, owner)) in rows.iter().enumerate() {
        let row = Rect::new(list.x, list.y + i as f32 * (ACTIVITY_ROW + 6.0), list.w, ACTIVITY_ROW);
        if row.bottom() > list.bottom() {
            break;
        }
        if ctx.mouse.inside(&row) {
            draw_rectangle(row.x, row.y, row.w, row.h, Color::new(1.0, 1.0, 1.0, 0.03));
        }
        let tile = Rect::new(row.x + 6.0, row.y + 8.0, 36.0, 36.0);
        draw_rounded_rect(tile.x, tile.y, tile.w, tile.h, 8.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.12));
        draw_icon_centered(icon_font, icon::BOX, &tile, 16.0, ACCENT_COLOR);

        let text_w = row.w - 64.0;
        draw_text(&truncate_text(headline, text_w, FONT_SIZE_CONTENT), tile.right() + 12.0, row.y + 23.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        let assigned = format!("Assigned to {}", owner);
        draw_text(&truncate_text(&assigned, text_w, FONT_SIZE_SMALL), tile.right() + 12.0, row.y + 41.0, FONT_SIZE_SMALL, TEXT_MUTED);
    }

    open
}

fn draw_workload(ctx: &mut UiContext, rect: Rect, designers: &[Designer]) {
    card(ctx, rect);
    draw_text("Team Workload", rect.x + 20.0, rect.y + 34.0, FONT_SIZE_HEADER, TEXT_COLOR);

    let list = rect.remaining_after_top(60.0).pad_sides(20.0, 0.0, 20.0, 16.0);
    if designers.is_empty() {
        draw_text("No designers yet.", list.x, list.y + 24.0, FONT_SIZE_CONTENT, TEXT_DIM);
        return;
    }

    let busiest = designers.iter().map(|d| d.attached_objects_count).max().unwrap_or(0).max(1);
    for (i, designer) in designers.iter().enumerate() {
        let row = Rect::new(list.x, list.y + i as f32 * WORKLOAD_ROW, list.w, WORKLOAD_ROW);
        if row.bottom() > list.bottom() {
            break;
        }
        let count = format!("{} objects", designer.attached_objects_count);
        let count_w = text_width(&count, FONT_SIZE_SMALL);
        let name = truncate_text(&designer.full_name, row.w - count_w - 16.0, FONT_SIZE_CONTENT);
        draw_text(&name, row.x, row.y + 16.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        draw_text(&count, row.right() - count_w, row.y + 16.0, FONT_SIZE_SMALL, TEXT_MUTED);

        let track = Rect::new(row.x, row.y + 24.0, row.w, 6.0);
        draw_rounded_rect(track.x, track.y, track.w, track.h, 3.0, BORDER_COLOR);
        let fill = track.w * designer.attached_objects_count as f32 / busiest as f32;
        if fill > 0.0 {
            draw_rounded_rect(track.x, track.y, fill, track.h, 3.0, ACCENT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Snapshot;

    #[test]
    fn test_average_availability() {
        assert_eq!(average_availability(&[]), "0h");

        // 8h and 6h
        let seed = Snapshot::seed(0);
        assert_eq!(average_availability(&seed.designers), "7h");

        let mut designers = seed.designers.clone();
        designers[1].working_hours_to = 16;
        // 8h and 7h round half up
        assert_eq!(average_availability(&designers), "8h");
    }

    #[test]
    fn test_recent_activity() {
        let seed = Snapshot::seed(0);
        let rows = recent_activity(&seed.objects, &seed.designers);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ("Object \"Blue Cube\" created".to_string(), "Alice Johnson".to_string()));
        assert_eq!(rows[2].1, "Bob Smith");

        let mut objects = Vec::new();
        for _ in 0..4 {
            objects.extend(seed.objects.iter().cloned());
        }
        objects[0].designer_id = "missing".to_string();
        let rows = recent_activity(&objects, &seed.designers);
        assert_eq!(rows.len(), RECENT_LIMIT);
        assert_eq!(rows[0].1, "Unknown designer");
    }
}
