//! Designers page: searchable card grid with create, edit and delete

use macroquad::prelude::*;

use crate::forms::designer_form::{FIELD_FROM, FIELD_NAME, FIELD_TO};
use crate::forms::DesignerForm;
use crate::model::Designer;
use crate::query::{Mutation, MutationId, MutationKind, MutationStatus, QueryClient};
use crate::ui::{
    badge, begin_dialog, button, card, dialog_footer, draw_text_input, field_error, field_label, icon, icon_button,
    skeleton, text_width, truncate_text, ButtonStyle, Rect, TextInputState, UiContext, ACCENT_COLOR, BORDER_COLOR,
    CARD_HOVER, DESTRUCTIVE_COLOR, FONT_SIZE_CONTENT, FONT_SIZE_HEADER, FONT_SIZE_SMALL, TEXT_COLOR, TEXT_MUTED,
};
use super::{page_header, PAGE_PADDING};

const CARD_MIN_WIDTH: f32 = 280.0;
const CARD_HEIGHT: f32 = 172.0;
const GAP: f32 = 24.0;
const SKELETON_CARDS: usize = 6;
const DELETE_PROMPT: &str = "Are you sure? This will delete attached objects too.";

/// Designers whose name contains `needle`, ignoring case
pub fn filter_designers<'a>(designers: &'a [Designer], needle: &str) -> Vec<&'a Designer> {
    let needle = needle.trim().to_lowercase();
    designers
        .iter()
        .filter(|d| needle.is_empty() || d.full_name.to_lowercase().contains(&needle))
        .collect()
}

/// Open create/edit form
struct DesignerDialog {
    form: DesignerForm,
    pending: Option<MutationId>,
}

/// Delete waiting for confirmation
struct DeleteConfirm {
    id: String,
    name: String,
    pending: Option<MutationId>,
}

enum CardAction {
    Edit,
    Delete,
}

pub struct DesignersPage {
    search: TextInputState,
    dialog: Option<DesignerDialog>,
    confirm: Option<DeleteConfirm>,
    scroll: f32,
}

impl DesignersPage {
    pub fn new() -> Self {
        let mut search = TextInputState::new("");
        search.focused = false;
        Self {
            search,
            dialog: None,
            confirm: None,
            scroll: 0.0,
        }
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some() || self.confirm.is_some()
    }

    pub fn open_create(&mut self) {
        self.dialog = Some(DesignerDialog {
            form: DesignerForm::new(),
            pending: None,
        });
    }

    pub fn open_edit(&mut self, designer: &Designer) {
        self.dialog = Some(DesignerDialog {
            form: DesignerForm::edit(designer),
            pending: None,
        });
    }

    pub fn ask_delete(&mut self, designer: &Designer) {
        self.confirm = Some(DeleteConfirm {
            id: designer.id.clone(),
            name: designer.full_name.clone(),
            pending: None,
        });
    }

    /// Validate the open form and send it; invalid input stays in the dialog
    pub fn submit(&mut self, query: &mut QueryClient) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        if dialog.pending.is_some() {
            return;
        }
        let data = match dialog.form.submit() {
            Ok(data) => data,
            Err(errors) => {
                log::debug!("designer form rejected: {} field(s)", errors.len());
                return;
            }
        };
        let mutation = match &dialog.form.editing {
            Some(id) => Mutation::UpdateDesigner { id: id.clone(), data },
            None => Mutation::CreateDesigner(data),
        };
        dialog.pending = Some(query.mutate(mutation));
    }

    pub fn confirm_delete(&mut self, query: &mut QueryClient) {
        if query.is_mutating(MutationKind::DeleteDesigner) {
            return;
        }
        if let Some(confirm) = self.confirm.as_mut() {
            if confirm.pending.is_none() {
                confirm.pending = Some(query.mutate(Mutation::DeleteDesigner(confirm.id.clone())));
            }
        }
    }

    /// Close dialogs whose write has landed
    pub fn sync(&mut self, query: &QueryClient) {
        if let Some(dialog) = &mut self.dialog {
            match dialog.pending.and_then(|id| query.mutation_status(id)) {
                Some(MutationStatus::Success) => self.dialog = None,
                Some(MutationStatus::Error(_)) => dialog.pending = None,
                _ => {}
            }
        }
        if let Some(confirm) = &self.confirm {
            // Failures already toast; nothing left to confirm either way
            if let Some(MutationStatus::Success | MutationStatus::Error(_)) =
                confirm.pending.and_then(|id| query.mutation_status(id))
            {
                self.confirm = None;
            }
        }
    }

    pub fn draw(&mut self, ctx: &mut UiContext, rect: Rect, query: &mut QueryClient, icon_font: Option<&Font>) {
        self.sync(query);
        let loading = query.designers().is_loading();
        let designers = query.designers().data().to_vec();

        let modal = self.has_dialog();
        if modal {
            ctx.suspend_input();
        }

        let content = rect.pad(PAGE_PADDING);
        let body = page_header(content, "Designers", "Manage your design team and their workload.");

        // Search and add, right-aligned in the header row
        let add_w = 150.0;
        let add_rect = Rect::new(content.right() - add_w, content.y + 8.0, add_w, 36.0);
        let search_w = (content.w * 0.3).clamp(160.0, 300.0);
        let search_rect = Rect::new(add_rect.x - search_w - 12.0, add_rect.y, search_w, add_rect.h);
        if draw_text_input(ctx, search_rect, &mut self.search, "Search designers...", false) {
            self.scroll = 0.0;
        }
        if button(ctx, add_rect, "+  Add Designer", ButtonStyle::Primary) {
            self.open_create();
        }

        if loading {
            let cols = body.columns_for(CARD_MIN_WIDTH, GAP);
            for i in 0..SKELETON_CARDS {
                let cell = body.grid_cell(i, cols, CARD_HEIGHT, GAP);
                if cell.bottom() <= body.bottom() {
                    skeleton(cell, get_time());
                }
            }
        } else {
            let visible = filter_designers(&designers, &self.search.text);
            if visible.is_empty() {
                if draw_empty(ctx, body) {
                    self.open_create();
                }
            } else {
                self.draw_grid(ctx, body, &visible, icon_font);
            }
        }

        if modal {
            ctx.resume_input();
            if self.dialog.is_some() {
                self.draw_form_dialog(ctx, query, icon_font);
            } else {
                self.draw_confirm_dialog(ctx, query, icon_font);
            }
        }
    }

    fn draw_grid(&mut self, ctx: &mut UiContext, body: Rect, visible: &[&Designer], icon_font: Option<&Font>) {
        let cols = body.columns_for(CARD_MIN_WIDTH, GAP);
        let rows = visible.len().div_ceil(cols);
        let total = rows as f32 * (CARD_HEIGHT + GAP) - GAP;
        let max_scroll = (total - body.h).max(0.0);
        if ctx.mouse.inside(&body) && ctx.mouse.scroll != 0.0 {
            self.scroll -= ctx.mouse.scroll.signum() * (CARD_HEIGHT + GAP) * 0.5;
        }
        self.scroll = self.scroll.clamp(0.0, max_scroll);

        let origin = Rect::new(body.x, body.y - self.scroll, body.w, body.h);
        let mut action = None;
        for (i, designer) in visible.iter().enumerate() {
            let cell = origin.grid_cell(i, cols, CARD_HEIGHT, GAP);
            if cell.y < body.y - 1.0 || cell.bottom() > body.bottom() + 1.0 {
                continue;
            }
            if let Some(a) = draw_designer_card(ctx, cell, designer, icon_font) {
                action = Some((a, *designer));
            }
        }

        match action {
            Some((CardAction::Edit, designer)) => self.open_edit(designer),
            Some((CardAction::Delete, designer)) => self.ask_delete(designer),
            None => {}
        }
    }

    fn draw_form_dialog(&mut self, ctx: &mut UiContext, query: &mut QueryClient, icon_font: Option<&Font>) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let title = if dialog.form.is_edit() { "Edit Designer" } else { "Add New Designer" };
        let frame = begin_dialog(ctx, title, 440.0, 320.0, icon_font);
        let area = frame.content;
        let form = &mut dialog.form;

        let mut y = area.y;
        field_label(area.x, y + 12.0, "Full Name");
        y += 18.0;
        draw_text_input(ctx, Rect::new(area.x, y, area.w, 32.0), &mut form.full_name, "Jane Doe", form.errors.get(FIELD_NAME).is_some());
        y += 32.0;
        field_error(area.x, y + 14.0, form.errors.get(FIELD_NAME));
        y += 24.0;

        let half = (area.w - 12.0) * 0.5;
        field_label(area.x, y + 12.0, "Available from (hour)");
        field_label(area.x + half + 12.0, y + 12.0, "Available to (hour)");
        y += 18.0;
        draw_text_input(ctx, Rect::new(area.x, y, half, 32.0), &mut form.from, "9", form.errors.get(FIELD_FROM).is_some());
        draw_text_input(ctx, Rect::new(area.x + half + 12.0, y, half, 32.0), &mut form.to, "17", form.errors.get(FIELD_TO).is_some());
        y += 32.0;
        field_error(area.x, y + 14.0, form.errors.get(FIELD_FROM));
        field_error(area.x + half + 12.0, y + 14.0, form.errors.get(FIELD_TO));

        let saving = dialog.pending.is_some();
        let label = if saving {
            "Saving..."
        } else if dialog.form.is_edit() {
            "Update"
        } else {
            "Create"
        };
        let (cancelled, confirmed) = dialog_footer(ctx, area, label, ButtonStyle::Primary, !saving);

        if frame.close || cancelled {
            self.dialog = None;
        } else if confirmed || (is_key_pressed(KeyCode::Enter) && !saving) {
            self.submit(query);
        }
    }

    fn draw_confirm_dialog(&mut self, ctx: &mut UiContext, query: &mut QueryClient, icon_font: Option<&Font>) {
        let Some(confirm) = self.confirm.as_ref() else {
            return;
        };
        let frame = begin_dialog(ctx, "Delete Designer", 440.0, 200.0, icon_font);
        let area = frame.content;
        draw_text(DELETE_PROMPT, area.x, area.y + 16.0, FONT_SIZE_CONTENT, TEXT_COLOR);
        let name = truncate_text(&confirm.name, area.w, FONT_SIZE_SMALL);
        draw_text(&name, area.x, area.y + 40.0, FONT_SIZE_SMALL, TEXT_MUTED);

        let deleting = confirm.pending.is_some() || query.is_mutating(MutationKind::DeleteDesigner);
        let label = if deleting { "Deleting..." } else { "Delete" };
        let (cancelled, confirmed) = dialog_footer(ctx, area, label, ButtonStyle::Destructive, !deleting);

        if frame.close || cancelled {
            self.confirm = None;
        } else if confirmed {
            self.confirm_delete(query);
        }
    }
}

impl Default for DesignersPage {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_empty(ctx: &mut UiContext, body: Rect) -> bool {
    let panel = Rect::new(body.x, body.y, body.w, 240.0_f32.min(body.h));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 1.0, BORDER_COLOR);

    let lines = [
        ("No designers found", FONT_SIZE_HEADER, TEXT_COLOR, 70.0),
        ("Get started by adding your first designer to the team.", FONT_SIZE_CONTENT, TEXT_MUTED, 100.0),
    ];
    for (text, size, color, dy) in lines {
        let w = text_width(text, size);
        draw_text(text, (panel.center_x() - w * 0.5).round(), panel.y + dy, size, color);
    }
    let create = Rect::new(panel.center_x() - 80.0, panel.y + 130.0, 160.0, 36.0);
    button(ctx, create, "Create Designer", ButtonStyle::Secondary)
}

fn draw_designer_card(ctx: &mut UiContext, rect: Rect, designer: &Designer, icon_font: Option<&Font>) -> Option<CardAction> {
    let hovered = card(ctx, rect);
    let inner = rect.pad(20.0);

    // Avatar
    let avatar_r = 22.0;
    let (cx, cy) = (inner.x + avatar_r, inner.y + avatar_r);
    draw_circle(cx, cy, avatar_r, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.15));
    draw_circle_lines(cx, cy, avatar_r, 1.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.3));
    let initial = designer.initial().to_string();
    let w = text_width(&initial, FONT_SIZE_HEADER);
    draw_text(&initial, (cx - w * 0.5).round(), cy + 6.0, FONT_SIZE_HEADER, ACCENT_COLOR);

    // Edit and delete show on hover
    let mut action = None;
    if hovered {
        let delete = Rect::new(inner.right() - 30.0, inner.y, 30.0, 30.0);
        let edit = Rect::new(delete.x - 34.0, inner.y, 30.0, 30.0);
        if icon_button(ctx, edit, icon::PENCIL, icon_font, "Edit", "Edit designer", ACCENT_COLOR) {
            action = Some(CardAction::Edit);
        }
        if icon_button(ctx, delete, icon::TRASH, icon_font, "Del", "Delete designer", DESTRUCTIVE_COLOR) {
            action = Some(CardAction::Delete);
        }
    }

    let name = truncate_text(&designer.full_name, inner.w, FONT_SIZE_HEADER);
    draw_text(&name, inner.x, inner.y + 74.0, FONT_SIZE_HEADER, TEXT_COLOR);
    draw_text(&format!("ID: {}", designer.id), inner.x, inner.y + 96.0, FONT_SIZE_SMALL, TEXT_MUTED);

    let hours_w = badge(inner.x, inner.y + 110.0, &designer.availability_label(), CARD_HOVER, TEXT_COLOR);
    let count = designer.attached_objects_count;
    let (bg, fg) = if count > 0 { (ACCENT_COLOR, WHITE) } else { (Color::new(0.0, 0.0, 0.0, 0.0), TEXT_MUTED) };
    let count_x = inner.x + hours_w + 8.0;
    let count_w = badge(count_x, inner.y + 110.0, &format!("{} Objects", count), bg, fg);
    if count == 0 {
        draw_rectangle_lines(count_x, inner.y + 110.0, count_w, 20.0, 1.0, BORDER_COLOR);
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::seeded;
    use crate::model::Snapshot;

    #[test]
    fn test_filter_designers() {
        let designers = Snapshot::seed(0).designers;
        assert_eq!(filter_designers(&designers, "").len(), 2);
        let found = filter_designers(&designers, "  ALICE ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "d1");
        assert_eq!(filter_designers(&designers, "o").len(), 2);
        assert!(filter_designers(&designers, "zed").is_empty());
    }

    #[test]
    fn test_create_closes_on_success() {
        let mut api = seeded();
        let mut query = QueryClient::new(0.0, 4.0);
        let mut page = DesignersPage::new();

        page.open_create();
        let form = &mut page.dialog.as_mut().unwrap().form;
        form.full_name.text = "Carol Danvers".into();
        page.submit(&mut query);
        assert!(page.dialog.as_ref().unwrap().pending.is_some());

        query.tick(0.0, &mut api);
        page.sync(&query);
        assert!(page.dialog.is_none());
        assert!(api.list_designers().unwrap().iter().any(|d| d.full_name == "Carol Danvers"));
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut query = QueryClient::new(0.0, 4.0);
        let mut page = DesignersPage::new();

        page.open_create();
        let form = &mut page.dialog.as_mut().unwrap().form;
        form.full_name.text = "Ed".into();
        form.from.text = "17".into();
        form.to.text = "9".into();
        page.submit(&mut query);

        let dialog = page.dialog.as_ref().unwrap();
        assert!(dialog.pending.is_none());
        assert!(dialog.form.errors.get(FIELD_NAME).is_some());
        assert!(dialog.form.errors.get(FIELD_TO).is_some());
        assert!(!query.is_mutating(MutationKind::CreateDesigner));
    }

    #[test]
    fn test_edit_sends_update() {
        let mut api = seeded();
        let mut query = QueryClient::new(0.0, 4.0);
        let mut page = DesignersPage::new();
        let bob = Snapshot::seed(0).designers[1].clone();

        page.open_edit(&bob);
        page.dialog.as_mut().unwrap().form.to.text = "18".into();
        page.submit(&mut query);
        assert!(query.is_mutating(MutationKind::UpdateDesigner));

        query.tick(0.0, &mut api);
        page.sync(&query);
        assert!(page.dialog.is_none());
        let stored = api.list_designers().unwrap().into_iter().find(|d| d.id == "d2").unwrap();
        assert_eq!(stored.working_hours_to, 18);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut api = seeded();
        let mut query = QueryClient::new(0.0, 4.0);
        let mut page = DesignersPage::new();
        let alice = Snapshot::seed(0).designers[0].clone();

        page.ask_delete(&alice);
        assert!(page.has_dialog());
        assert!(!query.is_mutating(MutationKind::DeleteDesigner));

        page.confirm_delete(&mut query);
        // A second click while in flight does nothing
        page.confirm_delete(&mut query);
        assert!(query.is_mutating(MutationKind::DeleteDesigner));

        query.tick(0.0, &mut api);
        page.sync(&query);
        assert!(!page.has_dialog());
        assert!(api.list_objects().unwrap().iter().all(|o| o.designer_id != "d1"));
    }
}
