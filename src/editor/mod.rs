//! 3D scene editor
//!
//! Layout: scene explorer on the left, viewport in the middle, property
//! panel on the right while an object is selected. The "Add New Object"
//! dialog sits on top of all three.

pub mod actions;
mod camera;
pub mod drag;
mod explorer;
mod properties;
pub mod ray;
mod state;
mod viewport;

pub use state::EditorState;

use state::random_spot;

use macroquad::prelude::*;

use crate::query::{MutationKind, QueryClient};
use crate::ui::{begin_dialog, dialog_footer, ButtonStyle, Rect, UiContext};

const EXPLORER_WIDTH: f32 = 300.0;
const PROPERTIES_WIDTH: f32 = 300.0;

/// Draw the editor into `rect` and apply this frame's input
pub fn draw_editor(ctx: &mut UiContext, rect: Rect, state: &mut EditorState, query: &mut QueryClient, icon_font: Option<&Font>) {
    let designers = query.designers().data().to_vec();
    let objects = query.objects().data().to_vec();
    state.sync(&objects, query);

    // Keyboard actions
    let action_ctx = actions::build_context(
        ctx.is_text_editing(),
        state.selected.is_some(),
        state.create_dialog.is_some(),
        !designers.is_empty(),
    );
    for id in state.actions.process_triggers(&action_ctx) {
        match id {
            actions::DELETE => state.delete_selected(query),
            actions::ESCAPE => {
                state.drag.cancel();
                state.clear_selection();
            }
            actions::ADD => {
                state.open_create(random_spot(), &designers, query);
            }
            _ => {}
        }
    }

    let modal = state.create_dialog.is_some();
    if modal {
        ctx.suspend_input();
        // A dialog opening mid-gesture ends it without a commit
        state.drag.cancel();
    }

    let (explorer_rect, rest) = rect.split_h_px(EXPLORER_WIDTH);
    let (viewport_rect, properties_rect) = if state.selected.is_some() {
        rest.split_right_px(PROPERTIES_WIDTH)
    } else {
        (rest, Rect::default())
    };

    viewport::handle_viewport_input(ctx, viewport_rect, state, &objects, &designers, query);
    viewport::draw_viewport(viewport_rect, state, &objects, icon_font);
    explorer::draw_explorer(ctx, explorer_rect, state, &objects, &designers, query, icon_font);
    if state.selected.is_some() {
        properties::draw_properties_panel(ctx, properties_rect, state, &designers, query, icon_font);
    }

    if modal {
        ctx.resume_input();
        draw_create_dialog(ctx, state, query, &designers, icon_font);
    }
}

fn draw_create_dialog(
    ctx: &mut UiContext,
    state: &mut EditorState,
    query: &mut QueryClient,
    designers: &[crate::model::Designer],
    icon_font: Option<&Font>,
) {
    let Some(dialog) = state.create_dialog.as_mut() else {
        return;
    };

    let frame = begin_dialog(ctx, "Add New Object", 460.0, 560.0, icon_font);
    properties::draw_object_fields(ctx, frame.content, &mut dialog.form, designers);

    let saving = dialog.pending.is_some() || query.is_mutating(MutationKind::CreateObject);
    let label = if saving { "Saving..." } else { "Create" };
    let (cancelled, confirmed) = dialog_footer(ctx, frame.content, label, ButtonStyle::Primary, !saving);

    if frame.close || cancelled {
        state.create_dialog = None;
    } else if confirmed || (is_key_pressed(KeyCode::Enter) && !saving) {
        state.submit_create(designers, query);
    }
}
