//! Scene editor keyboard actions

use macroquad::prelude::*;
use crate::ui::{Action, ActionContext, ActionRegistry, Shortcut};

pub const DELETE: &str = "editor.delete";
pub const ESCAPE: &str = "editor.escape";
pub const ADD: &str = "editor.add";

/// Create the action registry for the scene editor
pub fn create_editor_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();

    registry.register(
        Action::new(DELETE)
            .label("Delete Object")
            .shortcut(Shortcut::key(KeyCode::Delete))
            .status_tip("Delete the selected object")
            .enabled_when(|ctx| ctx.has_selection && !ctx.dialog_open),
    );

    registry.register(
        Action::new(ESCAPE)
            .label("Deselect")
            .shortcut(Shortcut::key(KeyCode::Escape))
            .status_tip("Clear the selection")
            .enabled_when(|ctx| ctx.has_selection && !ctx.dialog_open),
    );

    registry.register(
        Action::new(ADD)
            .label("Add Object")
            .shortcut(Shortcut::key(KeyCode::N))
            .status_tip("Add an object to the scene")
            .enabled_when(|ctx| !ctx.dialog_open),
    );

    registry
}

/// Build the context actions are checked against this frame
pub fn build_context(text_editing: bool, has_selection: bool, dialog_open: bool, has_designers: bool) -> ActionContext {
    ActionContext {
        text_editing,
        has_selection,
        dialog_open,
        has_designers,
    }
}
