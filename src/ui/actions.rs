//! Keyboard actions
//!
//! Actions pair an id with a label, an optional shortcut and an enable
//! condition. Screens register their actions once, then each frame ask the
//! registry which ones fired:
//!
//! ```ignore
//! let mut registry = ActionRegistry::new();
//! registry.register(Action::new("editor.delete")
//!     .label("Delete Object")
//!     .shortcut(Shortcut::key(KeyCode::Delete))
//!     .enabled_when(|ctx| ctx.has_selection));
//!
//! for id in registry.process_triggers(&ctx) { ... }
//! ```

use macroquad::prelude::*;
use std::collections::HashMap;

/// A keyboard shortcut (key + modifiers)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: KeyCode,
    pub ctrl: bool, // Cmd on Mac
    pub shift: bool,
    pub alt: bool,
}

impl Shortcut {
    /// A bare key with no modifiers
    pub fn key(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    /// Check if this shortcut is currently pressed
    pub fn is_pressed(&self) -> bool {
        if !is_key_pressed(self.key) {
            return false;
        }

        let ctrl_down = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);
        let shift_down = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);
        let alt_down = is_key_down(KeyCode::LeftAlt) || is_key_down(KeyCode::RightAlt);

        self.ctrl == ctrl_down && self.shift == shift_down && self.alt == alt_down
    }

    /// Format for display, e.g. "Ctrl+N" or "⌘N"
    pub fn display(&self) -> String {
        let mut out = String::new();

        #[cfg(target_os = "macos")]
        {
            if self.ctrl {
                out.push('⌘');
            }
            if self.shift {
                out.push('⇧');
            }
            if self.alt {
                out.push('⌥');
            }
        }

        #[cfg(not(target_os = "macos"))]
        {
            if self.ctrl {
                out.push_str("Ctrl+");
            }
            if self.shift {
                out.push_str("Shift+");
            }
            if self.alt {
                out.push_str("Alt+");
            }
        }

        out.push_str(key_name(self.key));
        out
    }
}

fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::A => "A",
        KeyCode::D => "D",
        KeyCode::E => "E",
        KeyCode::F => "F",
        KeyCode::N => "N",
        KeyCode::S => "S",
        KeyCode::Z => "Z",
        KeyCode::Key1 => "1",
        KeyCode::Key2 => "2",
        KeyCode::Key3 => "3",
        KeyCode::Escape => "Esc",
        KeyCode::Enter => "Enter",
        KeyCode::Space => "Space",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Del",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        _ => "?",
    }
}

/// Conditions that decide whether an action may fire
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionContext {
    /// A text field has focus (blocks all shortcuts)
    pub text_editing: bool,
    /// An object is selected in the editor
    pub has_selection: bool,
    /// A modal dialog is open
    pub dialog_open: bool,
    /// At least one designer exists
    pub has_designers: bool,
}

type EnableFn = fn(&ActionContext) -> bool;

fn always_enabled(_: &ActionContext) -> bool {
    true
}

/// A registered action
#[derive(Clone)]
pub struct Action {
    /// Unique identifier (e.g. "editor.delete")
    pub id: &'static str,
    pub label: &'static str,
    pub shortcut: Option<Shortcut>,
    /// Longer description for tooltips; falls back to the label
    pub status_tip: &'static str,
    enabled_fn: EnableFn,
}

impl Action {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            label: "",
            shortcut: None,
            status_tip: "",
            enabled_fn: always_enabled,
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn shortcut(mut self, shortcut: Shortcut) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    pub fn status_tip(mut self, tip: &'static str) -> Self {
        self.status_tip = tip;
        self
    }

    pub fn enabled_when(mut self, f: EnableFn) -> Self {
        self.enabled_fn = f;
        self
    }

    /// Check if this action is enabled in the given context
    pub fn is_enabled(&self, ctx: &ActionContext) -> bool {
        if ctx.text_editing {
            return false;
        }
        (self.enabled_fn)(ctx)
    }

    /// Shortcut pressed this frame and action enabled
    pub fn is_triggered(&self, ctx: &ActionContext) -> bool {
        self.is_enabled(ctx) && self.shortcut.as_ref().is_some_and(|s| s.is_pressed())
    }

    /// Tooltip with shortcut hint
    pub fn tooltip(&self) -> String {
        let text = if self.status_tip.is_empty() { self.label } else { self.status_tip };
        match &self.shortcut {
            Some(shortcut) => format!("{} ({})", text, shortcut.display()),
            None => text.to_string(),
        }
    }
}

/// Central registry for all actions
pub struct ActionRegistry {
    actions: HashMap<&'static str, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Add an action; a shortcut already taken by another action is dropped
    pub fn register(&mut self, mut action: Action) {
        if let Some(shortcut) = &action.shortcut {
            if let Some(owner) = self.actions.values().find(|a| a.id != action.id && a.shortcut.as_ref() == Some(shortcut)) {
                log::warn!("{} already bound to {}, {} left unbound", shortcut.display(), owner.id, action.id);
                action.shortcut = None;
            }
        }
        self.actions.insert(action.id, action);
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn is_enabled(&self, id: &str, ctx: &ActionContext) -> bool {
        self.actions.get(id).is_some_and(|a| a.is_enabled(ctx))
    }

    pub fn tooltip(&self, id: &str) -> String {
        self.actions.get(id).map_or_else(String::new, |a| a.tooltip())
    }

    /// Ids of every action triggered this frame
    pub fn process_triggers(&self, ctx: &ActionContext) -> Vec<&'static str> {
        self.actions
            .values()
            .filter(|a| a.is_triggered(ctx))
            .map(|a| a.id)
            .collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.register(
            Action::new("editor.delete")
                .label("Delete Object")
                .shortcut(Shortcut::key(KeyCode::Delete))
                .enabled_when(|ctx| ctx.has_selection),
        );
        registry.register(
            Action::new("editor.add")
                .label("Add Object")
                .shortcut(Shortcut::key(KeyCode::N))
                .status_tip("Add an object at a random spot"),
        );
        registry
    }

    #[test]
    fn test_shortcut_display() {
        let ctrl_n = Shortcut {
            ctrl: true,
            ..Shortcut::key(KeyCode::N)
        };
        assert!(ctrl_n.display().ends_with('N'));
        assert_eq!(Shortcut::key(KeyCode::Delete).display(), "Del");
    }

    #[test]
    fn test_enable_conditions() {
        let registry = registry();
        let idle = ActionContext::default();
        assert!(!registry.is_enabled("editor.delete", &idle));

        let selected = ActionContext {
            has_selection: true,
            ..Default::default()
        };
        assert!(registry.is_enabled("editor.delete", &selected));
        assert!(!registry.is_enabled("missing", &selected));
    }

    #[test]
    fn test_text_editing_blocks_everything() {
        let registry = registry();
        let ctx = ActionContext {
            text_editing: true,
            has_selection: true,
            ..Default::default()
        };
        assert!(!registry.is_enabled("editor.delete", &ctx));
        assert!(!registry.is_enabled("editor.add", &ctx));
    }

    #[test]
    fn test_tooltip_includes_shortcut() {
        let registry = registry();
        assert_eq!(registry.tooltip("editor.add"), "Add an object at a random spot (N)");
        assert_eq!(registry.tooltip("editor.delete"), "Delete Object (Del)");
    }

    #[test]
    fn test_duplicate_shortcut_left_unbound() {
        let mut registry = registry();
        registry.register(Action::new("editor.other").label("Other").shortcut(Shortcut::key(KeyCode::N)));
        assert!(registry.get("editor.other").is_some_and(|a| a.shortcut.is_none()));
        assert_eq!(registry.get("editor.add").and_then(|a| a.shortcut.clone()), Some(Shortcut::key(KeyCode::N)));
    }
}
