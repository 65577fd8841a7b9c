//! Text input widget with cursor and keyboard handling

use macroquad::prelude::*;
use super::theme::*;
use super::{Rect, UiContext};

/// State for a text input field
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputState {
    /// The text content
    pub text: String,
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Whole text selected (replaced by the next keystroke)
    pub all_selected: bool,
    /// Blink timer for cursor
    pub blink_timer: f32,
    /// Whether the input has focus
    pub focused: bool,
}

impl TextInputState {
    /// New focused input with the cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            all_selected: false,
            blink_timer: 0.0,
            focused: true,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.text.len())
    }

    fn take_selection(&mut self) -> bool {
        if self.all_selected {
            self.text.clear();
            self.cursor = 0;
            self.all_selected = false;
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        self.all_selected = false;
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.all_selected = false;
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.all_selected = false;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.all_selected = false;
        self.cursor = self.text.len();
    }

    pub fn select_all(&mut self) {
        self.all_selected = !self.text.is_empty();
        self.cursor = self.text.len();
    }

    /// Insert a character at cursor, replacing the selection if any
    pub fn insert_char(&mut self, ch: char) {
        self.take_selection();
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Delete character before cursor (backspace)
    pub fn backspace(&mut self) {
        if self.take_selection() || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
    }

    /// Delete character after cursor (delete key)
    pub fn delete(&mut self) {
        if self.take_selection() || self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.all_selected = false;
    }

    /// Handle keyboard input, returns true if text changed
    pub fn handle_input(&mut self) -> bool {
        let old_len = self.text.len();
        let old_text = self.text.clone();
        self.blink_timer += get_frame_time();

        let ctrl = is_key_down(KeyCode::LeftControl)
            || is_key_down(KeyCode::RightControl)
            || is_key_down(KeyCode::LeftSuper)
            || is_key_down(KeyCode::RightSuper);

        let mut moved = true;
        if is_key_pressed(KeyCode::Left) {
            self.move_left();
        } else if is_key_pressed(KeyCode::Right) {
            self.move_right();
        } else if is_key_pressed(KeyCode::Home) {
            self.move_home();
        } else if is_key_pressed(KeyCode::End) {
            self.move_end();
        } else if ctrl && is_key_pressed(KeyCode::A) {
            self.select_all();
        } else if is_key_pressed(KeyCode::Backspace) {
            self.backspace();
        } else if is_key_pressed(KeyCode::Delete) {
            self.delete();
        } else {
            moved = false;
        }

        while let Some(ch) = get_char_pressed() {
            // Filter control characters (and the 'a' of Ctrl+A)
            if ch >= ' ' && ch != '\u{7f}' && !ctrl {
                self.insert_char(ch);
                moved = true;
            }
        }
        if moved {
            self.blink_timer = 0.0;
        }

        self.text.len() != old_len || self.text != old_text
    }
}

/// Draw a text input field and handle input.
///
/// A click inside focuses the field, a click anywhere else blurs it.
/// Returns true if the text changed.
pub fn draw_text_input(ctx: &mut UiContext, rect: Rect, state: &mut TextInputState, placeholder: &str, invalid: bool) -> bool {
    if ctx.mouse.left_pressed {
        state.focused = ctx.mouse.inside(&rect);
        state.all_selected = false;
    }

    let border = if invalid {
        DESTRUCTIVE_COLOR
    } else if state.focused {
        ACCENT_COLOR
    } else {
        BORDER_COLOR
    };
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, BG_COLOR);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, border);

    let font_size = FONT_SIZE_CONTENT;
    let padding = 8.0;
    let text_x = rect.x + padding;
    let text_y = rect.y + (rect.h + font_size * 0.7) / 2.0;

    let changed = if state.focused {
        ctx.mark_text_editing();
        state.handle_input()
    } else {
        false
    };

    if state.all_selected {
        let w = measure_text(&state.text, None, font_size as u16, 1.0).width;
        draw_rectangle(text_x, rect.y + 4.0, w, rect.h - 8.0, Color::new(ACCENT_COLOR.r, ACCENT_COLOR.g, ACCENT_COLOR.b, 0.4));
    }

    if state.text.is_empty() && !placeholder.is_empty() {
        draw_text(placeholder, text_x, text_y, font_size, TEXT_DIM);
    } else {
        draw_text(&state.text, text_x, text_y, font_size, TEXT_COLOR);
    }

    // Blinking cursor
    if state.focused && (state.blink_timer % 1.0) < 0.5 {
        let cursor_offset = measure_text(&state.text[..state.cursor], None, font_size as u16, 1.0).width;
        let cursor_x = text_x + cursor_offset;
        draw_line(cursor_x, rect.y + 6.0, cursor_x, rect.y + rect.h - 6.0, 1.5, TEXT_COLOR);
    }

    changed
}
