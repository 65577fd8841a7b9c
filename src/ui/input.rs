//! Input state for UI interaction

use macroquad::prelude::*;
use super::Rect;

/// Max time between two clicks of a double-click (seconds)
pub const DOUBLE_CLICK_SECS: f64 = 0.35;
/// Max distance between two clicks of a double-click (pixels)
pub const DOUBLE_CLICK_SLOP: f32 = 6.0;

/// Mouse button state
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub left_down: bool,
    pub right_down: bool,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
    pub right_pressed: bool,
    pub double_clicked: bool, // Second press of a double-click
    pub scroll: f32,          // Scroll wheel delta
}

impl MouseState {
    /// Sample macroquad's input for this frame
    pub fn poll(clicks: &mut ClickTracker, now: f64) -> Self {
        let (x, y) = mouse_position();
        let left_pressed = is_mouse_button_pressed(MouseButton::Left);
        let double_clicked = left_pressed && clicks.press(x, y, now);
        Self {
            x,
            y,
            left_down: is_mouse_button_down(MouseButton::Left),
            right_down: is_mouse_button_down(MouseButton::Right),
            left_pressed,
            left_released: is_mouse_button_released(MouseButton::Left),
            right_pressed: is_mouse_button_pressed(MouseButton::Right),
            double_clicked,
            scroll: mouse_wheel().1,
        }
    }

    /// Check if mouse is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    /// Check if mouse is clicking inside a rect
    pub fn clicking(&self, rect: &Rect) -> bool {
        self.left_down && rect.contains(self.x, self.y)
    }

    /// Check if mouse just clicked inside a rect
    pub fn clicked(&self, rect: &Rect) -> bool {
        self.left_pressed && rect.contains(self.x, self.y)
    }

    /// Mouse parked off-screen with no buttons, used while a modal is open
    fn inert(&self) -> Self {
        Self {
            x: -1.0,
            y: -1.0,
            ..Default::default()
        }
    }
}

/// Detects double-clicks from successive presses
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last: Option<(f32, f32, f64)>,
}

impl ClickTracker {
    /// Register a press; true when it completes a double-click
    pub fn press(&mut self, x: f32, y: f32, now: f64) -> bool {
        let is_double = self.last.is_some_and(|(lx, ly, t)| {
            now - t <= DOUBLE_CLICK_SECS && (x - lx).hypot(y - ly) <= DOUBLE_CLICK_SLOP
        });
        // A completed double-click doesn't start another one
        self.last = if is_double { None } else { Some((x, y, now)) };
        is_double
    }
}

/// UI context passed through the frame
pub struct UiContext {
    pub mouse: MouseState,
    /// ID of the widget that is "hot" (mouse hovering)
    pub hot: Option<u64>,
    /// Tooltip requested this frame
    tooltip: Option<(String, f32, f32)>,
    /// A text input had focus this frame
    text_editing: bool,
    text_editing_last: bool,
    /// Input held back while a modal is open
    suspended: Option<MouseState>,
    /// Counter for generating unique IDs
    id_counter: u64,
}

impl UiContext {
    pub fn new() -> Self {
        Self {
            mouse: MouseState::default(),
            hot: None,
            tooltip: None,
            text_editing: false,
            text_editing_last: false,
            suspended: None,
            id_counter: 0,
        }
    }

    /// Generate a unique ID for a widget
    pub fn next_id(&mut self) -> u64 {
        self.id_counter += 1;
        self.id_counter
    }

    /// Reset at start of frame (call before UI code)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
        self.hot = None;
        self.tooltip = None;
        self.text_editing_last = self.text_editing;
        self.text_editing = false;
        self.suspended = None;
        self.id_counter = 0;
    }

    pub fn set_hot(&mut self, id: u64) {
        self.hot = Some(id);
    }


    pub fn set_tooltip(&mut self, text: &str, x: f32, y: f32) {
        self.tooltip = Some((text.to_string(), x, y));
    }

    pub fn tooltip(&self) -> Option<&(String, f32, f32)> {
        self.tooltip.as_ref()
    }

    /// Called by focused text inputs
    pub fn mark_text_editing(&mut self) {
        self.text_editing = true;
    }

    /// Whether keyboard shortcuts should be ignored (a text field has focus)
    pub fn is_text_editing(&self) -> bool {
        self.text_editing || self.text_editing_last
    }

    /// Hide the mouse from everything drawn until `resume_input`
    pub fn suspend_input(&mut self) {
        if self.suspended.is_none() {
            self.suspended = Some(self.mouse);
            self.mouse = self.mouse.inert();
        }
    }

    pub fn resume_input(&mut self) {
        if let Some(mouse) = self.suspended.take() {
            self.mouse = mouse;
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
