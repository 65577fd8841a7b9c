//! Drag-to-move for scene objects
//!
//! A press on an object starts a candidate drag. Once the pointer has
//! travelled past the threshold the drag becomes active and follows the
//! ground plane; releasing commits the new position. A release before that
//! is a plain click and selects the object.
//!
//! The pointer is captured for the whole gesture. The capture is a guard
//! owned by the tracker's state, so every way out of a drag (release, cancel,
//! the tracker going away) gives it back.

use std::cell::Cell;
use std::rc::Rc;

use macroquad::prelude::Vec3;

/// Hands out exclusive pointer captures
#[derive(Debug, Clone, Default)]
pub struct CaptureRegistry {
    held: Rc<Cell<bool>>,
}

impl CaptureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the pointer, unless someone already holds it
    pub fn acquire(&self) -> Option<PointerCapture> {
        if self.held.get() {
            return None;
        }
        self.held.set(true);
        log::debug!("pointer captured");
        Some(PointerCapture {
            held: Rc::clone(&self.held),
        })
    }

    pub fn is_captured(&self) -> bool {
        self.held.get()
    }
}

/// Exclusive pointer capture; released on drop
#[derive(Debug)]
pub struct PointerCapture {
    held: Rc<Cell<bool>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.held.set(false);
        log::debug!("pointer released");
    }
}

/// What a finished gesture means
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// No gesture was in progress
    None,
    /// Released before the threshold: a click on the object
    Select(String),
    /// Released after an active drag
    Commit { id: String, position: [f32; 3] },
}

#[derive(Debug)]
enum DragState {
    Idle,
    Pending {
        id: String,
        last: (f32, f32),
        travelled: f32,
        position: [f32; 3],
        pinned_y: f32,
        _capture: PointerCapture,
    },
    Dragging {
        id: String,
        position: [f32; 3],
        pinned_y: f32,
        _capture: PointerCapture,
    },
}

/// Per-viewport drag state machine
#[derive(Debug)]
pub struct DragTracker {
    threshold: f32,
    state: DragState,
}

impl DragTracker {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold: threshold_px,
            state: DragState::Idle,
        }
    }

    /// Press on an object. `pinned_y` is the height it rests at.
    pub fn pointer_down(&mut self, object_id: &str, mouse: (f32, f32), position: [f32; 3], pinned_y: f32, capture: PointerCapture) {
        self.state = DragState::Pending {
            id: object_id.to_string(),
            last: mouse,
            travelled: 0.0,
            position,
            pinned_y,
            _capture: capture,
        };
    }

    /// Pointer moved. `ground_hit` is where the pointer ray meets y = 0.
    /// Returns true while a drag is active.
    pub fn pointer_move(&mut self, mouse: (f32, f32), ground_hit: Option<Vec3>) -> bool {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        self.state = match state {
            DragState::Pending { id, last, travelled, position, pinned_y, _capture } => {
                let travelled = travelled + (mouse.0 - last.0).hypot(mouse.1 - last.1);
                if travelled > self.threshold {
                    log::debug!("drag started on {}", id);
                    DragState::Dragging {
                        position: follow(position, ground_hit, pinned_y),
                        id,
                        pinned_y,
                        _capture,
                    }
                } else {
                    DragState::Pending { id, last: mouse, travelled, position, pinned_y, _capture }
                }
            }
            DragState::Dragging { id, position, pinned_y, _capture } => DragState::Dragging {
                position: follow(position, ground_hit, pinned_y),
                id,
                pinned_y,
                _capture,
            },
            DragState::Idle => DragState::Idle,
        };
        self.is_dragging()
    }

    /// Pointer released, wherever it is
    pub fn pointer_up(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DragOutcome::None,
            DragState::Pending { id, .. } => DragOutcome::Select(id),
            DragState::Dragging { id, position, .. } => DragOutcome::Commit { id, position },
        }
    }

    /// Abandon the gesture without committing
    pub fn cancel(&mut self) {
        if !matches!(self.state, DragState::Idle) {
            log::debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Drag is past the threshold
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// A press is being tracked (candidate or active drag)
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Live position of the dragged object
    pub fn preview(&self) -> Option<(&str, [f32; 3])> {
        match &self.state {
            DragState::Dragging { id, position, .. } => Some((id.as_str(), *position)),
            _ => None,
        }
    }
}

fn follow(position: [f32; 3], ground_hit: Option<Vec3>, pinned_y: f32) -> [f32; 3] {
    match ground_hit {
        Some(hit) => [hit.x, pinned_y, hit.z],
        None => [position[0], pinned_y, position[2]],
    }
}
