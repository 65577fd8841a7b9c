//! Scene editor state
//!
//! Everything here is transient: selection, the drag in progress, the open
//! dialog. None of it is persisted.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::forms::ObjectForm;
use crate::model::{AppObject, Designer};
use crate::query::{Mutation, MutationId, MutationStatus, QueryClient, ToastVariant};
use crate::ui::ActionRegistry;
use super::actions::create_editor_actions;
use super::drag::{CaptureRegistry, DragOutcome, DragTracker};
use super::viewport::ViewportCanvas;
use super::camera::OrbitCamera;

/// Half-width of the square "Add Object" picks a random spot in
const RANDOM_SPOT_RANGE: f32 = 4.0;
/// Max offset from the double-clicked ground point
const NEARBY_JITTER: f32 = 0.5;

/// Scene explorer tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorerTab {
    #[default]
    Objects,
    Designers,
}

/// "Add New Object" dialog
#[derive(Debug, Clone)]
pub struct CreateDialog {
    pub form: ObjectForm,
    /// Create request in flight
    pub pending: Option<MutationId>,
}

/// A committed drag whose write hasn't come back yet
#[derive(Debug, Clone)]
struct PendingMove {
    mutation: MutationId,
    id: String,
    position: [f32; 3],
}

pub struct EditorState {
    pub camera: OrbitCamera,
    pub selected: Option<String>,
    /// Object under the pointer this frame
    pub hovered: Option<String>,
    pub drag: DragTracker,
    pub captures: CaptureRegistry,
    pub create_dialog: Option<CreateDialog>,
    /// Property form bound to the selected object
    pub properties: Option<ObjectForm>,
    pub explorer_tab: ExplorerTab,
    pub actions: ActionRegistry,
    /// Last pointer position while orbiting
    pub orbit_last: Option<(f32, f32)>,
    /// Scroll offset of the explorer list
    pub explorer_scroll: f32,
    pub canvas: ViewportCanvas,
    pending_move: Option<PendingMove>,
}

impl EditorState {
    pub fn new(drag_threshold_px: f32) -> Self {
        Self {
            camera: OrbitCamera::default(),
            selected: None,
            hovered: None,
            drag: DragTracker::new(drag_threshold_px),
            captures: CaptureRegistry::new(),
            create_dialog: None,
            properties: None,
            explorer_tab: ExplorerTab::default(),
            actions: create_editor_actions(),
            orbit_last: None,
            explorer_scroll: 0.0,
            canvas: ViewportCanvas::default(),
            pending_move: None,
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select an object (or clear with `None`), loading it into the property form
    pub fn select(&mut self, id: Option<&str>, objects: &[AppObject]) {
        let object = id.and_then(|id| objects.iter().find(|o| o.id == id));
        match object {
            Some(object) => {
                if !self.is_selected(&object.id) {
                    self.properties = Some(ObjectForm::from_object(object));
                }
                self.selected = Some(object.id.clone());
            }
            None => {
                self.selected = None;
                self.properties = None;
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.properties = None;
    }

    /// Reconcile with freshly cached objects
    pub fn sync(&mut self, objects: &[AppObject], query: &QueryClient) {
        if let Some(id) = self.selected.clone() {
            match objects.iter().find(|o| o.id == id) {
                // Position isn't edited in the form; follow the stored one
                Some(object) => {
                    if let Some(form) = &mut self.properties {
                        form.position = object.position;
                    }
                }
                None => {
                    log::debug!("selected object {} is gone", id);
                    self.clear_selection();
                }
            }
        }

        if let Some(pending) = &self.pending_move {
            let settled = match query.mutation_status(pending.mutation) {
                Some(MutationStatus::Pending) => false,
                Some(MutationStatus::Success) => objects
                    .iter()
                    .find(|o| o.id == pending.id)
                    .map_or(true, |o| o.position == pending.position),
                _ => true,
            };
            if settled {
                self.pending_move = None;
            }
        }

        if let Some(dialog) = &mut self.create_dialog {
            match dialog.pending.and_then(|id| query.mutation_status(id)) {
                Some(MutationStatus::Success) => self.create_dialog = None,
                Some(MutationStatus::Error(_)) => dialog.pending = None,
                _ => {}
            }
        }
    }

    /// Where to draw an object: live drag, then an unsettled move, then stored
    pub fn display_position(&self, object: &AppObject) -> [f32; 3] {
        if let Some((id, position)) = self.drag.preview() {
            if id == object.id {
                return position;
            }
        }
        match &self.pending_move {
            Some(pending) if pending.id == object.id => pending.position,
            _ => object.position,
        }
    }

    /// Open the create dialog at `position`, unless there is no designer to own the object
    pub fn open_create(&mut self, position: [f32; 3], designers: &[Designer], query: &mut QueryClient) -> bool {
        if designers.is_empty() {
            let now = query.now();
            query.toasts.push(
                "No Designers Found",
                "Please create a designer first before adding objects.",
                ToastVariant::Destructive,
                now,
            );
            return false;
        }
        self.create_dialog = Some(CreateDialog {
            form: ObjectForm::new_at(position),
            pending: None,
        });
        true
    }

    /// Validate the create dialog and submit it
    pub fn submit_create(&mut self, designers: &[Designer], query: &mut QueryClient) {
        let Some(dialog) = &mut self.create_dialog else {
            return;
        };
        if dialog.pending.is_some() {
            return;
        }
        if let Ok(data) = dialog.form.submit(designers) {
            dialog.pending = Some(query.mutate(Mutation::CreateObject(data)));
        }
    }

    /// Validate the property form and submit it for the selected object
    pub fn submit_properties(&mut self, designers: &[Designer], query: &mut QueryClient) {
        let (Some(id), Some(form)) = (&self.selected, &mut self.properties) else {
            return;
        };
        if let Ok(data) = form.submit(designers) {
            query.mutate(Mutation::UpdateObject { id: id.clone(), data });
        }
    }

    pub fn delete_selected(&mut self, query: &mut QueryClient) {
        if let Some(id) = self.selected.take() {
            query.mutate(Mutation::DeleteObject(id));
            self.properties = None;
        }
    }

    /// Apply the end of a pointer gesture
    pub fn finish_gesture(&mut self, outcome: DragOutcome, objects: &[AppObject], query: &mut QueryClient) {
        match outcome {
            DragOutcome::None => {}
            DragOutcome::Select(id) => self.select(Some(&id), objects),
            DragOutcome::Commit { id, position } => {
                log::debug!("moving {} to {:?}", id, position);
                let mutation = query.mutate(Mutation::MoveObject {
                    id: id.clone(),
                    position,
                });
                self.pending_move = Some(PendingMove {
                    mutation,
                    id: id.clone(),
                    position,
                });
                self.select(Some(&id), objects);
            }
        }
    }
}

/// Round to one decimal place
fn round_tenth(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

/// Random spot in the middle of the grid
pub fn random_spot() -> [f32; 3] {
    [
        round_tenth(gen_range(-RANDOM_SPOT_RANGE, RANDOM_SPOT_RANGE)),
        0.0,
        round_tenth(gen_range(-RANDOM_SPOT_RANGE, RANDOM_SPOT_RANGE)),
    ]
}

/// Random spot close to a ground point
pub fn random_nearby(hit: Vec3) -> [f32; 3] {
    [
        round_tenth(hit.x + gen_range(-NEARBY_JITTER, NEARBY_JITTER)),
        0.0,
        round_tenth(hit.z + gen_range(-NEARBY_JITTER, NEARBY_JITTER)),
    ]
}
