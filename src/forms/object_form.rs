//! Object create/edit form

use super::FieldErrors;
use crate::model::{ground_offset, parse_hex_color, AppObject, Designer, InsertObject, Shape, SizeClass, DEFAULT_COLOR};
use crate::ui::TextInputState;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESIGNER: &str = "designerId";
pub const FIELD_COLOR: &str = "color";

/// Quick-pick colors shown next to the hex input
pub const COLOR_SWATCHES: [&str; 8] = [
    "#3b82f6", "#ef4444", "#22c55e", "#eab308", "#a855f7", "#f97316", "#14b8a6", "#64748b",
];

#[derive(Debug, Clone)]
pub struct ObjectForm {
    pub name: TextInputState,
    pub designer_id: String,
    pub color: TextInputState,
    pub shape: Shape,
    pub size: SizeClass,
    /// Carried through unchanged except for y, which follows shape and size
    pub position: [f32; 3],
    pub errors: FieldErrors,
}

impl ObjectForm {
    /// Blank form for an object placed at `position`
    pub fn new_at(position: [f32; 3]) -> Self {
        let mut color = TextInputState::new(DEFAULT_COLOR);
        color.focused = false;
        Self {
            name: TextInputState::new(""),
            designer_id: String::new(),
            color,
            shape: Shape::default(),
            size: SizeClass::default(),
            position,
            errors: FieldErrors::new(),
        }
    }

    /// Form bound to an existing object (property panel)
    pub fn from_object(object: &AppObject) -> Self {
        let mut name = TextInputState::new(object.name.clone());
        name.focused = false;
        let mut color = TextInputState::new(object.color.clone());
        color.focused = false;
        Self {
            name,
            designer_id: object.designer_id.clone(),
            color,
            shape: object.shape,
            size: object.size,
            position: object.position,
            errors: FieldErrors::new(),
        }
    }

    pub fn set_color(&mut self, hex: &str) {
        self.color.set_text(hex);
        self.color.focused = false;
    }

    /// Validate against the designers that currently exist
    pub fn validate(&self, designers: &[Designer]) -> Result<InsertObject, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.text.trim();
        if name.is_empty() {
            errors.push(FIELD_NAME, "Name is required");
        }
        if self.designer_id.is_empty() || !designers.iter().any(|d| d.id == self.designer_id) {
            errors.push(FIELD_DESIGNER, "Designer is required");
        }
        let color = self.color.text.trim().to_ascii_lowercase();
        if !color.starts_with('#') || parse_hex_color(&color).is_none() {
            errors.push(FIELD_COLOR, "Color must be a hex value like #3b82f6");
        }

        errors.into_result(|| InsertObject {
            name: name.to_string(),
            designer_id: self.designer_id.clone(),
            color,
            shape: self.shape,
            size: self.size,
            position: [
                self.position[0],
                ground_offset(self.shape, self.size),
                self.position[2],
            ],
        })
    }

    pub fn submit(&mut self, designers: &[Designer]) -> Result<InsertObject, FieldErrors> {
        let result = self.validate(designers);
        self.errors = result.as_ref().err().cloned().unwrap_or_default();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn designers() -> Vec<Designer> {
        vec![Designer {
            id: "d1".into(),
            full_name: "Alice Johnson".into(),
            working_hours_from: 9,
            working_hours_to: 17,
            attached_objects_count: 0,
            created_at: 0,
        }]
    }

    #[test]
    fn test_defaults() {
        let form = ObjectForm::new_at([1.0, 0.0, -2.0]);
        assert_eq!(form.color.text, DEFAULT_COLOR);
        assert_eq!(form.shape, Shape::Box);
        assert_eq!(form.size, SizeClass::Normal);
    }

    #[test]
    fn test_valid_submission_rests_on_ground() {
        let mut form = ObjectForm::new_at([1.0, 0.0, -2.0]);
        form.name.text = "Tall One".into();
        form.designer_id = "d1".into();
        form.shape = Shape::Cylinder;
        form.size = SizeClass::Large;
        let data = form.submit(&designers()).unwrap();
        assert_eq!(data.position[0], 1.0);
        assert!((data.position[1] - 1.125).abs() < 0.001);
        assert_eq!(data.position[2], -2.0);
    }

    #[test]
    fn test_required_fields() {
        let mut form = ObjectForm::new_at([0.0; 3]);
        form.name.text = "   ".into();
        let errors = form.submit(&designers()).unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Name is required"));
        assert_eq!(errors.get(FIELD_DESIGNER), Some("Designer is required"));
        assert!(errors.get(FIELD_COLOR).is_none());
    }

    #[test]
    fn test_designer_must_exist() {
        let mut form = ObjectForm::new_at([0.0; 3]);
        form.name.text = "Cube".into();
        form.designer_id = "deleted".into();
        assert!(form.validate(&designers()).is_err());
    }

    #[test]
    fn test_color_must_be_hex() {
        let mut form = ObjectForm::new_at([0.0; 3]);
        form.name.text = "Cube".into();
        form.designer_id = "d1".into();
        form.color.text = "blue".into();
        let errors = form.validate(&designers()).unwrap_err();
        assert_eq!(errors.get(FIELD_COLOR), Some("Color must be a hex value like #3b82f6"));

        form.set_color("#EF4444");
        assert_eq!(form.validate(&designers()).unwrap().color, "#ef4444");
    }

    #[test]
    fn test_from_object() {
        let object = AppObject {
            id: "o2".into(),
            name: "Red Sphere".into(),
            designer_id: "d1".into(),
            color: "#ef4444".into(),
            shape: Shape::Sphere,
            size: SizeClass::Small,
            position: [2.0, 0.3, 0.0],
            created_at: 0,
        };
        let form = ObjectForm::from_object(&object);
        assert_eq!(form.name.text, "Red Sphere");
        assert_eq!(form.shape, Shape::Sphere);
        assert_eq!(form.position, [2.0, 0.3, 0.0]);
    }
}
