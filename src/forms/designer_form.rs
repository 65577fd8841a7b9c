//! Designer create/edit form

use super::FieldErrors;
use crate::model::{Designer, InsertDesigner, LAST_HOUR};
use crate::ui::TextInputState;

pub const FIELD_NAME: &str = "fullName";
pub const FIELD_FROM: &str = "workingHoursFrom";
pub const FIELD_TO: &str = "workingHoursTo";

const MIN_NAME_LEN: usize = 3;
const DEFAULT_FROM: u8 = 9;
const DEFAULT_TO: u8 = 17;

#[derive(Debug, Clone)]
pub struct DesignerForm {
    pub full_name: TextInputState,
    pub from: TextInputState,
    pub to: TextInputState,
    /// Designer being edited; `None` when creating
    pub editing: Option<String>,
    pub errors: FieldErrors,
}

impl DesignerForm {
    /// Blank form for a new designer (9 to 17)
    pub fn new() -> Self {
        Self::with_values("", DEFAULT_FROM, DEFAULT_TO, None)
    }

    /// Form pre-filled from an existing designer
    pub fn edit(designer: &Designer) -> Self {
        Self::with_values(
            &designer.full_name,
            designer.working_hours_from,
            designer.working_hours_to,
            Some(designer.id.clone()),
        )
    }

    fn with_values(name: &str, from: u8, to: u8, editing: Option<String>) -> Self {
        let mut form = Self {
            full_name: TextInputState::new(name),
            from: TextInputState::new(from.to_string()),
            to: TextInputState::new(to.to_string()),
            editing,
            errors: FieldErrors::new(),
        };
        form.from.focused = false;
        form.to.focused = false;
        form
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Validate without touching `self.errors`
    pub fn validate(&self) -> Result<InsertDesigner, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.full_name.text.trim();
        if name.chars().count() < MIN_NAME_LEN {
            errors.push(FIELD_NAME, "Name must be at least 3 characters");
        }

        let from = parse_hour(&self.from.text);
        let to = parse_hour(&self.to.text);
        if from.is_none() {
            errors.push(FIELD_FROM, "Must be an hour between 0 and 23");
        }
        if to.is_none() {
            errors.push(FIELD_TO, "Must be an hour between 0 and 23");
        }
        if let (Some(from), Some(to)) = (from, to) {
            if to <= from {
                errors.push(FIELD_TO, "End hour must be after start hour");
            }
        }

        errors.into_result(|| InsertDesigner {
            full_name: name.to_string(),
            working_hours_from: from.unwrap_or(DEFAULT_FROM),
            working_hours_to: to.unwrap_or(DEFAULT_TO),
        })
    }

    /// Validate and remember the errors for display
    pub fn submit(&mut self) -> Result<InsertDesigner, FieldErrors> {
        let result = self.validate();
        self.errors = result.as_ref().err().cloned().unwrap_or_default();
        result
    }
}

impl Default for DesignerForm {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_hour(text: &str) -> Option<u8> {
    text.trim().parse::<u8>().ok().filter(|h| *h <= LAST_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, from: &str, to: &str) -> DesignerForm {
        let mut form = DesignerForm::new();
        form.full_name.text = name.into();
        form.from.text = from.into();
        form.to.text = to.into();
        form
    }

    #[test]
    fn test_defaults() {
        let form = DesignerForm::new();
        assert_eq!(form.from.text, "9");
        assert_eq!(form.to.text, "17");
        assert!(!form.is_edit());
    }

    #[test]
    fn test_valid_submission() {
        let data = form("  Carol Danvers ", "8", "16").submit().unwrap();
        assert_eq!(data.full_name, "Carol Danvers");
        assert_eq!((data.working_hours_from, data.working_hours_to), (8, 16));
    }

    #[test]
    fn test_short_name() {
        let mut f = form("Al", "9", "17");
        let errors = f.submit().unwrap_err();
        assert_eq!(errors.get(FIELD_NAME), Some("Name must be at least 3 characters"));
        assert_eq!(f.errors, errors);
    }

    #[test]
    fn test_window_order_rejected() {
        let errors = form("Alice", "17", "17").validate().unwrap_err();
        assert_eq!(errors.get(FIELD_TO), Some("End hour must be after start hour"));
        let errors = form("Alice", "18", "9").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_hour_range() {
        let errors = form("Alice", "24", "abc").validate().unwrap_err();
        assert_eq!(errors.get(FIELD_FROM), Some("Must be an hour between 0 and 23"));
        assert_eq!(errors.get(FIELD_TO), Some("Must be an hour between 0 and 23"));
        assert!(form("Alice", "0", "23").validate().is_ok());
        assert!(form("Alice", "-1", "5").validate().is_err());
    }

    #[test]
    fn test_edit_prefills() {
        let designer = Designer {
            id: "d1".into(),
            full_name: "Alice Johnson".into(),
            working_hours_from: 7,
            working_hours_to: 15,
            attached_objects_count: 2,
            created_at: 0,
        };
        let mut f = DesignerForm::edit(&designer);
        assert_eq!(f.editing.as_deref(), Some("d1"));
        let data = f.submit().unwrap();
        assert_eq!(data.full_name, "Alice Johnson");
        assert_eq!(data.working_hours_to, 15);
        assert!(f.errors.is_empty());
    }
}
