//! Create/edit forms
//!
//! Forms hold raw field text, validate it on submit and hand back a typed
//! insert record. A form that fails validation keeps its errors for the view
//! to render under each field; nothing reaches the data layer.

pub mod designer_form;
pub mod object_form;

pub use designer_form::DesignerForm;
pub use object_form::{ObjectForm, COLOR_SWATCHES};

use thiserror::Error;

/// Field-level validation failures, in field order
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure; only the first message per field is kept
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// `Ok(value)` when nothing failed
    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name is required");
        errors.push("name", "something else");
        errors.push("color", "bad color");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.iter().map(|(f, _)| f).collect::<Vec<_>>(), vec!["name", "color"]);
        assert_eq!(errors.to_string(), "2 field(s) failed validation");
    }
}
