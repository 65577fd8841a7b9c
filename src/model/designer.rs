//! Designer records
//!
//! A designer is a team member who owns placed objects. The availability
//! window is stored as two hours of the day; `attached_objects_count` is a
//! derived counter kept in step by the data-access layer.

use serde::{Deserialize, Deserializer, Serialize};

/// Latest hour a window may end on
pub const LAST_HOUR: u8 = 23;

/// Start hour assumed when migrating the old single `workingHours` count
pub const LEGACY_START_HOUR: u8 = 9;

/// A team member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designer {
    pub id: String,
    pub full_name: String,
    /// Start of the availability window (hour of day, 0-23)
    pub working_hours_from: u8,
    /// End of the availability window (hour of day, 0-23)
    pub working_hours_to: u8,
    /// Number of objects whose `designer_id` points here
    #[serde(default, deserialize_with = "non_negative_count")]
    pub attached_objects_count: u32,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: u64,
}

impl Designer {
    /// Length of the availability window in hours
    pub fn availability_hours(&self) -> u8 {
        self.working_hours_to.saturating_sub(self.working_hours_from)
    }

    /// Window formatted for badges, e.g. "09:00 - 17:00"
    pub fn availability_label(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.working_hours_from, self.working_hours_to)
    }

    /// First letter of the name, used as an avatar
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    /// Replace all user-editable fields
    pub fn apply(&mut self, patch: &DesignerPatch) {
        if let Some(name) = &patch.full_name {
            self.full_name = name.clone();
        }
        if let Some(from) = patch.working_hours_from {
            self.working_hours_from = from;
        }
        if let Some(to) = patch.working_hours_to {
            self.working_hours_to = to;
        }
    }
}

/// Fields supplied when creating a designer
#[derive(Debug, Clone, PartialEq)]
pub struct InsertDesigner {
    pub full_name: String,
    pub working_hours_from: u8,
    pub working_hours_to: u8,
}

/// Partial designer update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignerPatch {
    pub full_name: Option<String>,
    pub working_hours_from: Option<u8>,
    pub working_hours_to: Option<u8>,
}

impl From<InsertDesigner> for DesignerPatch {
    fn from(data: InsertDesigner) -> Self {
        Self {
            full_name: Some(data.full_name),
            working_hours_from: Some(data.working_hours_from),
            working_hours_to: Some(data.working_hours_to),
        }
    }
}

/// Counters written by older builds could go negative; clamp them on read.
fn non_negative_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, u32::MAX as i64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Designer {
        Designer {
            id: "d1".into(),
            full_name: "alice Johnson".into(),
            working_hours_from: 9,
            working_hours_to: 17,
            attached_objects_count: 2,
            created_at: 0,
        }
    }

    #[test]
    fn test_availability() {
        let d = alice();
        assert_eq!(d.availability_hours(), 8);
        assert_eq!(d.availability_label(), "09:00 - 17:00");
        assert_eq!(d.initial(), 'A');
    }

    #[test]
    fn test_camel_case_fields() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["fullName"], "alice Johnson");
        assert_eq!(json["workingHoursFrom"], 9);
        assert_eq!(json["attachedObjectsCount"], 2);
    }

    #[test]
    fn test_negative_count_clamped() {
        let json = r#"{"id":"d9","fullName":"Zed","workingHoursFrom":8,
            "workingHoursTo":12,"attachedObjectsCount":-1,"createdAt":5}"#;
        let d: Designer = serde_json::from_str(json).unwrap();
        assert_eq!(d.attached_objects_count, 0);
    }

    #[test]
    fn test_apply_patch() {
        let mut d = alice();
        d.apply(&DesignerPatch {
            working_hours_to: Some(20),
            ..Default::default()
        });
        assert_eq!(d.working_hours_to, 20);
        assert_eq!(d.full_name, "alice Johnson");
    }
}
