//! Versioned migration chain for the persisted snapshot
//!
//! The blob carries a `version` field (absent on blobs written before
//! versioning, which counts as 0). Each step lifts the raw JSON one version;
//! steps also look at the record shape, so a record that already has the
//! newer fields passes through untouched even when the version is stale.

use serde_json::{Map, Value};

use super::StorageError;
use crate::model::{LAST_HOUR, LEGACY_START_HOUR};

/// Version written by `save`
pub const CURRENT_VERSION: u64 = 2;

type Step = fn(Value) -> Value;

/// Steps indexed by the version they migrate *from*
const STEPS: [(&str, Step); CURRENT_VERSION as usize] = [
    ("availability window", designers_v0_to_v1),
    ("object shape defaults", objects_v1_to_v2),
];

/// Version recorded in a raw blob
pub fn blob_version(blob: &Value) -> u64 {
    blob.get("version").and_then(Value::as_u64).unwrap_or(0)
}

/// Run every step between the blob's version and `CURRENT_VERSION`.
///
/// Returns the migrated blob and the number of steps applied.
pub fn migrate(mut blob: Value) -> Result<(Value, usize), StorageError> {
    if !blob.is_object() {
        return Err(StorageError::Migration("snapshot is not a JSON object".into()));
    }

    let from = blob_version(&blob);
    if from > CURRENT_VERSION {
        return Err(StorageError::Migration(format!(
            "snapshot version {} is newer than supported version {}",
            from, CURRENT_VERSION
        )));
    }

    let mut applied = 0;
    for (name, step) in STEPS.iter().skip(from as usize) {
        log::info!("Migrating snapshot: {}", name);
        blob = step(blob);
        applied += 1;
    }

    if let Some(map) = blob.as_object_mut() {
        map.insert("version".into(), Value::from(CURRENT_VERSION));
    }
    Ok((blob, applied))
}

/// Apply `f` to every record of a top-level array field
fn each_record(mut blob: Value, field: &str, f: impl Fn(&mut Map<String, Value>)) -> Value {
    if let Some(records) = blob.get_mut(field).and_then(Value::as_array_mut) {
        for record in records.iter_mut().filter_map(Value::as_object_mut) {
            f(record);
        }
    }
    blob
}

/// `workingHours = h` becomes the window `[9, min(23, 9 + h)]`
pub fn designers_v0_to_v1(blob: Value) -> Value {
    each_record(blob, "designers", |designer| {
        let has_window = designer.contains_key("workingHoursFrom") && designer.contains_key("workingHoursTo");
        let legacy = designer.remove("workingHours");
        if has_window {
            return;
        }

        let hours = legacy
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|h| h.is_finite() && *h > 0.0)
            .map(|h| h.min(24.0).floor() as u64)
            .unwrap_or(0);
        let start = LEGACY_START_HOUR as u64;
        let end = start.saturating_add(hours).min(LAST_HOUR as u64);

        designer.insert("workingHoursFrom".into(), Value::from(start));
        designer.insert("workingHoursTo".into(), Value::from(end));
    })
}

/// Objects from before shapes existed are unit boxes at the origin
pub fn objects_v1_to_v2(blob: Value) -> Value {
    each_record(blob, "objects", |object| {
        object.entry("shape").or_insert_with(|| Value::from("box"));
        object.entry("size").or_insert_with(|| Value::from("normal"));
        object
            .entry("position")
            .or_insert_with(|| Value::from(vec![0.0, 0.0, 0.0]));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn legacy_designer(hours: Value) -> Value {
        json!({
            "designers": [{
                "id": "d1", "fullName": "Alice", "workingHours": hours,
                "attachedObjectsCount": 0, "createdAt": 0
            }],
            "objects": []
        })
    }

    fn window(blob: &Value) -> (u64, u64) {
        let d = &blob["designers"][0];
        (
            d["workingHoursFrom"].as_u64().unwrap(),
            d["workingHoursTo"].as_u64().unwrap(),
        )
    }

    #[test]
    fn test_short_legacy_window() {
        let (blob, applied) = migrate(legacy_designer(json!(6))).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(window(&blob), (9, 15));
        assert!(blob["designers"][0].get("workingHours").is_none());
        assert_eq!(blob_version(&blob), CURRENT_VERSION);
    }

    #[test]
    fn test_long_legacy_window_clamped() {
        let (blob, _) = migrate(legacy_designer(json!(20))).unwrap();
        assert_eq!(window(&blob), (9, 23));
    }

    #[test]
    fn test_bad_legacy_hours_treated_as_zero() {
        let (blob, _) = migrate(legacy_designer(json!("lots"))).unwrap();
        assert_eq!(window(&blob), (9, 9));
        let (blob, _) = migrate(legacy_designer(json!(-4))).unwrap();
        assert_eq!(window(&blob), (9, 9));
    }

    #[test]
    fn test_huge_legacy_hours_clamp_to_last_hour() {
        let (blob, _) = migrate(legacy_designer(json!(1e30))).unwrap();
        assert_eq!(window(&blob), (9, 23));
        let (blob, _) = migrate(legacy_designer(json!(u64::MAX))).unwrap();
        assert_eq!(window(&blob), (9, 23));
    }

    #[test]
    fn test_new_shape_passes_through() {
        let blob = json!({
            "designers": [{ "id": "d1", "fullName": "Alice",
                "workingHoursFrom": 7, "workingHoursTo": 12 }],
            "objects": []
        });
        let (migrated, _) = migrate(blob).unwrap();
        assert_eq!(window(&migrated), (7, 12));
    }

    #[test]
    fn test_object_defaults() {
        let blob = json!({
            "version": 1,
            "designers": [],
            "objects": [
                { "id": "o1", "name": "Cube", "designerId": "d1", "color": "#3b82f6" },
                { "id": "o2", "name": "Ball", "designerId": "d1", "color": "#ef4444",
                  "shape": "sphere", "size": "small", "position": [1.0, 0.3, 2.0] }
            ]
        });
        let (migrated, applied) = migrate(blob).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(migrated["objects"][0]["shape"], "box");
        assert_eq!(migrated["objects"][0]["size"], "normal");
        assert_eq!(migrated["objects"][0]["position"], json!([0.0, 0.0, 0.0]));
        assert_eq!(migrated["objects"][1]["shape"], "sphere");
        assert_eq!(migrated["objects"][1]["position"], json!([1.0, 0.3, 2.0]));
    }

    #[test]
    fn test_current_version_untouched() {
        let blob = json!({ "version": CURRENT_VERSION, "designers": [], "objects": [] });
        let (migrated, applied) = migrate(blob.clone()).unwrap();
        assert_eq!(applied, 0);
        assert_eq!(migrated, blob);
    }

    #[test]
    fn test_future_version_rejected() {
        let blob = json!({ "version": 99, "designers": [], "objects": [] });
        assert!(matches!(migrate(blob), Err(StorageError::Migration(_))));
        assert!(matches!(migrate(json!([1, 2])), Err(StorageError::Migration(_))));
    }
}
