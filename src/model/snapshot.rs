//! The persisted state: every designer and every object

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AppObject, Designer, Shape, SizeClass};

/// Full (designers, objects) state as written to storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub designers: Vec<Designer>,
    #[serde(default)]
    pub objects: Vec<AppObject>,
}

impl Snapshot {
    /// Initial dataset written on first access
    pub fn seed(now: u64) -> Self {
        let designer = |id: &str, name: &str, from: u8, to: u8, count: u32| Designer {
            id: id.into(),
            full_name: name.into(),
            working_hours_from: from,
            working_hours_to: to,
            attached_objects_count: count,
            created_at: now,
        };
        let object = |id: &str, name: &str, designer_id: &str, color: &str, shape: Shape, size: SizeClass, position: [f32; 3]| AppObject {
            id: id.into(),
            name: name.into(),
            designer_id: designer_id.into(),
            color: color.into(),
            shape,
            size,
            position,
            created_at: now,
        };

        Self {
            designers: vec![
                designer("d1", "Alice Johnson", 9, 17, 2),
                designer("d2", "Bob Smith", 9, 15, 1),
            ],
            objects: vec![
                object("o1", "Blue Cube", "d1", "#3b82f6", Shape::Box, SizeClass::Normal, [-2.0, 0.5, 0.0]),
                object("o2", "Red Sphere", "d1", "#ef4444", Shape::Sphere, SizeClass::Small, [2.0, 0.3, 0.0]),
                object("o3", "Green Cylinder", "d2", "#22c55e", Shape::Cylinder, SizeClass::Large, [0.0, 1.125, -2.0]),
            ],
        }
    }

    pub fn designer(&self, id: &str) -> Option<&Designer> {
        self.designers.iter().find(|d| d.id == id)
    }

    pub fn designer_mut(&mut self, id: &str) -> Option<&mut Designer> {
        self.designers.iter_mut().find(|d| d.id == id)
    }

    /// Recompute every designer's object counter from the objects list.
    ///
    /// Returns how many designers had a drifted counter.
    pub fn recount(&mut self) -> usize {
        let mut live: HashMap<&str, u32> = HashMap::new();
        for obj in &self.objects {
            *live.entry(obj.designer_id.as_str()).or_insert(0) += 1;
        }

        let mut repaired = 0;
        for designer in &mut self.designers {
            let actual = live.get(designer.id.as_str()).copied().unwrap_or(0);
            if designer.attached_objects_count != actual {
                designer.attached_objects_count = actual;
                repaired += 1;
            }
        }
        repaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts_consistent() {
        let mut seed = Snapshot::seed(0);
        assert_eq!(seed.designers.len(), 2);
        assert_eq!(seed.objects.len(), 3);
        assert_eq!(seed.recount(), 0);
        assert_eq!(seed.objects.iter().filter(|o| o.designer_id == "d1").count(), 2);
    }

    #[test]
    fn test_seed_objects_rest_on_ground() {
        let seed = Snapshot::seed(0);
        for obj in &seed.objects {
            assert!((obj.position[1] - obj.ground_offset()).abs() < 0.001, "{}", obj.name);
        }
    }

    #[test]
    fn test_recount_repairs_drift() {
        let mut snap = Snapshot::seed(0);
        snap.designers[0].attached_objects_count = 7;
        snap.designers[1].attached_objects_count = 0;
        assert_eq!(snap.recount(), 2);
        assert_eq!(snap.designers[0].attached_objects_count, 2);
        assert_eq!(snap.designers[1].attached_objects_count, 1);
    }
}
