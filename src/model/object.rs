//! Placed scene objects
//!
//! Each object is a primitive (box, sphere or cylinder) resting on the ground
//! plane, owned by exactly one designer.

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

/// Primitive geometry of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Box,
    Sphere,
    Cylinder,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Box, Shape::Sphere, Shape::Cylinder];

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Box => "Box",
            Shape::Sphere => "Sphere",
            Shape::Cylinder => "Cylinder",
        }
    }

    /// Half the height of the unit-size geometry
    /// (unit cube, sphere of radius 0.5, cylinder of height 1.5)
    pub fn half_height(&self) -> f32 {
        match self {
            Shape::Box | Shape::Sphere => 0.5,
            Shape::Cylinder => 0.75,
        }
    }
}

/// Size class, applied as a uniform scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Normal,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Normal, SizeClass::Large];

    pub fn label(&self) -> &'static str {
        match self {
            SizeClass::Small => "Small",
            SizeClass::Normal => "Normal",
            SizeClass::Large => "Large",
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            SizeClass::Small => 0.6,
            SizeClass::Normal => 1.0,
            SizeClass::Large => 1.5,
        }
    }
}

/// Height at which an object of this shape and size rests on the ground
pub fn ground_offset(shape: Shape, size: SizeClass) -> f32 {
    shape.half_height() * size.scale()
}

/// Default color for new objects
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// A primitive placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppObject {
    pub id: String,
    pub name: String,
    pub designer_id: String,
    pub color: String,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub size: SizeClass,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub created_at: u64,
}

impl AppObject {
    /// Render color, falling back to the default blue for malformed values
    pub fn render_color(&self) -> Color {
        parse_hex_color(&self.color)
            .or_else(|| parse_hex_color(DEFAULT_COLOR))
            .unwrap_or(Color::new(0.23, 0.51, 0.96, 1.0))
    }

    pub fn ground_offset(&self) -> f32 {
        ground_offset(self.shape, self.size)
    }

    /// Half extents of the bounding box around the rendered primitive
    pub fn half_extents(&self) -> [f32; 3] {
        let s = self.size.scale();
        let half_h = self.shape.half_height() * s;
        [0.5 * s, half_h, 0.5 * s]
    }

    pub fn apply(&mut self, patch: &ObjectPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(designer_id) = &patch.designer_id {
            self.designer_id = designer_id.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
    }
}

/// Fields supplied when creating an object
#[derive(Debug, Clone, PartialEq)]
pub struct InsertObject {
    pub name: String,
    pub designer_id: String,
    pub color: String,
    pub shape: Shape,
    pub size: SizeClass,
    pub position: [f32; 3],
}

/// Partial object update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub designer_id: Option<String>,
    pub color: Option<String>,
    pub shape: Option<Shape>,
    pub size: Option<SizeClass>,
    pub position: Option<[f32; 3]>,
}

impl ObjectPatch {
    /// Position-only update, as issued when a drag ends
    pub fn position(position: [f32; 3]) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }
}

impl From<InsertObject> for ObjectPatch {
    fn from(data: InsertObject) -> Self {
        Self {
            name: Some(data.name),
            designer_id: Some(data.designer_id),
            color: Some(data.color),
            shape: Some(data.shape),
            size: Some(data.size),
            position: Some(data.position),
        }
    }
}

/// Parse "#rrggbb" (or "rrggbb") into a color
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let r = ((value >> 16) & 0xff) as u8;
    let g = ((value >> 8) & 0xff) as u8;
    let b = (value & 0xff) as u8;
    Some(Color::from_rgba(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        let c = parse_hex_color("#ff0000").unwrap();
        assert!((c.r - 1.0).abs() < 0.001);
        assert!(c.g.abs() < 0.001);
        assert!(parse_hex_color("#ff00").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("22c55e").is_some());
    }

    #[test]
    fn test_ground_offset() {
        assert!((ground_offset(Shape::Box, SizeClass::Normal) - 0.5).abs() < 0.001);
        assert!((ground_offset(Shape::Cylinder, SizeClass::Normal) - 0.75).abs() < 0.001);
        assert!((ground_offset(Shape::Sphere, SizeClass::Large) - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_legacy_object_defaults() {
        let json = r##"{"id":"o1","name":"Blue Cube","designerId":"d1","color":"#3b82f6"}"##;
        let obj: AppObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.shape, Shape::Box);
        assert_eq!(obj.size, SizeClass::Normal);
        assert_eq!(obj.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_lowercase_enums() {
        let value = serde_json::to_value(Shape::Cylinder).unwrap();
        assert_eq!(value, "cylinder");
        let size: SizeClass = serde_json::from_str("\"large\"").unwrap();
        assert_eq!(size, SizeClass::Large);
    }

    #[test]
    fn test_position_patch_only_moves() {
        let mut obj = AppObject {
            id: "o1".into(),
            name: "Cube".into(),
            designer_id: "d1".into(),
            color: DEFAULT_COLOR.into(),
            shape: Shape::Box,
            size: SizeClass::Normal,
            position: [0.0, 0.5, 0.0],
            created_at: 0,
        };
        obj.apply(&ObjectPatch::position([2.0, 0.5, -1.0]));
        assert_eq!(obj.position, [2.0, 0.5, -1.0]);
        assert_eq!(obj.name, "Cube");
        assert_eq!(obj.designer_id, "d1");
    }
}
