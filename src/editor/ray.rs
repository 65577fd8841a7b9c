//! Ray casting for picking and ground-plane placement

use macroquad::prelude::*;
use crate::model::AppObject;
use crate::ui::Rect;
use super::camera::OrbitCamera;

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3, // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance t along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Ray from a screen position through the camera, for a viewport at `viewport`
pub fn screen_to_ray(mouse: (f32, f32), viewport: &Rect, camera: &OrbitCamera) -> Ray {
    let ndc_x = (mouse.0 - viewport.x) / viewport.w * 2.0 - 1.0;
    let ndc_y = 1.0 - (mouse.1 - viewport.y) / viewport.h * 2.0;

    let inverse = camera.view_proj(viewport.w / viewport.h).inverse();
    let near = inverse.project_point3(vec3(ndc_x, ndc_y, -1.0));
    let far = inverse.project_point3(vec3(ndc_x, ndc_y, 1.0));

    Ray::new(near, far - near)
}

/// Distance along the ray to a plane, if it is hit in front of the origin
pub fn ray_plane_intersection(ray: &Ray, plane_point: Vec3, plane_normal: Vec3) -> Option<f32> {
    let denom = ray.direction.dot(plane_normal);
    if denom.abs() < 0.0001 {
        return None; // Parallel
    }

    let t = (plane_point - ray.origin).dot(plane_normal) / denom;
    if t < 0.0 {
        return None; // Behind
    }

    Some(t)
}

/// Where the ray meets the y = 0 ground plane
pub fn ground_point(ray: &Ray) -> Option<Vec3> {
    ray_plane_intersection(ray, Vec3::ZERO, Vec3::Y).map(|t| ray.at(t))
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn around(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounds of an object's primitive at its stored position
    pub fn of_object(object: &AppObject) -> Self {
        Self::around(Vec3::from(object.position), Vec3::from(object.half_extents()))
    }

    /// Slab test; distance to the entry point (0 if the origin is inside)
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() < 1e-8 {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (self.min[axis] - origin) * inv;
            let mut t1 = (self.max[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Nearest object hit by the ray
pub fn pick_object<'a>(ray: &Ray, objects: &'a [AppObject]) -> Option<&'a AppObject> {
    objects
        .iter()
        .filter_map(|obj| Aabb::of_object(obj).intersect_ray(ray).map(|t| (t, obj)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, obj)| obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Shape, SizeClass};

    fn object(id: &str, position: [f32; 3]) -> AppObject {
        AppObject {
            id: id.to_string(),
            name: id.to_string(),
            designer_id: "d1".to_string(),
            color: "#ffffff".to_string(),
            shape: Shape::Box,
            size: SizeClass::Normal,
            position,
            created_at: 0,
        }
    }

    #[test]
    fn test_ray_plane_intersection() {
        let ray = Ray::new(vec3(0.0, 10.0, 0.0), vec3(0.0, -1.0, 0.0));
        let t = ray_plane_intersection(&ray, Vec3::ZERO, Vec3::Y).unwrap();
        assert!((t - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_plane_parallel_or_behind() {
        let flat = Ray::new(vec3(0.0, 1.0, 0.0), vec3(1.0, 0.0, 0.0));
        assert!(ray_plane_intersection(&flat, Vec3::ZERO, Vec3::Y).is_none());
        let up = Ray::new(vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0));
        assert!(ground_point(&up).is_none());
    }

    #[test]
    fn test_ground_point() {
        let ray = Ray::new(vec3(1.0, 4.0, 2.0), vec3(1.0, -1.0, 0.0));
        let hit = ground_point(&ray).unwrap();
        assert!((hit - vec3(5.0, 0.0, 2.0)).length() < 1e-4);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = OrbitCamera::default();
        let viewport = Rect::new(100.0, 50.0, 800.0, 600.0);
        let ray = screen_to_ray((500.0, 350.0), &viewport, &camera);
        let hit = ground_point(&ray).unwrap();
        assert!(hit.length() < 1e-3, "hit = {:?}", hit);
    }

    #[test]
    fn test_projection_roundtrip() {
        let camera = OrbitCamera::default();
        let viewport = Rect::new(0.0, 0.0, 640.0, 480.0);
        let world = vec3(1.5, 0.0, -2.0);
        let screen = camera.project(world, viewport.w, viewport.h).unwrap();
        let hit = ground_point(&screen_to_ray((screen.x, screen.y), &viewport, &camera)).unwrap();
        assert!((hit - world).length() < 1e-2, "hit = {:?}", hit);
    }

    #[test]
    fn test_aabb_hit_and_miss() {
        let bounds = Aabb::around(Vec3::ZERO, Vec3::splat(0.5));
        let hit = Ray::new(vec3(-5.0, 0.0, 0.0), Vec3::X);
        assert!((bounds.intersect_ray(&hit).unwrap() - 4.5).abs() < 1e-4);
        let miss = Ray::new(vec3(-5.0, 2.0, 0.0), Vec3::X);
        assert!(bounds.intersect_ray(&miss).is_none());
        let inside = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(bounds.intersect_ray(&inside), Some(0.0));
    }

    #[test]
    fn test_pick_nearest() {
        let objects = vec![object("far", [6.0, 0.5, 0.0]), object("near", [2.0, 0.5, 0.0])];
        let ray = Ray::new(vec3(-5.0, 0.5, 0.0), Vec3::X);
        assert_eq!(pick_object(&ray, &objects).map(|o| o.id.as_str()), Some("near"));
        let miss = Ray::new(vec3(-5.0, 5.0, 0.0), Vec3::X);
        assert!(pick_object(&miss, &objects).is_none());
    }
}
