//! Orbit camera for the scene viewport

use macroquad::prelude::*;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 60.0;
const MAX_ELEVATION: f32 = 1.4;
const ORBIT_SPEED: f32 = 0.005;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 500.0;

/// Camera circling a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Horizontal angle (radians), 0 looks down -Z
    pub azimuth: f32,
    /// Vertical angle above the ground plane (radians)
    pub elevation: f32,
    pub distance: f32,
    /// Vertical field of view (radians)
    pub fovy: f32,
}

impl Default for OrbitCamera {
    /// Looking at the origin from (5, 5, 5)
    fn default() -> Self {
        let eye = vec3(5.0, 5.0, 5.0);
        let distance = eye.length();
        Self {
            target: Vec3::ZERO,
            azimuth: eye.x.atan2(eye.z),
            elevation: (eye.y / distance).asin(),
            distance,
            fovy: 50f32.to_radians(),
        }
    }
}

impl OrbitCamera {
    /// Rotate by a mouse delta in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ORBIT_SPEED;
        self.elevation = (self.elevation + dy * ORBIT_SPEED).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }

    /// Scroll zoom: positive scroll moves closer
    pub fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let factor = if scroll > 0.0 { 0.9 } else { 1.1 };
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// World-space camera position
    pub fn eye(&self) -> Vec3 {
        let (el, az) = (self.elevation, self.azimuth);
        self.target + vec3(el.cos() * az.sin(), el.sin(), el.cos() * az.cos()) * self.distance
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(self.fovy, aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        proj * view
    }

    /// Macroquad camera drawing into `target`
    pub fn to_camera3d(&self, aspect: f32, target: Option<RenderTarget>) -> Camera3D {
        Camera3D {
            position: self.eye(),
            target: self.target,
            up: Vec3::Y,
            fovy: self.fovy,
            aspect: Some(aspect),
            projection: Projection::Perspective,
            render_target: target,
            ..Default::default()
        }
    }

    /// Screen position of a world point inside a `w` x `h` viewport
    pub fn project(&self, point: Vec3, w: f32, h: f32) -> Option<Vec2> {
        let clip = self.view_proj(w / h) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(vec2((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h))
    }
}
