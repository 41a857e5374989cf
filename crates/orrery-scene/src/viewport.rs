//! Viewport projection and the rendering seam.

use glam::{Mat4, Vec2, Vec3};

use crate::graph::SceneGraph;
use crate::picker::Ray;

/// Where the camera is and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Linear interpolation of both position and target.
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }

    /// Distance from the camera to its look target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Unit view direction. Falls back to -Z when position and target coincide.
    pub fn forward(&self) -> Vec3 {
        let dir = (self.target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO { Vec3::NEG_Z } else { dir }
    }

    /// True when both points are within `epsilon` of `other`'s.
    pub fn approx_eq(&self, other: &CameraPose, epsilon: f32) -> bool {
        self.position.distance(other.position) <= epsilon
            && self.target.distance(other.target) <= epsilon
    }
}

/// Owns the render surface and draws a frame. Reads the camera, never writes it.
pub trait ViewportService {
    fn resize(&mut self, width: u32, height: u32);
    fn render_frame(&mut self, camera: &CameraPose, scene: Option<&SceneGraph>);
}

/// Perspective projection over a pixel-sized surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    /// Vertical field of view in radians.
    fov_y: f32,
    near: f32,
    far: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Reflow after a window resize. Zero-sized surfaces are clamped to 1px.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Convert a pointer position in window pixels to normalized device
    /// coordinates: x right, y up, both in `[-1, 1]`.
    pub fn pointer_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width as f32) * 2.0 - 1.0,
            -(y / self.height as f32) * 2.0 + 1.0,
        )
    }

    pub fn view_matrix(&self, camera: &CameraPose) -> Mat4 {
        Mat4::look_at_rh(camera.position, camera.position + camera.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio(), self.near, self.far)
    }

    /// World-space ray from the camera through `ndc`.
    pub fn ray_through(&self, camera: &CameraPose, ndc: Vec2) -> Ray {
        let forward = camera.forward();
        let mut right = forward.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            // Looking straight up or down.
            right = Vec3::X;
        }
        let up = right.cross(forward);

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect_ratio();
        let direction =
            (forward + right * (ndc.x * half_width) + up * (ndc.y * half_height)).normalize();

        Ray {
            origin: camera.position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1280, 720, 60.0, 0.1, 5000.0)
    }

    fn pose() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 50.0, 200.0), Vec3::ZERO)
    }

    #[test]
    fn test_pointer_to_ndc_corners() {
        let vp = viewport();
        assert!((vp.pointer_to_ndc(0.0, 0.0) - Vec2::new(-1.0, 1.0)).length() < 1e-6);
        assert!((vp.pointer_to_ndc(1280.0, 720.0) - Vec2::new(1.0, -1.0)).length() < 1e-6);
        assert!(vp.pointer_to_ndc(640.0, 360.0).length() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut vp = viewport();
        vp.resize(800, 800);
        assert!((vp.aspect_ratio() - 1.0).abs() < 1e-6);
        vp.resize(0, 0);
        assert_eq!(vp.size(), (1, 1));
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let ray = viewport().ray_through(&pose(), Vec2::ZERO);
        assert!((ray.direction - pose().forward()).length() < 1e-5);
        assert_eq!(ray.origin, pose().position);
    }

    #[test]
    fn test_ray_reprojects_to_same_ndc() {
        let vp = viewport();
        let camera = pose();
        let ndc = Vec2::new(0.4, -0.3);
        let ray = vp.ray_through(&camera, ndc);

        let world = ray.origin + ray.direction * 50.0;
        let clip = vp.projection_matrix() * vp.view_matrix(&camera) * world.extend(1.0);
        let projected = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        assert!((projected - ndc).length() < 1e-4, "got {projected:?}");
    }

    #[test]
    fn test_vertical_view_still_produces_ray() {
        let camera = CameraPose::new(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO);
        let ray = viewport().ray_through(&camera, Vec2::new(0.5, 0.5));
        assert!(ray.direction.is_finite());
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pose_lerp_midpoint() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::ZERO);
        let b = CameraPose::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert!(mid.approx_eq(
            &CameraPose::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)),
            1e-6
        ));
    }
}
