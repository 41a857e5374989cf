//! Pointer picking against node bounding spheres.

use glam::{Vec2, Vec3};

use crate::graph::{BoundingSphere, NodeId, SceneGraph};
use crate::viewport::{CameraPose, Viewport};

/// A world-space ray. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The nearest node under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    /// World-space point where the ray entered the node's bounds.
    pub point: Vec3,
    /// Bounds of the hit node, used to frame the fly-to.
    pub bounds: BoundingSphere,
    /// Distance along the ray to `point`.
    pub distance: f32,
}

/// Resolves a pointer position to the nearest intersected node, if any.
pub trait PointerPicker {
    fn pick(
        &self,
        ndc: Vec2,
        viewport: &Viewport,
        camera: &CameraPose,
        scene: &SceneGraph,
    ) -> Option<PickHit>;
}

/// Picks by intersecting the pointer ray with every node's bounding sphere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpherePicker;

impl PointerPicker for SpherePicker {
    fn pick(
        &self,
        ndc: Vec2,
        viewport: &Viewport,
        camera: &CameraPose,
        scene: &SceneGraph,
    ) -> Option<PickHit> {
        let ray = viewport.ray_through(camera, ndc);
        scene
            .nodes()
            .iter()
            .filter_map(|node| {
                ray_sphere_intersect(ray.origin, ray.direction, node.bounds.center, node.bounds.radius)
                    .map(|t| PickHit {
                        node: node.id.clone(),
                        point: ray.at(t),
                        bounds: node.bounds,
                        distance: t,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Distance along the ray to the first intersection in front of the origin.
pub fn ray_sphere_intersect(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let a = dir.dot(dir);
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);
    if t1 > 0.0 {
        Some(t1)
    } else if t2 > 0.0 {
        Some(t2)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SceneNode;

    fn scene() -> SceneGraph {
        SceneGraph::new(
            "Test",
            vec![
                SceneNode {
                    id: NodeId::new("Far"),
                    bounds: BoundingSphere::new(Vec3::new(0.0, 0.0, -100.0), 5.0),
                },
                SceneNode {
                    id: NodeId::new("Near"),
                    bounds: BoundingSphere::new(Vec3::new(0.0, 0.0, -20.0), 2.0),
                },
                SceneNode {
                    id: NodeId::new("Aside"),
                    bounds: BoundingSphere::new(Vec3::new(50.0, 0.0, -20.0), 2.0),
                },
            ],
        )
    }

    fn camera() -> CameraPose {
        CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    fn viewport() -> Viewport {
        Viewport::new(800, 600, 60.0, 0.1, 1000.0)
    }

    #[test]
    fn test_nearest_hit_wins() {
        let hit = SpherePicker
            .pick(Vec2::ZERO, &viewport(), &camera(), &scene())
            .unwrap();
        assert_eq!(hit.node.as_str(), "Near");
        assert!((hit.distance - 18.0).abs() < 1e-3);
        assert!((hit.point - Vec3::new(0.0, 0.0, -18.0)).length() < 1e-3);
    }

    #[test]
    fn test_empty_space_is_no_hit() {
        let hit = SpherePicker.pick(Vec2::new(-0.9, 0.9), &viewport(), &camera(), &scene());
        assert!(hit.is_none());
    }

    #[test]
    fn test_sphere_behind_camera_is_ignored() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -10.0), 1.0);
        assert!(t.is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_exit() {
        let t = ray_sphere_intersect(Vec3::ZERO, Vec3::X, Vec3::ZERO, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }
}
