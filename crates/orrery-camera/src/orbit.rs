//! Orbit, auto-rotate, and zoom about the look target.
//!
//! All functions keep the look target fixed and move only the camera position.

use glam::{Quat, Vec3};
use orrery_scene::CameraPose;

/// Polar angle margin (radians) that keeps the camera off the poles, where
/// the up vector would flip.
const POLE_MARGIN: f32 = 1e-3;

/// Rotate the camera about the look target's vertical axis by `angle` radians.
pub fn orbit_yaw(pose: &CameraPose, angle: f32) -> CameraPose {
    let offset = pose.position - pose.target;
    CameraPose {
        position: pose.target + Quat::from_rotation_y(angle) * offset,
        target: pose.target,
    }
}

/// Orbit by `yaw` about the vertical axis and `pitch` toward the poles.
/// The polar angle is clamped so the camera never passes over a pole.
pub fn orbit(pose: &CameraPose, yaw: f32, pitch: f32) -> CameraPose {
    let offset = pose.position - pose.target;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return *pose;
    }

    let azimuth = offset.x.atan2(offset.z) - yaw;
    let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos() - pitch)
        .clamp(POLE_MARGIN, std::f32::consts::PI - POLE_MARGIN);

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    let offset = Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az) * radius;

    CameraPose {
        position: pose.target + offset,
        target: pose.target,
    }
}

/// Scale the camera's distance from the target by `factor`, clamped to
/// `[min_distance, max_distance]`.
pub fn zoom(pose: &CameraPose, factor: f32, min_distance: f32, max_distance: f32) -> CameraPose {
    let offset = pose.position - pose.target;
    let radius = offset.length();
    if radius <= f32::EPSILON || !factor.is_finite() || factor <= 0.0 {
        return *pose;
    }
    let lo = min_distance.min(max_distance);
    let hi = max_distance.max(min_distance);
    let distance = (radius * factor).clamp(lo, hi);
    CameraPose {
        position: pose.target + offset / radius * distance,
        target: pose.target,
    }
}
