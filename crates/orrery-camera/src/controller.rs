//! The camera flight controller: the single writer of camera state.
//!
//! Three view modes: idle (auto-rotating or user-orbiting), flying to a
//! picked target, and flying home. The mode is derived from the active
//! [`FlightAnimation`], so the camera is always in exactly one of them.
//! Starting any flight replaces the active one and starts from the current
//! interpolated pose.

use glam::{Vec2, Vec3};
use orrery_config::{CameraConfig, FlightConfig};
use orrery_scene::{BoundingSphere, CameraPose, PickHit, PointerPicker, SceneGraph, Viewport};
use tracing::{debug, info};

use crate::easing::EasingFunction;
use crate::flight::{CompletionAction, FlightAnimation, FlightKind};
use crate::orbit;

/// Camera state read by the viewport each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub pose: CameraPose,
    pub auto_rotate: bool,
    /// Radians per second.
    pub auto_rotate_speed: f32,
}

/// What the controller is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Idle,
    FlyingToTarget,
    FlyingHome,
}

/// Owns camera pose and the active flight.
#[derive(Clone, Debug)]
pub struct CameraFlightController {
    camera: CameraState,
    home: CameraPose,
    flight: Option<FlightAnimation>,
    easing: EasingFunction,
    camera_config: CameraConfig,
    flight_config: FlightConfig,
}

/// Distance to stand off from a body so it is framed by its size.
///
/// `radius * standoff_factor`, clamped to `[min_standoff, max_standoff]`.
/// Degenerate spheres get `min_standoff`.
pub fn standoff_distance(bounds: &BoundingSphere, config: &FlightConfig) -> f32 {
    let min = config.min_standoff.max(f32::EPSILON);
    let max = config.max_standoff.max(min);
    if bounds.is_degenerate() {
        return min;
    }
    let distance = bounds.radius * config.standoff_factor;
    if distance.is_finite() {
        distance.clamp(min, max)
    } else {
        min
    }
}

impl CameraFlightController {
    /// Create a controller resting at the configured home pose.
    pub fn new(camera_config: &CameraConfig, flight_config: &FlightConfig) -> Self {
        let home = CameraPose::new(
            Vec3::from_array(camera_config.home_position),
            Vec3::from_array(camera_config.home_target),
        );
        Self {
            camera: CameraState {
                pose: home,
                auto_rotate: camera_config.auto_rotate,
                auto_rotate_speed: camera_config.auto_rotate_speed,
            },
            home,
            flight: None,
            easing: EasingFunction::EaseOutCubic,
            camera_config: camera_config.clone(),
            flight_config: flight_config.clone(),
        }
    }

    /// Use a different easing curve for subsequent flights.
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn pose(&self) -> &CameraPose {
        &self.camera.pose
    }

    pub fn home(&self) -> &CameraPose {
        &self.home
    }

    pub fn active_flight(&self) -> Option<&FlightAnimation> {
        self.flight.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        match self.flight.as_ref().map(|f| f.kind) {
            None => ViewMode::Idle,
            Some(FlightKind::ToTarget) => ViewMode::FlyingToTarget,
            Some(FlightKind::Home) => ViewMode::FlyingHome,
        }
    }

    /// Pick under the pointer and, on a hit, fly to it.
    ///
    /// Returns the hit so the caller can resolve the selection. With no
    /// scene loaded, or nothing under the pointer, nothing changes.
    pub fn on_click<P: PointerPicker>(
        &mut self,
        ndc: Vec2,
        viewport: &Viewport,
        scene: Option<&SceneGraph>,
        picker: &P,
    ) -> Option<PickHit> {
        let Some(scene) = scene else {
            debug!("Click ignored: scene not loaded");
            return None;
        };
        let Some(hit) = picker.pick(ndc, viewport, &self.camera.pose, scene) else {
            debug!("Click hit nothing");
            return None;
        };
        self.fly_to(&hit);
        Some(hit)
    }

    /// Start a flight that frames the hit body, replacing any active flight.
    pub fn fly_to(&mut self, hit: &PickHit) {
        let target = hit.bounds.center;
        let distance = standoff_distance(&hit.bounds, &self.flight_config);

        let mut approach = (self.camera.pose.position - target).normalize_or_zero();
        if approach == Vec3::ZERO {
            approach = (self.home.position - self.home.target).normalize_or_zero();
        }
        if approach == Vec3::ZERO {
            approach = Vec3::Z;
        }

        let end = CameraPose::new(target + approach * distance, target);
        self.camera.auto_rotate = false;
        info!(node = %hit.node, standoff = distance, "Flying to target");
        self.start_flight(
            FlightKind::ToTarget,
            end,
            self.flight_config.to_target_secs,
            CompletionAction::Settle,
        );
    }

    /// Fly home from wherever the camera is now. Always legal.
    pub fn on_escape(&mut self) {
        info!(from = ?self.mode(), "Flying home");
        self.start_flight(
            FlightKind::Home,
            self.home,
            self.flight_config.home_secs,
            CompletionAction::ResumeAutoRotate,
        );
    }

    /// Pointer drag: orbit about the look target. Ignored mid-flight.
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        if !self.take_user_control() {
            return;
        }
        let s = self.camera_config.orbit_sensitivity;
        self.camera.pose = orbit::orbit(&self.camera.pose, dx * s, dy * s);
    }

    /// Wheel: zoom toward (positive delta) or away from the look target.
    /// Ignored mid-flight.
    pub fn on_wheel(&mut self, delta: f32) {
        if !self.take_user_control() {
            return;
        }
        let factor = self.camera_config.zoom_step.powf(delta);
        self.camera.pose = orbit::zoom(
            &self.camera.pose,
            factor,
            self.camera_config.min_distance,
            self.camera_config.max_distance,
        );
    }

    /// Advance one frame. Returns the kind of flight that arrived on this
    /// tick, if any; each flight reports arrival exactly once.
    pub fn tick(&mut self, dt: f32) -> Option<FlightKind> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let Some(flight) = self.flight.as_mut() else {
            if self.camera.auto_rotate {
                self.camera.pose =
                    orbit::orbit_yaw(&self.camera.pose, self.camera.auto_rotate_speed * dt);
            }
            return None;
        };

        self.camera.pose = flight.advance(dt);
        if !flight.is_finished() {
            return None;
        }

        let finished = self.flight.take()?;
        if finished.on_complete == CompletionAction::ResumeAutoRotate {
            self.camera.auto_rotate = true;
        }
        debug!(kind = ?finished.kind, "Flight arrived");
        Some(finished.kind)
    }

    fn start_flight(
        &mut self,
        kind: FlightKind,
        to: CameraPose,
        duration_secs: f32,
        on_complete: CompletionAction,
    ) {
        if let Some(previous) = self.flight.take() {
            debug!(
                kind = ?previous.kind,
                progress = previous.elapsed_fraction,
                "Superseding active flight"
            );
        }
        self.flight = Some(FlightAnimation::new(
            kind,
            self.camera.pose,
            to,
            duration_secs,
            self.easing,
            on_complete,
        ));
    }

    /// User input while idle stops auto-rotation. Returns false mid-flight.
    fn take_user_control(&mut self) -> bool {
        if self.flight.is_some() {
            return false;
        }
        self.camera.auto_rotate = false;
        true
    }
}
