//! Time-bounded camera flights: interpolates position and look target
//! between two poses over a wall-clock duration with easing.

use orrery_scene::CameraPose;

use crate::easing::EasingFunction;

/// Progress within this distance of 1.0 counts as arrived, so a run of
/// frame deltas that sums to the duration always completes.
const COMPLETION_EPSILON: f32 = 1e-5;

/// Which flight is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightKind {
    /// Flying to a picked body.
    ToTarget,
    /// Flying back to the home pose.
    Home,
}

/// What happens to the camera when a flight arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionAction {
    /// Leave auto-rotate as it is.
    Settle,
    /// Turn idle auto-rotation back on.
    ResumeAutoRotate,
}

/// An in-flight camera animation. At most one exists per controller;
/// starting a new one replaces it outright.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightAnimation {
    pub kind: FlightKind,
    /// Pose at the moment the flight started.
    pub from: CameraPose,
    /// Pose the flight arrives at.
    pub to: CameraPose,
    /// Total duration in seconds. Zero means arrive on the next tick.
    pub duration_secs: f32,
    /// Linear progress in `[0, 1]`.
    pub elapsed_fraction: f32,
    pub easing: EasingFunction,
    pub on_complete: CompletionAction,
}

impl FlightAnimation {
    pub fn new(
        kind: FlightKind,
        from: CameraPose,
        to: CameraPose,
        duration_secs: f32,
        easing: EasingFunction,
        on_complete: CompletionAction,
    ) -> Self {
        let duration_secs = if duration_secs.is_finite() {
            duration_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            kind,
            from,
            to,
            duration_secs,
            elapsed_fraction: 0.0,
            easing,
            on_complete,
        }
    }

    /// Advance by `dt` seconds and return the interpolated pose.
    /// Negative or non-finite `dt` does not move the flight.
    pub fn advance(&mut self, dt: f32) -> CameraPose {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.duration_secs <= 0.0 {
            self.elapsed_fraction = 1.0;
        } else {
            self.elapsed_fraction = (self.elapsed_fraction + dt / self.duration_secs).min(1.0);
            if self.elapsed_fraction >= 1.0 - COMPLETION_EPSILON {
                self.elapsed_fraction = 1.0;
            }
        }
        self.current_pose()
    }

    /// Pose at the current progress. Exactly `to` once finished.
    pub fn current_pose(&self) -> CameraPose {
        if self.is_finished() {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed_fraction);
        self.from.lerp(&self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_fraction >= 1.0
    }
}
