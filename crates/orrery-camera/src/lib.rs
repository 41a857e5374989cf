//! Camera flight and view-state control: idle orbit, fly-to-target, and
//! fly-home, driven once per frame by [`CameraFlightController::tick`].

pub mod controller;
pub mod easing;
pub mod flight;
pub mod orbit;

pub use controller::{CameraFlightController, CameraState, ViewMode, standoff_distance};
pub use easing::EasingFunction;
pub use flight::{CompletionAction, FlightAnimation, FlightKind};
