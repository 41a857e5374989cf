//! Scene-side seams of the viewer: the loaded model graph, asynchronous
//! scene loading, pointer picking, and the viewport/projection.
//!
//! Rendering itself is behind [`ViewportService`]; this crate never touches a GPU.

pub mod error;
pub mod graph;
pub mod loader;
pub mod picker;
pub mod viewport;

pub use error::SceneError;
pub use graph::{BoundingSphere, NodeId, SceneGraph, SceneNode};
pub use loader::{RonSceneLoader, SceneLoader};
pub use picker::{PickHit, PointerPicker, Ray, SpherePicker, ray_sphere_intersect};
pub use viewport::{CameraPose, Viewport, ViewportService};
