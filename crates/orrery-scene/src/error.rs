//! Scene loading error types.

use std::path::PathBuf;

/// Errors that can occur while loading a scene manifest.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The manifest could not be read.
    #[error("failed to read scene {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid RON.
    #[error("failed to parse scene: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The manifest parsed but contains no pickable nodes.
    #[error("scene {0:?} has no nodes")]
    Empty(String),

    /// The model scale is zero, negative, or not finite.
    #[error("invalid model scale {0}")]
    InvalidScale(f32),
}
