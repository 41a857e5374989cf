use std::path::PathBuf;

use thiserror::Error;

use crate::platform::PlatformError;

/// Startup failures of the `orrery` binary. Everything after startup is
/// recovered in place.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("failed to read input script {path}: {source}")]
    ScriptRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid input script {path}: {source}")]
    ScriptParse {
        path: PathBuf,
        source: ScriptError,
    },
}

/// An input script that cannot be replayed.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Parse(#[from] ron::error::SpannedError),

    /// A step would never become due.
    #[error("step {index} is scheduled at non-finite time {at}")]
    NonFiniteTime { index: usize, at: f32 },
}
