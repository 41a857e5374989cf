//! Journal, authentication, and data-fixture error types.

use std::path::PathBuf;
use std::time::Duration;

/// Failures of the planet lookup or the journal-entries query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    /// No planet record exists for the node name.
    #[error("no planet record for {0:?}")]
    NotFound(String),

    /// The data store reported an error.
    #[error("journal backend error: {0}")]
    Backend(String),

    /// The query did not finish in time.
    #[error("journal query timed out after {0:?}")]
    Timeout(Duration),
}

/// Sign-in failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("authentication backend error: {0}")]
    Backend(String),
}

/// Failures loading the in-memory journal fixture.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read journal data {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse journal data: {0}")]
    Parse(#[source] ron::error::SpannedError),
}
