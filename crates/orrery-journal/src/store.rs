//! Journal-entries query.

use std::future::Future;

use crate::error::JournalError;
use crate::model::{JournalEntry, OwnerFilter};

/// Fetches the journal entries for a planet visible under `filter`.
/// An empty result is not an error.
pub trait JournalStore {
    fn entries_for(
        &self,
        planet: &str,
        filter: &OwnerFilter,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, JournalError>> + Send;
}
