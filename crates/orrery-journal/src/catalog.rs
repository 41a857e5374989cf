//! Planet metadata lookup.

use std::future::Future;

use crate::error::JournalError;
use crate::model::PlanetRecord;

/// Resolves a node's internal name to its display record.
pub trait PlanetLookup {
    fn lookup(&self, node: &str) -> impl Future<Output = Result<PlanetRecord, JournalError>> + Send;
}
