//! Planet selection and the journal it opens.
//!
//! Resolves a picked node to a display record and the current identity's
//! journal entries, concurrently and without blocking the render loop.
//! Results are tagged with the selection they belong to, so a newer pick
//! always wins over late results for an older one.

pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod memory;
pub mod model;
pub mod panel;
pub mod session;
pub mod store;

pub use catalog::PlanetLookup;
pub use coordinator::{EntriesState, SelectionCoordinator, SelectionState, SelectionTag};
pub use error::{AuthError, DataError, JournalError};
pub use memory::MemoryJournal;
pub use model::{Identity, JournalEntry, OwnerFilter, PlanetRecord, UNTITLED_ENTRY, UserId};
pub use panel::{JournalPanel, LoginPanel};
pub use session::{Authenticator, IdentityWatch, Session, SessionGate};
pub use store::JournalStore;
