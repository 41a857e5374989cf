//! Records exchanged with the journal services.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title shown for entries saved without one.
pub const UNTITLED_ENTRY: &str = "(Untitled Entry)";

/// Opaque id of a signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is looking at the journal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Identity {
    /// No signed-in user; only unowned entries are visible.
    #[default]
    Guest,
    AuthenticatedUser { id: UserId },
}

impl Identity {
    /// The entries-query predicate for this identity.
    pub fn owner_filter(&self) -> OwnerFilter {
        match self {
            Identity::Guest => OwnerFilter::Unowned,
            Identity::AuthenticatedUser { id } => OwnerFilter::OwnedBy(id.clone()),
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }
}

/// Which entries a query may return.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Entries with no owner.
    Unowned,
    /// Entries owned by exactly this user.
    OwnedBy(UserId),
}

impl OwnerFilter {
    pub fn matches(&self, owner: Option<&UserId>) -> bool {
        match (self, owner) {
            (OwnerFilter::Unowned, None) => true,
            (OwnerFilter::OwnedBy(id), Some(owner)) => id == owner,
            _ => false,
        }
    }
}

/// Human-readable metadata for a planet node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

impl PlanetRecord {
    /// Record used when the lookup misses or fails: the raw node name and
    /// no description.
    pub fn fallback(node: &str) -> Self {
        Self {
            display_name: node.to_string(),
            description: String::new(),
        }
    }
}

/// One journal entry as shown in the panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalEntry {
    pub title: String,
    pub content: String,
    pub image_urls: Vec<String>,
}

impl JournalEntry {
    /// Title for display; [`UNTITLED_ENTRY`] when blank.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED_ENTRY
        } else {
            &self.title
        }
    }
}
