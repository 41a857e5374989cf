//! In-process journal backend loaded from a RON fixture.
//!
//! Implements planet lookup, the entries query, and sign-in so the viewer
//! runs end to end without a remote data store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::PlanetLookup;
use crate::error::{AuthError, DataError, JournalError};
use crate::model::{JournalEntry, OwnerFilter, PlanetRecord, UserId};
use crate::session::Authenticator;
use crate::store::JournalStore;

#[derive(Deserialize, Default)]
#[serde(default)]
struct Fixture {
    planets: Vec<PlanetRow>,
    entries: Vec<EntryRow>,
    users: Vec<UserRow>,
}

#[derive(Deserialize)]
struct PlanetRow {
    node_name: String,
    display_name: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct EntryRow {
    planet: String,
    #[serde(default)]
    owner: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    image_urls: Vec<String>,
}

#[derive(Deserialize)]
struct UserRow {
    email: String,
    password: String,
    id: String,
}

struct StoredEntry {
    planet: String,
    owner: Option<UserId>,
    entry: JournalEntry,
}

/// Journal data held in memory.
#[derive(Default)]
pub struct MemoryJournal {
    planets: HashMap<String, PlanetRecord>,
    entries: Vec<StoredEntry>,
    users: Vec<UserRow>,
}

impl MemoryJournal {
    pub fn from_ron(source: &str) -> Result<Self, DataError> {
        let fixture: Fixture = ron::from_str(source).map_err(DataError::Parse)?;
        Ok(Self::from_fixture(fixture))
    }

    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Read {
                path: PathBuf::from(path),
                source,
            })?;
        let journal = Self::from_ron(&contents)?;
        tracing::info!(
            planets = journal.planets.len(),
            entries = journal.entries.len(),
            "Loaded journal data from {}",
            path.display()
        );
        Ok(journal)
    }

    fn from_fixture(fixture: Fixture) -> Self {
        let planets = fixture
            .planets
            .into_iter()
            .map(|row| {
                (
                    row.node_name,
                    PlanetRecord {
                        display_name: row.display_name,
                        description: row.description,
                    },
                )
            })
            .collect();
        let entries = fixture
            .entries
            .into_iter()
            .map(|row| StoredEntry {
                planet: row.planet,
                owner: row.owner.map(UserId),
                entry: JournalEntry {
                    title: row.title,
                    content: row.content,
                    image_urls: row.image_urls,
                },
            })
            .collect();
        Self {
            planets,
            entries,
            users: fixture.users,
        }
    }
}

impl PlanetLookup for MemoryJournal {
    async fn lookup(&self, node: &str) -> Result<PlanetRecord, JournalError> {
        self.planets
            .get(node)
            .cloned()
            .ok_or_else(|| JournalError::NotFound(node.to_string()))
    }
}

impl JournalStore for MemoryJournal {
    async fn entries_for(
        &self,
        planet: &str,
        filter: &OwnerFilter,
    ) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.planet == planet && filter.matches(e.owner.as_ref()))
            .map(|e| e.entry.clone())
            .collect())
    }
}

impl Authenticator for MemoryJournal {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .map(|u| UserId(u.id.clone()))
            .ok_or(AuthError::InvalidCredentials)
    }
}
