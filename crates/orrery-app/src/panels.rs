//! Console stand-ins for the journal and login panels.
//!
//! Each panel keeps what it would be displaying and logs every change, so a
//! headless run reads like a transcript of the UI.

use orrery_journal::{JournalEntry, JournalPanel, LoginPanel, PlanetRecord};
use tracing::{info, warn};

/// What the journal panel's entry area is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EntriesView {
    #[default]
    Loading,
    List(Vec<JournalEntry>),
    Failed,
}

#[derive(Debug, Default)]
pub struct ConsoleJournalPanel {
    visible: bool,
    title: Option<PlanetRecord>,
    entries: EntriesView,
}

impl ConsoleJournalPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> Option<&PlanetRecord> {
        self.title.as_ref()
    }

    pub fn entries(&self) -> &EntriesView {
        &self.entries
    }

    /// Titles of the listed entries as rendered, untitled ones included.
    pub fn entry_titles(&self) -> Vec<&str> {
        match &self.entries {
            EntriesView::List(entries) => entries.iter().map(JournalEntry::display_title).collect(),
            _ => Vec::new(),
        }
    }
}

impl JournalPanel for ConsoleJournalPanel {
    fn show_title(&mut self, record: &PlanetRecord) {
        self.visible = true;
        info!(
            target: "orrery::panel",
            title = %record.display_name,
            description = %record.description,
            "Journal panel"
        );
        self.title = Some(record.clone());
    }

    fn show_entries(&mut self, entries: &[JournalEntry]) {
        self.visible = true;
        if entries.is_empty() {
            info!(target: "orrery::panel", "No journal entries");
        }
        for entry in entries {
            info!(
                target: "orrery::panel",
                title = entry.display_title(),
                content = %entry.content,
                images = entry.image_urls.len(),
                "Journal entry"
            );
        }
        self.entries = EntriesView::List(entries.to_vec());
    }

    fn show_entries_failed(&mut self, reason: &str) {
        self.visible = true;
        warn!(target: "orrery::panel", reason, "Failed to load journal entries");
        self.entries = EntriesView::Failed;
    }

    fn hide(&mut self) {
        if self.visible {
            info!(target: "orrery::panel", "Journal panel closed");
        }
        self.visible = false;
        self.title = None;
        self.entries = EntriesView::Loading;
    }
}

#[derive(Debug, Default)]
pub struct ConsoleLoginPanel {
    visible: bool,
    last_error: Option<String>,
}

impl ConsoleLoginPanel {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl LoginPanel for ConsoleLoginPanel {
    fn show(&mut self) {
        self.visible = true;
        self.last_error = None;
        info!(target: "orrery::panel", "Login: sign in or continue as guest");
    }

    fn hide(&mut self) {
        self.visible = false;
        self.last_error = None;
    }

    fn show_error(&mut self, message: &str) {
        warn!(target: "orrery::panel", error = message, "Login failed");
        self.last_error = Some(message.to_string());
    }
}
