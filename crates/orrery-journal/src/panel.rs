//! Presentation seams for the journal and login panels.

use crate::model::{JournalEntry, PlanetRecord};

/// The journal side panel. Title and entries arrive independently and in
/// either order.
pub trait JournalPanel {
    /// Show the panel with the planet's title and description.
    fn show_title(&mut self, record: &PlanetRecord);
    /// Replace the listed entries. An empty slice clears the list.
    fn show_entries(&mut self, entries: &[JournalEntry]);
    /// Show a "failed to load" placeholder in place of the entries.
    fn show_entries_failed(&mut self, reason: &str);
    fn hide(&mut self);
}

/// The sign-in / continue-as-guest prompt.
pub trait LoginPanel {
    fn show(&mut self);
    fn hide(&mut self);
    fn show_error(&mut self, message: &str);
}
