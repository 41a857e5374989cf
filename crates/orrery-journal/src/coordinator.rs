//! Selection coordinator: turns a pick into a panel title and a list of
//! journal entries.
//!
//! Each pick gets a fresh [`SelectionTag`]. The lookup and the entries query
//! run as two independent tasks that post tagged results back over a
//! channel; [`SelectionCoordinator::pump`] applies results for the current
//! tag and drops everything else. Nothing here blocks the caller.

use std::sync::Arc;
use std::time::Duration;

use orrery_config::JournalConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::PlanetLookup;
use crate::error::JournalError;
use crate::model::{JournalEntry, PlanetRecord};
use crate::panel::JournalPanel;
use crate::session::SessionGate;
use crate::store::JournalStore;

/// Identifies one pick. Results carrying an older tag are stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionTag(u64);

/// Progress of the entries half of a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntriesState {
    Pending,
    /// Entries shown; holds how many. A failed query shows zero.
    Loaded(usize),
    /// The query timed out; the panel shows a placeholder.
    Failed,
}

/// What is currently selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub tag: SelectionTag,
    /// Internal name of the picked node.
    pub node: String,
    /// Resolved display record; `None` while the lookup is pending.
    pub record: Option<PlanetRecord>,
    pub entries: EntriesState,
}

impl SelectionState {
    /// True while either half is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.record.is_none() || self.entries == EntriesState::Pending
    }
}

enum Update {
    Record(PlanetRecord),
    Entries(Result<Vec<JournalEntry>, JournalError>),
}

struct Posted {
    tag: SelectionTag,
    update: Update,
}

/// Owns the selection and the tasks resolving it.
pub struct SelectionCoordinator<L, S, G> {
    lookup: Arc<L>,
    store: Arc<S>,
    gate: Arc<G>,
    query_timeout: Duration,
    next_tag: u64,
    selection: Option<SelectionState>,
    tasks: Vec<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Posted>,
    rx: mpsc::UnboundedReceiver<Posted>,
}

impl<L, S, G> SelectionCoordinator<L, S, G>
where
    L: PlanetLookup + Send + Sync + 'static,
    S: JournalStore + Send + Sync + 'static,
    G: SessionGate + Send + Sync + 'static,
{
    pub fn new(lookup: Arc<L>, store: Arc<S>, gate: Arc<G>, config: &JournalConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            lookup,
            store,
            gate,
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            next_tag: 0,
            selection: None,
            tasks: Vec::new(),
            tx,
            rx,
        }
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.as_ref()
    }

    /// Select `node`, superseding any previous selection, and start resolving
    /// its display record and entries. Must be called inside a tokio runtime.
    pub fn on_pick(&mut self, node: &str) -> SelectionTag {
        self.abort_tasks();
        self.next_tag += 1;
        let tag = SelectionTag(self.next_tag);
        self.selection = Some(SelectionState {
            tag,
            node: node.to_string(),
            record: None,
            entries: EntriesState::Pending,
        });
        info!(node, ?tag, "Planet selected");

        let lookup = Arc::clone(&self.lookup);
        let tx = self.tx.clone();
        let name = node.to_string();
        self.tasks.push(tokio::spawn(async move {
            let record = match lookup.lookup(&name).await {
                Ok(record) => record,
                Err(err) => {
                    warn!(node = %name, %err, "Planet lookup failed; using node name");
                    PlanetRecord::fallback(&name)
                }
            };
            let _ = tx.send(Posted {
                tag,
                update: Update::Record(record),
            });
        }));

        let store = Arc::clone(&self.store);
        let gate = Arc::clone(&self.gate);
        let tx = self.tx.clone();
        let name = node.to_string();
        let timeout = self.query_timeout;
        self.tasks.push(tokio::spawn(async move {
            let query = async {
                let identity = gate.current_identity().await;
                debug!(node = %name, ?identity, "Querying journal entries");
                store.entries_for(&name, &identity.owner_filter()).await
            };
            let result = tokio::time::timeout(timeout, query)
                .await
                .unwrap_or(Err(JournalError::Timeout(timeout)));
            let _ = tx.send(Posted {
                tag,
                update: Update::Entries(result),
            });
        }));

        tag
    }

    /// Apply posted results for the current selection to `panel`; discard
    /// stale ones. Call once per frame. Returns how many results were applied.
    pub fn pump(&mut self, panel: &mut impl JournalPanel) -> usize {
        let mut applied = 0;
        while let Ok(Posted { tag, update }) = self.rx.try_recv() {
            let Some(selection) = self.selection.as_mut().filter(|s| s.tag == tag) else {
                debug!(?tag, "Discarding result for superseded selection");
                continue;
            };
            match update {
                Update::Record(record) => {
                    panel.show_title(&record);
                    selection.record = Some(record);
                }
                Update::Entries(Ok(entries)) => {
                    panel.show_entries(&entries);
                    selection.entries = EntriesState::Loaded(entries.len());
                }
                Update::Entries(Err(err @ JournalError::Timeout(_))) => {
                    warn!(node = %selection.node, %err, "Journal entries did not load");
                    panel.show_entries_failed(&err.to_string());
                    selection.entries = EntriesState::Failed;
                }
                Update::Entries(Err(err)) => {
                    warn!(node = %selection.node, %err, "Journal query failed; showing no entries");
                    panel.show_entries(&[]);
                    selection.entries = EntriesState::Loaded(0);
                }
            }
            applied += 1;
        }
        if self
            .selection
            .as_ref()
            .is_some_and(|s| !s.is_pending())
        {
            self.tasks.clear();
        }
        applied
    }

    /// Drop the selection and hide the panel. Late results are discarded.
    pub fn clear(&mut self, panel: &mut impl JournalPanel) {
        self.abort_tasks();
        if let Some(selection) = self.selection.take() {
            debug!(node = %selection.node, "Selection cleared");
        }
        panel.hide();
    }

    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
