//! Mission-order and personnel-list history.
//!
//! Two prepend-ordered logs, one per document kind. Memory keeps the last
//! thirty entries; persistence only keeps the five most recent per kind, so
//! the stored payload stays small while the session keeps a longer undo
//! horizon.

use serde::{Deserialize, Serialize};

use crate::mission::MissionForm;
use crate::roster::SelectedPerson;

/// How many entries each kind keeps in memory.
pub const MEMORY_CAP: usize = 30;
/// How many entries each kind persists.
pub const PERSIST_CAP: usize = 5;

/// The two generated document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryKind {
    /// A mission order ("ordre de mission").
    #[serde(rename = "OM")]
    MissionOrder,
    /// A grouped personnel list.
    List,
}

/// One recallable snapshot: the roster plus the form as they were when the
/// document was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Group tag of the first roster entry, `"Inconnu"` for an empty roster.
    pub group: String,
    pub selected_names: Vec<SelectedPerson>,
    #[serde(flatten)]
    pub form: MissionForm,
}

impl HistoryEntry {
    /// Captures the current roster and form.
    pub fn capture(selected_names: &[SelectedPerson], form: &MissionForm) -> Self {
        let group = selected_names
            .first()
            .map(|person| person.group.to_string())
            .unwrap_or_else(|| "Inconnu".to_string());
        Self {
            group,
            selected_names: selected_names.to_vec(),
            form: form.clone(),
        }
    }
}

/// The in-memory history, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    om: Vec<HistoryEntry>,
    list: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the log from persisted lists.
    pub fn from_parts(om: Vec<HistoryEntry>, list: Vec<HistoryEntry>) -> Self {
        Self { om, list }
    }

    /// Prepends an entry, trimming the kind's log to [`MEMORY_CAP`].
    pub fn add(&mut self, kind: HistoryKind, entry: HistoryEntry) {
        let log = self.log_mut(kind);
        log.insert(0, entry);
        log.truncate(MEMORY_CAP);
    }

    /// All entries of a kind, newest first.
    pub fn entries(&self, kind: HistoryKind) -> &[HistoryEntry] {
        self.log(kind)
    }

    /// The entry at `index`, used for recall (wholesale roster and form
    /// replacement is the caller's move).
    pub fn entry(&self, kind: HistoryKind, index: usize) -> Option<&HistoryEntry> {
        self.log(kind).get(index)
    }

    /// Removes the entry at `index`; out-of-range indices are ignored.
    pub fn delete(&mut self, kind: HistoryKind, index: usize) {
        let log = self.log_mut(kind);
        if index < log.len() {
            log.remove(index);
        }
    }

    /// Empties both kinds.
    pub fn clear(&mut self) {
        self.om.clear();
        self.list.clear();
    }

    /// The slice of a kind that persistence stores, capped at
    /// [`PERSIST_CAP`].
    pub fn persisted(&self, kind: HistoryKind) -> &[HistoryEntry] {
        let log = self.log(kind);
        &log[..log.len().min(PERSIST_CAP)]
    }

    fn log(&self, kind: HistoryKind) -> &Vec<HistoryEntry> {
        match kind {
            HistoryKind::MissionOrder => &self.om,
            HistoryKind::List => &self.list,
        }
    }

    fn log_mut(&mut self, kind: HistoryKind) -> &mut Vec<HistoryEntry> {
        match kind {
            HistoryKind::MissionOrder => &mut self.om,
            HistoryKind::List => &mut self.list,
        }
    }
}
