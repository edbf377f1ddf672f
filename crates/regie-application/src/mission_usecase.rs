//! Mission-order use case.
//!
//! Owns every piece of workspace state behind the protected screen - the
//! roster, the group directory and its custom ordering, the history log,
//! the calibration settings, and the form - wiring them to the persistent
//! store. State restores on [`load`] and every mutation persists, so a
//! reload resumes where the user left off.
//!
//! [`load`]: MissionOrderUseCase::load

use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use regie_core::directory::{CustomGroupOrder, GroupDirectory};
use regie_core::error::Result;
use regie_core::history::{HistoryEntry, HistoryKind, HistoryLog};
use regie_core::mission::MissionForm;
use regie_core::roster::{
    Disposition, Group, ListRow, RosterManager, RosterPartition, SelectedPerson, list_rows,
};
use regie_core::settings::PrintSettings;
use regie_core::store::{LocalStore, keys};
use regie_infrastructure::spreadsheet;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

/// Coordinates the workspace state with the persistent store.
///
/// # Thread Safety
///
/// Every piece of state sits behind its own `RwLock`; mutations take one
/// lock at a time and persist before returning, so no operation partially
/// applies.
pub struct MissionOrderUseCase {
    store: Arc<dyn LocalStore>,
    roster: RwLock<RosterManager>,
    directory: RwLock<GroupDirectory>,
    custom_order: RwLock<CustomGroupOrder>,
    history: RwLock<HistoryLog>,
    settings: RwLock<PrintSettings>,
    form: RwLock<MissionForm>,
}

impl MissionOrderUseCase {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            roster: RwLock::new(RosterManager::new()),
            directory: RwLock::new(GroupDirectory::new()),
            custom_order: RwLock::new(CustomGroupOrder::new()),
            history: RwLock::new(HistoryLog::new()),
            settings: RwLock::new(PrintSettings::default()),
            form: RwLock::new(MissionForm::default()),
        }
    }

    /// Restores all workspace state from the store.
    ///
    /// Loading is tolerant: a missing or unreadable document falls back to
    /// its default with a warning instead of failing the whole restore. The
    /// form is deliberately not restored - every session starts from a
    /// fresh form, only history recalls repopulate it.
    pub async fn load(&self) {
        let selected: Vec<SelectedPerson> = self.load_json(keys::SELECTED_NAMES, "roster").await;
        self.roster.write().await.reorder(selected);

        let om: Vec<HistoryEntry> = self.load_json(keys::HISTORY_OM, "mission-order history").await;
        let list: Vec<HistoryEntry> = self.load_json(keys::HISTORY_LIST, "list history").await;
        *self.history.write().await = HistoryLog::from_parts(om, list);

        *self.settings.write().await = self.load_json(keys::PRINT_SETTINGS, "settings").await;
        *self.directory.write().await = self.load_json(keys::GROUP_DIRECTORY, "directory").await;
        *self.custom_order.write().await =
            self.load_json(keys::CUSTOM_GROUP_ORDER, "group order").await;

        tracing::debug!(
            "[MissionOrder] state restored: {} selected, {} directory members",
            self.roster.read().await.len(),
            self.directory.read().await.member_count()
        );
    }

    // ------------------------------------------------------------------
    // Roster
    // ------------------------------------------------------------------

    /// The current roster, in user order.
    pub async fn selected(&self) -> Vec<SelectedPerson> {
        self.roster.read().await.entries().to_vec()
    }

    /// The derived section view of the current roster.
    pub async fn partition(&self) -> RosterPartition {
        self.roster.read().await.partition()
    }

    pub async fn toggle_selection(&self, name: &str, group: Group) -> Result<()> {
        self.roster.write().await.toggle(name, group);
        self.persist_roster().await
    }

    pub async fn remove_from_selection(&self, name: &str) -> Result<()> {
        self.roster.write().await.remove(name);
        self.persist_roster().await
    }

    /// Wholesale replace after a drag move.
    pub async fn reorder_selection(&self, new_order: Vec<SelectedPerson>) -> Result<()> {
        self.roster.write().await.reorder(new_order);
        self.persist_roster().await
    }

    /// Single-entry relocation, the drag handler's splice.
    pub async fn relocate_selection(&self, from: usize, to: usize) -> Result<()> {
        self.roster.write().await.relocate(from, to);
        self.persist_roster().await
    }

    pub async fn clear_selection(&self) -> Result<()> {
        self.roster.write().await.clear();
        self.persist_roster().await
    }

    /// Numbered print/export rows for the current roster.
    pub async fn list_rows(&self) -> Vec<ListRow> {
        let partition = self.roster.read().await.partition();
        let directory = self.directory.read().await;
        list_rows(&partition, &directory)
    }

    // ------------------------------------------------------------------
    // Disposition files
    // ------------------------------------------------------------------

    /// The current roster and form as a disposition document.
    pub async fn export_disposition(&self) -> Result<String> {
        let entries = self.selected().await;
        let form = self.form.read().await.clone();
        Disposition::new(entries, form, Utc::now()).to_json()
    }

    /// Replaces the roster - and the form, when the document carries one -
    /// with a disposition document's contents.
    ///
    /// Returns how many entries were restored; entries with unknown group
    /// tags were dropped by the parse.
    pub async fn import_disposition(&self, json: &str) -> Result<usize> {
        let imported = Disposition::parse(json)?;
        let count = imported.selected_names.len();
        self.roster.write().await.reorder(imported.selected_names);
        if let Some(form) = imported.form {
            *self.form.write().await = form;
        }
        self.persist_roster().await?;
        tracing::debug!("[MissionOrder] disposition imported: {} entries", count);
        Ok(count)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Snapshots the current roster and form into a kind's history.
    pub async fn add_to_history(&self, kind: HistoryKind) -> Result<()> {
        let entry = {
            let roster = self.roster.read().await;
            let form = self.form.read().await;
            HistoryEntry::capture(roster.entries(), &form)
        };
        self.history.write().await.add(kind, entry);
        self.persist_history().await
    }

    pub async fn history_entries(&self, kind: HistoryKind) -> Vec<HistoryEntry> {
        self.history.read().await.entries(kind).to_vec()
    }

    /// Recalls a history entry, replacing the roster and the form
    /// wholesale. An out-of-range index leaves both untouched.
    pub async fn recall_history(&self, kind: HistoryKind, index: usize) -> Result<bool> {
        let entry = match self.history.read().await.entry(kind, index) {
            Some(entry) => entry.clone(),
            None => return Ok(false),
        };
        self.roster.write().await.reorder(entry.selected_names);
        *self.form.write().await = entry.form;
        self.persist_roster().await?;
        Ok(true)
    }

    pub async fn delete_history_entry(&self, kind: HistoryKind, index: usize) -> Result<()> {
        self.history.write().await.delete(kind, index);
        self.persist_history().await
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.history.write().await.clear();
        self.persist_history().await
    }

    // ------------------------------------------------------------------
    // Form and settings
    // ------------------------------------------------------------------

    pub async fn form(&self) -> MissionForm {
        self.form.read().await.clone()
    }

    pub async fn set_form(&self, form: MissionForm) {
        *self.form.write().await = form;
    }

    pub async fn settings(&self) -> PrintSettings {
        self.settings.read().await.clone()
    }

    /// Applies an edit to the settings and persists the result.
    pub async fn update_settings<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut PrintSettings),
    {
        {
            let mut settings = self.settings.write().await;
            edit(&mut settings);
        }
        self.persist_settings().await
    }

    /// Applies a saved calibration preset by id.
    pub async fn apply_calibration(&self, id: &str) -> Result<()> {
        self.settings.write().await.apply_config(id);
        self.persist_settings().await
    }

    // ------------------------------------------------------------------
    // Group directory
    // ------------------------------------------------------------------

    pub async fn directory(&self) -> GroupDirectory {
        self.directory.read().await.clone()
    }

    pub async fn employment_for(&self, name: &str) -> Option<String> {
        self.directory.read().await.employment_for(name)
    }

    /// Replaces the directory with a spreadsheet import.
    ///
    /// Returns the imported member count.
    pub async fn import_directory<R: Read>(&self, reader: R) -> Result<usize> {
        let imported = spreadsheet::parse_directory(reader)?;
        let count = imported.member_count();
        *self.directory.write().await = imported;
        self.persist_json(keys::GROUP_DIRECTORY, &*self.directory.read().await)
            .await?;
        tracing::debug!("[MissionOrder] directory imported: {} members", count);
        Ok(count)
    }

    /// Member names of a group with the user-curated order applied.
    pub async fn ordered_names(&self, group: Group) -> Vec<String> {
        let directory = self.directory.read().await;
        let custom = self.custom_order.read().await;
        directory.ordered_names(group, &custom)
    }

    /// Records a user-curated order for one group.
    pub async fn set_group_order(&self, group: Group, order: Vec<String>) -> Result<()> {
        self.custom_order.write().await.set(group, order);
        self.persist_json(keys::CUSTOM_GROUP_ORDER, &*self.custom_order.read().await)
            .await
    }

    /// Drops the roster, the imported directory, and the custom ordering.
    pub async fn clear_group_data(&self) -> Result<()> {
        self.roster.write().await.clear();
        *self.directory.write().await = GroupDirectory::new();
        self.custom_order.write().await.clear();

        self.persist_roster().await?;
        self.store.remove(keys::GROUP_DIRECTORY).await?;
        self.store.remove(keys::CUSTOM_GROUP_ORDER).await?;
        Ok(())
    }

    /// The numbered list rendered as a CSV document.
    pub async fn export_list_csv(&self) -> Result<String> {
        let rows = self.list_rows().await;
        let form = self.form.read().await.clone();
        spreadsheet::export_list_string(&rows, &form)
    }

    // ------------------------------------------------------------------
    // Persistence helpers
    // ------------------------------------------------------------------

    async fn load_json<T: DeserializeOwned + Default>(&self, key: &str, what: &str) -> T {
        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("[MissionOrder] stored {} unreadable, using defaults: {}", what, e);
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!("[MissionOrder] reading {} failed, using defaults: {}", what, e);
                T::default()
            }
        }
    }

    async fn persist_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }

    async fn persist_roster(&self) -> Result<()> {
        let entries = self.roster.read().await.entries().to_vec();
        self.persist_json(keys::SELECTED_NAMES, &entries).await
    }

    async fn persist_history(&self) -> Result<()> {
        let (om, list) = {
            let history = self.history.read().await;
            (
                history.persisted(HistoryKind::MissionOrder).to_vec(),
                history.persisted(HistoryKind::List).to_vec(),
            )
        };
        self.persist_json(keys::HISTORY_OM, &om).await?;
        self.persist_json(keys::HISTORY_LIST, &list).await
    }

    async fn persist_settings(&self) -> Result<()> {
        let settings = self.settings.read().await.clone();
        self.persist_json(keys::PRINT_SETTINGS, &settings).await
    }
}
