//! Persistent key-value store seam.
//!
//! The profile-local storage the application runs against is modeled as an
//! opaque string-keyed store behind the [`LocalStore`] trait. Concrete
//! implementations live in `regie-infrastructure`.
//!
//! Change notifications follow web-storage semantics: a subscription only
//! delivers writes made through *other* handles of the same underlying store,
//! never the subscriber's own. This is what makes cross-tab coordination work
//! without any tab acting as an authority - every handle observes its peers
//! and applies the same idempotent reaction.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Result;

/// Store keys used by the session lifecycle and mission-order state.
pub mod keys {
    /// Email remembered across sign-out for the reconnect flow.
    pub const REMEMBERED_EMAIL: &str = "rememberedEmail";
    /// Shared lock flag; presence means the session is locked.
    pub const SESSION_LOCKED: &str = "sessionLocked";
    /// Forced-logout flag; observed by every tab and honored on next boot.
    pub const FORCE_LOGOUT: &str = "logoutOnNextBoot";
    /// Ordered roster of selected people.
    pub const SELECTED_NAMES: &str = "selectedNames";
    /// Mission-order history entries.
    pub const HISTORY_OM: &str = "historyOM";
    /// Personnel-list history entries.
    pub const HISTORY_LIST: &str = "historyList";
    /// Print/layout calibration settings.
    pub const PRINT_SETTINGS: &str = "printSettings";
    /// Imported group directory (group -> members with job titles).
    pub const GROUP_DIRECTORY: &str = "importedGroupData";
    /// User-curated per-group member ordering.
    pub const CUSTOM_GROUP_ORDER: &str = "customGroupOrder";
}

/// A single observed store mutation.
///
/// `value` is `None` when the key was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
    pub value: Option<String>,
}

/// An abstract handle onto the shared persistent store.
///
/// One handle corresponds to one execution context (a browser tab in the
/// deployed application). Handles of the same store share the underlying data;
/// [`LocalStore::subscribe`] reports only changes made by sibling handles.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key` from the store. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Subscribes to changes made through other handles of this store.
    ///
    /// The subscriber's own writes are never delivered.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreChange>;
}
