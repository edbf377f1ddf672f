//! Concrete [`LocalStore`] implementations.
//!
//! Both stores share the same handle model: one root owns the data, and
//! every execution context takes its own [`LocalStore`] handle with a unique
//! origin id. Change notifications carry the writing handle's origin so a
//! subscription can exclude its own writes - the web-storage semantics the
//! cross-tab coordination relies on.
//!
//! [`LocalStore`]: regie_core::store::LocalStore

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::HashMap;

use regie_core::store::StoreChange;
use tokio::sync::{Mutex, broadcast, mpsc};
use uuid::Uuid;

/// Data and change fan-out shared by every handle of one store.
#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) map: Mutex<HashMap<String, String>>,
    pub(crate) changes: broadcast::Sender<(Uuid, StoreChange)>,
}

impl Shared {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        let (changes, _) = broadcast::channel(256);
        Self {
            map: Mutex::new(map),
            changes,
        }
    }

    pub(crate) async fn read(&self, key: &str) -> Option<String> {
        self.map.lock().await.get(key).cloned()
    }

    /// Applies a write and broadcasts it tagged with the writing origin.
    /// Returns the map snapshot for persistence.
    pub(crate) async fn write(
        &self,
        origin: Uuid,
        key: &str,
        value: Option<String>,
    ) -> HashMap<String, String> {
        let snapshot = {
            let mut map = self.map.lock().await;
            match &value {
                Some(v) => {
                    map.insert(key.to_string(), v.clone());
                }
                None => {
                    map.remove(key);
                }
            }
            map.clone()
        };
        let _ = self.changes.send((
            origin,
            StoreChange {
                key: key.to_string(),
                value,
            },
        ));
        snapshot
    }

    /// Subscription that forwards sibling writes only, never `origin`'s own.
    pub(crate) fn subscribe_excluding(&self, origin: Uuid) -> mpsc::UnboundedReceiver<StoreChange> {
        let mut rx = self.changes.subscribe();
        let (tx, out) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok((from, change)) if from != origin => {
                        if tx.send(change).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("store subscription lagged by {} changes", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        out
    }
}
