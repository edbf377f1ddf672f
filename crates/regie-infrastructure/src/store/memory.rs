//! In-memory store for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use regie_core::error::Result;
use regie_core::store::{LocalStore, StoreChange};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::Shared;

/// A process-local store with the full handle/notification model but no
/// persistence. Data lives as long as the root.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new(HashMap::new())),
        }
    }

    /// A new handle onto this store, with its own origin id. Handles share
    /// the data; each one observes only the others' writes.
    pub fn handle(&self) -> MemoryStoreHandle {
        MemoryStoreHandle {
            shared: self.shared.clone(),
            origin: Uuid::new_v4(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// One execution context's view of a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryStoreHandle {
    shared: Arc<Shared>,
    origin: Uuid,
}

#[async_trait]
impl LocalStore for MemoryStoreHandle {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.shared.read(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.shared
            .write(self.origin, key, Some(value.to_string()))
            .await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.shared.write(self.origin, key, None).await;
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<StoreChange> {
        self.shared.subscribe_excluding(self.origin)
    }
}
