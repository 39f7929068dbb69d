use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::metrics::observe_store_op;
use tokio::sync::RwLock;
use tracing::debug;

use super::collections::Collections;
use super::{DocumentStore, Filter, Record, StoreError};

/// Process-local document store.
///
/// Backs the `memory` backend and stands in for the real store in tests;
/// [`MemoryStore::set_online`] simulates the store becoming unreachable.
///
/// # Examples
/// ```
/// use service::storage::{DocumentStore, Filter, MemoryStore, Record};
/// let store = MemoryStore::new();
/// let mut payload = Record::new();
/// payload.insert("name".into(), "Plumbing".into());
/// let created = tokio_test::block_on(store.create_document("category", payload)).unwrap();
/// assert!(created.contains_key("_id"));
/// let found = tokio_test::block_on(store.get_documents("category", &Filter::All, 10)).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
pub struct MemoryStore {
    collections: RwLock<Collections>,
    online: AtomicBool,
    name: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: &str) -> Self {
        Self {
            collections: RwLock::new(Collections::default()),
            online: AtomicBool::new(true),
            name: name.to_string(),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!("{} is offline", self.name)))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, collection: &str, payload: Record) -> Result<Record, StoreError> {
        let res = async {
            self.ensure_online()?;
            let mut collections = self.collections.write().await;
            let record = collections.prepare(collection, payload)?;
            collections.push(collection, record.clone());
            Ok::<_, StoreError>(record)
        }
        .await;
        observe_store_op("create", collection, res.is_ok());
        debug!(%collection, ok = res.is_ok(), "memory create_document");
        res
    }

    async fn get_documents(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Record>, StoreError> {
        let res = match self.ensure_online() {
            Ok(()) => Ok(self.collections.read().await.find(collection, filter, limit)),
            Err(e) => Err(e),
        };
        observe_store_op("read", collection, res.is_ok());
        res
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_online()?;
        Ok(self.collections.read().await.names())
    }

    fn database_name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> String {
        "memory://".to_string()
    }
}
