//! Document storage for the service layer
//!
//! Records are schema-less ordered maps (`serde_json::Map`), grouped into
//! named collections. Backends implement [`DocumentStore`] and are shared as
//! `Arc<dyn DocumentStore>`, so callers never depend on a concrete store.

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StoreBackend, StoreConfig};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

pub mod collections;
pub mod filter;
pub mod json_file_store;
pub mod memory_store;

pub use filter::Filter;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// A stored document: field name -> tagged JSON value, insertion ordered.
pub type Record = serde_json::Map<String, Value>;

/// Field holding the store-generated identifier.
pub const ID_FIELD: &str = "_id";
pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// The backend could not be reached or failed to persist.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The payload is not well-formed for the store.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `payload` as a new record of `collection` and return the stored
    /// record, including its generated `_id` and timestamps.
    async fn create_document(&self, collection: &str, payload: Record) -> Result<Record, StoreError>;

    /// Up to `limit` records of `collection` matching `filter`, in insertion
    /// order. An unknown collection is simply empty.
    async fn get_documents(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Record>, StoreError>;

    /// Names of collections that hold at least one record, sorted.
    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    /// Logical database name, for diagnostics.
    fn database_name(&self) -> &str;

    /// Where the data lives (`file://...`, `memory://`), for diagnostics.
    fn location(&self) -> String;
}

/// Open the backend selected by configuration.
pub async fn open_store(cfg: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store: Arc<dyn DocumentStore> = match cfg.backend {
        StoreBackend::File => JsonFileStore::open(&cfg.data_dir, &cfg.database_name).await?,
        StoreBackend::Memory => Arc::new(MemoryStore::named(&cfg.database_name)),
    };
    info!(backend = ?cfg.backend, location = %store.location(), database = %store.database_name(), "document store opened");
    Ok(store)
}
