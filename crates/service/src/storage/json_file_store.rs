use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use common::metrics::observe_store_op;
use tokio::{fs, sync::RwLock};
use tracing::{debug, error, warn};

use super::collections::{validate_collection_name, Collections};
use super::{DocumentStore, Filter, Record, StoreError};

/// JSON file-backed document store.
///
/// Each collection is persisted as `<data_dir>/<collection>.json`, a JSON
/// array of records in insertion order. Everything is loaded at open; every
/// insert rewrites the collection file (via a temp file and rename) while the
/// write lock is held, so writes are serialized.
pub struct JsonFileStore {
    collections: RwLock<Collections>,
    dir: PathBuf,
    name: String,
}

fn unavailable(context: &str, e: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(format!("{context}: {e}"))
}

impl JsonFileStore {
    /// Open the store rooted at `dir`, creating the directory if missing.
    pub async fn open<P: Into<PathBuf>>(dir: P, name: &str) -> Result<Arc<Self>, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| unavailable(&format!("cannot create {}", dir.display()), e))?;

        let mut map: HashMap<String, Vec<Record>> = HashMap::new();
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| unavailable(&format!("cannot read {}", dir.display()), e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| unavailable(&format!("cannot read {}", dir.display()), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            if validate_collection_name(&collection).is_err() {
                warn!(path = %path.display(), "skipping file with invalid collection name");
                continue;
            }
            let bytes = fs::read(&path)
                .await
                .map_err(|e| unavailable(&format!("cannot read {}", path.display()), e))?;
            let records: Vec<Record> = serde_json::from_slice(&bytes)
                .map_err(|e| unavailable(&format!("corrupt collection file {}", path.display()), e))?;
            debug!(%collection, count = records.len(), "collection loaded");
            map.insert(collection, records);
        }

        Ok(Arc::new(Self {
            collections: RwLock::new(Collections::from_map(map)),
            dir,
            name: name.to_string(),
        }))
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn save(&self, collection: &str, records: &[Record]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(records).map_err(|e| unavailable("serialize collection", e))?;
        let path = self.collection_path(collection);
        let tmp = self.dir.join(format!("{collection}.json.tmp"));
        fs::write(&tmp, data)
            .await
            .map_err(|e| unavailable(&format!("cannot write {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| unavailable(&format!("cannot replace {}", path.display()), e))?;
        Ok(())
    }

    async fn insert(&self, collection: &str, payload: Record) -> Result<Record, StoreError> {
        let mut collections = self.collections.write().await;
        let record = collections.prepare(collection, payload)?;
        collections.push(collection, record.clone());
        let saved = self.save(collection, collections.records(collection)).await;
        if let Err(e) = saved {
            // 持久化失败时回滚内存中的插入
            collections.pop(collection);
            error!(%collection, error = %e, "failed to persist collection; insert rolled back");
            return Err(e);
        }
        Ok(record)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn create_document(&self, collection: &str, payload: Record) -> Result<Record, StoreError> {
        let res = self.insert(collection, payload).await;
        observe_store_op("create", collection, res.is_ok());
        debug!(%collection, ok = res.is_ok(), "file create_document");
        res
    }

    async fn get_documents(&self, collection: &str, filter: &Filter, limit: usize) -> Result<Vec<Record>, StoreError> {
        let found = self.collections.read().await.find(collection, filter, limit);
        observe_store_op("read", collection, true);
        Ok(found)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        // probe the directory so a vanished data dir is reported
        fs::metadata(&self.dir)
            .await
            .map_err(|e| unavailable(&format!("cannot stat {}", self.dir.display()), e))?;
        Ok(self.collections.read().await.names())
    }

    fn database_name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> String {
        format!("file://{}", self.dir.display())
    }
}
