//! Asynchronous key-value persistence behind the mock API.
//!
//! Five independent collections hold string-keyed JSON documents. Backends only
//! need to provide point reads, key listing and batched writes; typed access and
//! the write gate used for read-modify-write sections live on [`Store`].

pub mod file;
pub mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use tokio::sync::{Mutex, MutexGuard};

pub use file::FileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: u64, limit: u64 },

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt value in storage: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Jobs,
    Candidates,
    Timelines,
    Assessments,
    Responses,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Jobs,
        Collection::Candidates,
        Collection::Timelines,
        Collection::Assessments,
        Collection::Responses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Candidates => "candidates",
            Collection::Timelines => "timelines",
            Collection::Assessments => "assessments",
            Collection::Responses => "responses",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingWrite {
    pub collection: Collection,
    pub key: String,
    pub value: JsonValue,
}

/// Puts applied as one unit: readers see either none or all of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<PendingWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, collection: Collection, key: impl Into<String>, value: JsonValue) {
        self.writes.push(PendingWrite {
            collection,
            key: key.into(),
            value,
        });
    }

    pub fn put_record<T: Serialize>(
        &mut self,
        collection: Collection,
        key: impl Into<String>,
        record: &T,
    ) -> StoreResult<()> {
        self.put(collection, key, serde_json::to_value(record)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[PendingWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<PendingWrite> {
        self.writes
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<JsonValue>>;

    async fn keys(&self, collection: Collection) -> StoreResult<Vec<String>>;

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;

    async fn set(&self, collection: Collection, key: &str, value: JsonValue) -> StoreResult<()> {
        let mut batch = WriteBatch::new();
        batch.put(collection, key, value);
        self.commit(batch).await
    }
}

#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    write_gate: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Serializes read-modify-write sections. Hold the guard from the first read
    /// until the final commit so a concurrent writer never merges over a stale copy.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> StoreResult<Option<T>> {
        match self.backend.get(collection, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(
        &self,
        collection: Collection,
        key: &str,
        record: &T,
    ) -> StoreResult<()> {
        let mut batch = WriteBatch::new();
        batch.put_record(collection, key, record)?;
        self.backend.commit(batch).await
    }

    pub async fn keys(&self, collection: Collection) -> StoreResult<Vec<String>> {
        self.backend.keys(collection).await
    }

    pub async fn is_empty(&self, collection: Collection) -> StoreResult<bool> {
        Ok(self.backend.keys(collection).await?.is_empty())
    }

    /// Every value of a collection in storage order. Callers sort explicitly.
    pub async fn all<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let keys = self.backend.keys(collection).await?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.backend.get(collection, &key).await? {
                records.push(serde_json::from_value(value)?);
            }
        }
        Ok(records)
    }

    pub async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        tracing::debug!(writes = batch.len(), "committing write batch");
        self.backend.commit(batch).await
    }
}
