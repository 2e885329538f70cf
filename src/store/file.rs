use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::fs;
use tokio::sync::RwLock;

use super::{Collection, KeyValueStore, StoreError, StoreResult, WriteBatch};

type Documents = BTreeMap<String, JsonValue>;

#[derive(Debug, Default)]
struct Snapshot {
    collections: HashMap<Collection, Documents>,
    sizes: HashMap<Collection, u64>,
}

/// Durable backend: one JSON document per collection inside `dir`.
///
/// Reads are served from an in-memory copy loaded at open time. A commit rewrites
/// only the collection files it touches, each through a temporary file and a
/// rename, and publishes the new copy to readers once every file is in place.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
    snapshot: RwLock<Snapshot>,
}

impl FileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        let mut snapshot = Snapshot::default();
        for collection in Collection::ALL {
            let path = collection_path(&dir, collection);
            match fs::read(&path).await {
                Ok(bytes) => {
                    let docs: Documents = serde_json::from_slice(&bytes)?;
                    snapshot.sizes.insert(collection, bytes.len() as u64);
                    snapshot.collections.insert(collection, docs);
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        tracing::info!(
            dir = %dir.display(),
            jobs = snapshot.collections.get(&Collection::Jobs).map_or(0, |d| d.len()),
            "opened file store"
        );

        Ok(Self {
            dir,
            quota_bytes: None,
            snapshot: RwLock::new(snapshot),
        })
    }

    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn collection_path(dir: &Path, collection: Collection) -> PathBuf {
    dir.join(format!("{}.json", collection.as_str()))
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<JsonValue>> {
        let guard = self.snapshot.read().await;
        Ok(guard
            .collections
            .get(&collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    async fn keys(&self, collection: Collection) -> StoreResult<Vec<String>> {
        let guard = self.snapshot.read().await;
        Ok(guard
            .collections
            .get(&collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut guard = self.snapshot.write().await;

        let touched: BTreeSet<Collection> =
            batch.writes().iter().map(|write| write.collection).collect();
        let mut staged: HashMap<Collection, Documents> = touched
            .iter()
            .map(|c| (*c, guard.collections.get(c).cloned().unwrap_or_default()))
            .collect();
        for write in batch.into_writes() {
            if let Some(docs) = staged.get_mut(&write.collection) {
                docs.insert(write.key, write.value);
            }
        }

        let mut encoded = Vec::with_capacity(staged.len());
        for collection in &touched {
            let bytes = serde_json::to_vec(&staged[collection])?;
            encoded.push((*collection, bytes));
        }

        if let Some(limit) = self.quota_bytes {
            let untouched: u64 = guard
                .sizes
                .iter()
                .filter(|(c, _)| !touched.contains(*c))
                .map(|(_, size)| *size)
                .sum();
            let needed = untouched + encoded.iter().map(|(_, b)| b.len() as u64).sum::<u64>();
            if needed > limit {
                tracing::warn!(needed, limit, "rejecting commit over storage quota");
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }

        for (collection, bytes) in &encoded {
            let path = collection_path(&self.dir, *collection);
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, bytes).await?;
            fs::rename(&tmp, &path).await?;
        }

        for (collection, bytes) in encoded {
            guard.sizes.insert(collection, bytes.len() as u64);
        }
        for (collection, docs) in staged {
            guard.collections.insert(collection, docs);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).await.unwrap();
            store
                .set(Collection::Jobs, "1", json!({ "id": 1, "title": "SRE" }))
                .await
                .unwrap();
        }

        let reopened = FileStore::open(dir.path()).await.unwrap();
        let job = reopened.get(Collection::Jobs, "1").await.unwrap().unwrap();
        assert_eq!(job["title"], "SRE");
        assert!(reopened.keys(Collection::Candidates).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_touched_collections_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store
            .set(Collection::Assessments, "2", json!({ "jobId": 2 }))
            .await
            .unwrap();

        assert!(dir.path().join("assessments.json").exists());
        assert!(!dir.path().join("jobs.json").exists());
        assert!(!dir.path().join("assessments.json.tmp").exists());
    }

    #[tokio::test]
    async fn quota_rejection_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap().with_quota(64);
        store
            .set(Collection::Jobs, "1", json!({ "t": "a" }))
            .await
            .unwrap();

        let err = store
            .set(Collection::Jobs, "2", json!({ "t": "x".repeat(128) }))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 64, .. }));
        assert_eq!(store.keys(Collection::Jobs).await.unwrap(), vec!["1".to_string()]);

        let reopened = FileStore::open(dir.path()).await.unwrap();
        assert!(reopened.get(Collection::Jobs, "2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_collection_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("candidates.json"), b"{not json").unwrap();
        let err = FileStore::open(dir.path()).await.unwrap_err();
        assert!(matches!(err, StoreError::Serde(_)));
    }
}
