use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use super::{Collection, KeyValueStore, StoreResult, WriteBatch};

type Documents = BTreeMap<String, JsonValue>;

/// Process-local backend. Keys list in lexicographic order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<JsonValue>> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).and_then(|docs| docs.get(key)).cloned())
    }

    async fn keys(&self, collection: Collection) -> StoreResult<Vec<String>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut guard = self.collections.write().await;
        for write in batch.into_writes() {
            guard
                .entry(write.collection)
                .or_default()
                .insert(write.key, write.value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn absent_collections_read_as_empty() {
        let store = MemoryStore::new();
        assert!(store.keys(Collection::Timelines).await.unwrap().is_empty());
        assert_eq!(store.get(Collection::Timelines, "1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryStore::new();
        store
            .set(Collection::Responses, "1:7", json!({ "answers": { "q1": "No" } }))
            .await
            .unwrap();
        store
            .set(Collection::Responses, "1:7", json!({ "answers": { "q1": "Yes" } }))
            .await
            .unwrap();

        let stored = store.get(Collection::Responses, "1:7").await.unwrap().unwrap();
        assert_eq!(stored["answers"]["q1"], "Yes");
        assert_eq!(store.keys(Collection::Responses).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn batches_span_collections() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.put(Collection::Candidates, "3", json!({ "stage": "tech" }));
        batch.put(Collection::Timelines, "3", json!([]));
        store.commit(batch).await.unwrap();

        assert!(store.get(Collection::Candidates, "3").await.unwrap().is_some());
        assert!(store.get(Collection::Timelines, "3").await.unwrap().is_some());
        assert!(store.get(Collection::Jobs, "3").await.unwrap().is_none());
    }
}
