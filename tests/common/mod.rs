#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use talentflow_mock::{
    middleware::fault_injection::{FaultPolicy, FaultSettings},
    mock_server::MockServer,
    store::{Collection, KeyValueStore, MemoryStore, Store, StoreResult, WriteBatch},
    AppState,
};

/// Fails every route whose failure rate is above zero, without delay.
pub struct AlwaysFail;

impl FaultPolicy for AlwaysFail {
    fn latency(&self) -> Duration {
        Duration::ZERO
    }

    fn should_fail(&self, failure_rate: f64) -> bool {
        failure_rate > 0.0
    }
}

pub fn empty_state() -> AppState {
    AppState::new(Store::in_memory(), FaultSettings::disabled())
}

pub async fn seeded_state() -> AppState {
    let state = empty_state();
    state.seed_service.seed_if_empty().await.expect("seed");
    state
}

pub async fn seeded_server() -> (AppState, MockServer) {
    let state = seeded_state().await;
    let server = MockServer::new(state.clone());
    (state, server)
}

pub async fn failing_server() -> (AppState, MockServer) {
    let state = seeded_state().await;
    let faulty = AppState::new(
        state.store.clone(),
        FaultSettings::with_policy(Arc::new(AlwaysFail)),
    );
    let server = MockServer::new(faulty);
    (state, server)
}

/// In-memory backend that sleeps before every operation, so concurrent
/// read-modify-write sections overlap unless the write gate serialises them.
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl KeyValueStore for SlowStore {
    async fn get(&self, collection: Collection, key: &str) -> StoreResult<Option<JsonValue>> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(collection, key).await
    }

    async fn keys(&self, collection: Collection) -> StoreResult<Vec<String>> {
        tokio::time::sleep(self.delay).await;
        self.inner.keys(collection).await
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.commit(batch).await
    }
}

pub async fn slow_seeded_server() -> (AppState, MockServer) {
    let store = Store::new(Arc::new(SlowStore::new(Duration::from_millis(2))));
    let state = AppState::new(store, FaultSettings::disabled());
    state.seed_service.seed_if_empty().await.expect("seed");
    let server = MockServer::new(state.clone());
    (state, server)
}
