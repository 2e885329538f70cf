use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use talentflow_mock::{
    middleware::fault_injection::FaultSettings,
    mock_server::{MockServer, MockRequest},
    error::ApiFault,
    store::{FileStore, Store},
    AppState,
};

async fn file_server(dir: &std::path::Path, quota: Option<u64>) -> (AppState, MockServer) {
    let mut backend = FileStore::open(dir).await.expect("open store");
    if let Some(quota) = quota {
        backend = backend.with_quota(quota);
    }
    let state = AppState::new(Store::new(Arc::new(backend)), FaultSettings::disabled());
    (state.clone(), MockServer::new(state))
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (state, server) = file_server(dir.path(), None).await;
        state.seed_service.seed_if_empty().await.unwrap();
        let res = server
            .patch("/jobs/1/reorder", json!({ "fromOrder": 1, "toOrder": 3 }))
            .await
            .unwrap();
        assert_eq!(res.status, StatusCode::OK);
        let res = server
            .patch("/candidates/2", json!({ "stage": "hired" }))
            .await
            .unwrap();
        assert_eq!(res.status, StatusCode::OK);
    }

    let (state, server) = file_server(dir.path(), None).await;
    let report = state.seed_service.seed_if_empty().await.unwrap();
    assert!(!report.seeded);

    let job = server.get("/jobs?pageSize=3").await.unwrap();
    assert_eq!(job.body["data"][2]["id"], 1);

    let candidate = server.get("/candidates/2").await.unwrap();
    assert_eq!(candidate.body["stage"], "hired");
    let timeline = server.get("/candidates/2/timeline").await.unwrap();
    assert_eq!(timeline.body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn quota_exhaustion_is_a_storage_fault() {
    let dir = tempfile::tempdir().unwrap();
    let (_, server) = file_server(dir.path(), Some(64)).await;

    let err = server
        .handle(
            MockRequest::new(axum::http::Method::POST, "/jobs")
                .with_body(json!({ "title": "A title long enough to blow a tiny quota" })),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiFault::Storage(_)));

    let listed = server.get("/jobs").await.unwrap();
    assert_eq!(listed.body["meta"]["total"], 0);
}
