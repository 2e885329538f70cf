use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

/// Seeds an empty store. Safe to call repeatedly.
#[axum::debug_handler]
pub async fn seed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let report = state.seed_service.seed_if_empty().await?;
    Ok(Json(json!({
        "ok": true,
        "seeded": report.seeded,
        "jobs": report.jobs,
        "candidates": report.candidates,
        "assessments": report.assessments,
    })))
}
