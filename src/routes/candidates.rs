use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::candidate_dto::{CandidateListQuery, TimelineResponse, UpdateCandidatePayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/candidates",
    params(
        ("search" = Option<String>, Query, description = "Substring of name or email"),
        ("stage" = Option<String>, Query, description = "Exact stage"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of candidates", body = Json<CandidateListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    query: std::result::Result<Query<CandidateListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let result = state.candidate_service.list(query).await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found", body = Json<Candidate>),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let candidate = state.candidate_service.get_candidate(id).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    patch,
    path = "/candidates/{id}",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    request_body = UpdateCandidatePayload,
    responses(
        (status = 200, description = "Candidate updated", body = Json<Candidate>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateCandidatePayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;
    let candidate = state.candidate_service.update(id, payload).await?;
    Ok(Json(candidate))
}

#[utoipa::path(
    get,
    path = "/candidates/{id}/timeline",
    params(
        ("id" = i64, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Timeline, oldest first", body = Json<TimelineResponse>)
    )
)]
#[axum::debug_handler]
pub async fn candidate_timeline(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let data = state.candidate_service.timeline(id).await?;
    Ok(Json(TimelineResponse { data }))
}
