use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::job_dto::{AckResponse, CreateJobPayload, JobListQuery, ReorderJobPayload, UpdateJobPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/jobs",
    params(
        ("search" = Option<String>, Query, description = "Substring of title or tag"),
        ("status" = Option<String>, Query, description = "active or archived"),
        ("sort" = Option<String>, Query, description = "order (default) or title"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("pageSize" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of jobs", body = Json<JobListResponse>),
        (status = 400, description = "Unknown sort")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    query: std::result::Result<Query<JobListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let result = state.job_service.list(query).await?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created", body = Json<Job>),
        (status = 400, description = "Missing title or duplicate slug")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateJobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    patch,
    path = "/jobs/{id}",
    params(
        ("id" = i64, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Json<Job>),
        (status = 400, description = "Invalid payload or duplicate slug"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateJobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(job))
}

#[utoipa::path(
    patch,
    path = "/jobs/{id}/reorder",
    params(
        ("id" = i64, Path, description = "Job being dragged")
    ),
    request_body = ReorderJobPayload,
    responses(
        (status = 200, description = "Jobs renumbered", body = Json<AckResponse>),
        (status = 400, description = "No job at fromOrder")
    )
)]
#[axum::debug_handler]
pub async fn reorder_job(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<ReorderJobPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;
    tracing::debug!(job_id = id, "reorder requested");
    state.job_service.reorder(payload).await?;
    Ok(Json(AckResponse::ok()))
}
