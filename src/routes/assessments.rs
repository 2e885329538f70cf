use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::{IntoResponse, Json},
};

use crate::{
    dto::{assessment_dto::SubmitResponsePayload, job_dto::AckResponse},
    error::Result,
    models::assessment::Assessment,
    AppState,
};

#[utoipa::path(
    get,
    path = "/assessments/{jobId}",
    params(
        ("jobId" = i64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Stored assessment or an empty one", body = Json<Assessment>)
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    job_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(job_id) = job_id?;
    let assessment = state.assessment_service.get_for_job(job_id).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    put,
    path = "/assessments/{jobId}",
    params(
        ("jobId" = i64, Path, description = "Job ID")
    ),
    request_body = Assessment,
    responses(
        (status = 200, description = "Assessment replaced", body = Json<Assessment>),
        (status = 400, description = "Malformed assessment")
    )
)]
#[axum::debug_handler]
pub async fn put_assessment(
    State(state): State<AppState>,
    job_id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<Assessment>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(job_id) = job_id?;
    let Json(assessment) = payload?;
    let saved = state.assessment_service.upsert(job_id, assessment).await?;
    Ok(Json(saved))
}

#[utoipa::path(
    post,
    path = "/assessments/{jobId}/submit",
    params(
        ("jobId" = i64, Path, description = "Job ID")
    ),
    request_body = SubmitResponsePayload,
    responses(
        (status = 200, description = "Response stored", body = Json<AckResponse>)
    )
)]
#[axum::debug_handler]
pub async fn submit_assessment(
    State(state): State<AppState>,
    job_id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<SubmitResponsePayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(job_id) = job_id?;
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(job_id, error = %rejection, "unreadable submit body, storing empty response");
            SubmitResponsePayload::default()
        }
    };
    state.assessment_service.submit(job_id, payload).await?;
    Ok(Json(AckResponse::ok()))
}
