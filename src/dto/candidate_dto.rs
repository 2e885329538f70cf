use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::page_dto::Paged;
use crate::models::candidate::{Candidate, Stage};
use crate::models::timeline::TimelineEntry;

pub const DEFAULT_CANDIDATE_PAGE_SIZE: i64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub job_id: Option<i64>,
    pub stage: Option<Stage>,
}

pub type CandidateListResponse = Paged<Candidate>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub data: Vec<TimelineEntry>,
}
