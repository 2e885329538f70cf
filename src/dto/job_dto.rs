use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::page_dto::Paged;
use crate::models::job::{Job, JobStatus};

pub const DEFAULT_JOB_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct CreateJobPayload {
    #[validate(
        required(message = "Title required"),
        length(min = 1, message = "Title required")
    )]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReorderJobPayload {
    #[validate(required(message = "fromOrder required"))]
    pub from_order: Option<i64>,
    #[validate(required(message = "toOrder required"))]
    pub to_order: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Order,
    Title,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub type JobListResponse = Paged<Job>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
