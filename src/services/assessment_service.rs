use crate::dto::assessment_dto::SubmitResponsePayload;
use crate::error::Result;
use crate::models::assessment::Assessment;
use serde_json::Value as JsonValue;

use crate::models::response::{response_key, AssessmentResponse};
use crate::store::{Collection, Store};

#[derive(Clone)]
pub struct AssessmentService {
    store: Store,
}

impl AssessmentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Stored assessment for the job, or the empty default. Never fails with not-found.
    pub async fn get_for_job(&self, job_id: i64) -> Result<Assessment> {
        Ok(self
            .store
            .get(Collection::Assessments, &job_id.to_string())
            .await?
            .unwrap_or_else(|| Assessment::empty(job_id)))
    }

    /// Replaces whatever is stored for the job with `assessment`. No merge.
    pub async fn upsert(&self, job_id: i64, mut assessment: Assessment) -> Result<Assessment> {
        assessment.job_id = job_id;
        self.store
            .set(Collection::Assessments, &job_id.to_string(), &assessment)
            .await?;
        tracing::info!(
            job_id,
            sections = assessment.sections.len(),
            "assessment saved"
        );
        Ok(assessment)
    }

    /// Last write wins per `(job, candidate)`. Answers are stored without validation.
    pub async fn submit(&self, job_id: i64, payload: SubmitResponsePayload) -> Result<()> {
        let response = AssessmentResponse {
            job_id,
            candidate_id: payload.candidate_id.unwrap_or(JsonValue::Null),
            answers: payload
                .answers
                .unwrap_or_else(|| JsonValue::Object(Default::default())),
        };
        self.store
            .set(Collection::Responses, &response.key(), &response)
            .await?;
        tracing::info!(job_id, candidate_id = %response.candidate_id, "assessment response stored");
        Ok(())
    }

    pub async fn response(
        &self,
        job_id: i64,
        candidate_id: &JsonValue,
    ) -> Result<Option<AssessmentResponse>> {
        let key = response_key(job_id, candidate_id);
        Ok(self.store.get(Collection::Responses, &key).await?)
    }
}
