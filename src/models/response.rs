use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub type Answers = BTreeMap<String, JsonValue>;

/// A submitted form. `candidate_id` and `answers` are kept exactly as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub job_id: i64,
    #[serde(default)]
    pub candidate_id: JsonValue,
    #[serde(default)]
    pub answers: JsonValue,
}

impl AssessmentResponse {
    pub fn key(&self) -> String {
        response_key(self.job_id, &self.candidate_id)
    }
}

/// `"{job}:{candidate}"`, where a string candidate id is used unquoted, so `7` and
/// `"7"` share a key, and a missing id reads as `null`.
pub fn response_key(job_id: i64, candidate_id: &JsonValue) -> String {
    match candidate_id {
        JsonValue::String(s) => format!("{}:{}", job_id, s),
        other => format!("{}:{}", job_id, other),
    }
}
