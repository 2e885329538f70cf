use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Body of `POST /assessments/:job_id/submit`. Both fields are optional and untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponsePayload {
    #[serde(default)]
    pub candidate_id: Option<JsonValue>,
    #[serde(default)]
    pub answers: Option<JsonValue>,
}
