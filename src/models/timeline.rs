use serde::{Deserialize, Serialize};

use crate::models::candidate::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Created,
    Applied,
    Stage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Epoch milliseconds.
    #[serde(alias = "ts")]
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub text: String,
}

impl TimelineEntry {
    pub fn created(timestamp: i64) -> Self {
        Self {
            timestamp,
            kind: TimelineKind::Created,
            text: "Candidate created".to_string(),
        }
    }

    pub fn applied(timestamp: i64, job_id: i64) -> Self {
        Self {
            timestamp,
            kind: TimelineKind::Applied,
            text: format!("Applied to job #{}", job_id),
        }
    }

    pub fn stage(timestamp: i64, stage: Stage) -> Self {
        Self {
            timestamp,
            kind: TimelineKind::Stage,
            text: format!("Moved to {}", stage.as_str().to_uppercase()),
        }
    }
}
