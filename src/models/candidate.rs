use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Applied,
        Stage::Screen,
        Stage::Tech,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screen => "screen",
            Stage::Tech => "tech",
            Stage::Offer => "offer",
            Stage::Hired => "hired",
            Stage::Rejected => "rejected",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub job_id: i64,
    pub stage: Stage,
}

impl Candidate {
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.email.to_lowercase().contains(needle_lower)
    }
}
