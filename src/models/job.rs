use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Archived,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub order: i64,
    #[serde(default)]
    pub location: String,
}

impl Job {
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Case-insensitive substring match over the title or any tag.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle_lower))
    }
}
