use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Fields the builder sends that have no typed counterpart. Stored and served back as-is.
pub type Extra = JsonMap<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(default)]
    pub job_id: i64,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub conditions: Vec<ConditionalRule>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn default_title() -> String {
    "New Assessment".to_string()
}

impl Assessment {
    /// Empty shape served for jobs that have no stored assessment yet.
    pub fn empty(job_id: i64) -> Self {
        Self {
            job_id,
            title: default_title(),
            sections: Vec::new(),
            conditions: Vec::new(),
            extra: Extra::new(),
        }
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|section| section.questions.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuestionFields")]
pub struct Question {
    pub id: String,
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub details: QuestionDetails,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Question {
    /// Label for messages, falling back to the id when the builder left it blank.
    pub fn display_label(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            _ => self.id.clone(),
        }
    }
}

/// Wire shape of [`Question`]. Both flattened fields see every unknown key, so the
/// keys owned by `details` are removed from `extra` afterwards.
#[derive(Deserialize)]
struct QuestionFields {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(flatten)]
    details: QuestionDetails,
    #[serde(flatten)]
    extra: Extra,
}

impl From<QuestionFields> for Question {
    fn from(fields: QuestionFields) -> Self {
        let mut extra = fields.extra;
        for key in fields.details.owned_keys() {
            extra.remove(*key);
        }
        Question {
            id: fields.id,
            label: fields.label,
            required: fields.required,
            details: fields.details,
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionDetails {
    Single {
        #[serde(default)]
        options: Vec<String>,
    },
    Multi {
        #[serde(default)]
        options: Vec<String>,
    },
    Text {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Long {
        #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    File,
}

impl QuestionDetails {
    fn owned_keys(&self) -> &'static [&'static str] {
        match self {
            QuestionDetails::Single { .. } | QuestionDetails::Multi { .. } => &["type", "options"],
            QuestionDetails::Text { .. } | QuestionDetails::Long { .. } => &["type", "maxLength"],
            QuestionDetails::Number { .. } => &["type", "min", "max"],
            QuestionDetails::File => &["type"],
        }
    }

    pub fn single(options: &[&str]) -> Self {
        QuestionDetails::Single {
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn multi(options: &[&str]) -> Self {
        QuestionDetails::Multi {
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    #[serde(rename = "if")]
    pub when: Condition,
    #[serde(default)]
    pub show: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub question_id: String,
    pub equals: JsonValue,
}
