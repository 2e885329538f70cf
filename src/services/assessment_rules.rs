//! Conditional visibility and answer checks for assessment forms.
//!
//! Both functions are pure: they take the assessment definition and the current
//! answers and recompute everything from scratch, so callers simply re-run them
//! on every answer change.

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use crate::models::assessment::{Assessment, Question, QuestionDetails};
use crate::models::response::Answers;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnswerIssue {
    #[error("Please fill required question: {label}")]
    MissingRequired { question_id: String, label: String },

    #[error("Number out of range for: {label}")]
    OutOfRange { question_id: String, label: String },

    #[error("Too long: {label}")]
    TooLong { question_id: String, label: String },
}

/// Ids of the questions that should be shown for `answers`.
///
/// Every question starts visible. Rules are applied in order: when the answer to
/// the rule's question equals the expected value its `show` ids become visible,
/// otherwise they are hidden. An unanswered question never matches.
pub fn visible_questions(assessment: &Assessment, answers: &Answers) -> BTreeSet<String> {
    let mut visible: BTreeSet<String> = assessment.questions().map(|q| q.id.clone()).collect();

    for rule in &assessment.conditions {
        let matched = answers
            .get(&rule.when.question_id)
            .map(|answer| loose_text(answer) == loose_text(&rule.when.equals))
            .unwrap_or(false);
        for id in &rule.show {
            if matched {
                visible.insert(id.clone());
            } else {
                visible.remove(id);
            }
        }
    }
    visible
}

/// First problem found among the visible questions, in section order.
pub fn validate_answers(assessment: &Assessment, answers: &Answers) -> Result<(), AnswerIssue> {
    let visible = visible_questions(assessment, answers);
    for question in assessment.questions() {
        if !visible.contains(&question.id) {
            continue;
        }
        check_question(question, answers.get(&question.id))?;
    }
    Ok(())
}

fn check_question(question: &Question, answer: Option<&JsonValue>) -> Result<(), AnswerIssue> {
    let unanswered = answer.map(is_blank).unwrap_or(true);
    if unanswered {
        if question.required {
            return Err(AnswerIssue::MissingRequired {
                question_id: question.id.clone(),
                label: question.display_label(),
            });
        }
        return Ok(());
    }
    let Some(answer) = answer else {
        return Ok(());
    };

    match &question.details {
        QuestionDetails::Number { min, max } => {
            let in_range = as_number(answer)
                .map(|n| min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi))
                .unwrap_or(false);
            if !in_range {
                return Err(AnswerIssue::OutOfRange {
                    question_id: question.id.clone(),
                    label: question.display_label(),
                });
            }
        }
        QuestionDetails::Text { max_length } | QuestionDetails::Long { max_length } => {
            if let Some(limit) = max_length {
                if loose_text(answer).chars().count() > *limit {
                    return Err(AnswerIssue::TooLong {
                        question_id: question.id.clone(),
                        label: question.display_label(),
                    });
                }
            }
        }
        QuestionDetails::Single { .. } | QuestionDetails::Multi { .. } | QuestionDetails::File => {}
    }
    Ok(())
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Text form used for comparisons: strings unquoted, arrays comma-joined.
fn loose_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items.iter().map(loose_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
