use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::assessments::domain::ChoiceOption;
use crate::users::domain::UserId;

/// Identifier wrapper for assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

/// A task handed to a user, typically by a care plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignment_id: AssignmentId,
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "assigned".to_string()
}

/// One reflection question shown after completing an assignment. Responses
/// are kept for review, not scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentQuestion {
    pub question_id: String,
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
}

/// Stored answer to one reflection question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub assignment_id: AssignmentId,
    pub question_id: String,
    pub answer_value: String,
}

/// The built-in reflection set attached to every assignment.
pub fn reflection_questions() -> Vec<AssignmentQuestion> {
    let scale = |entries: &[(&str, &str, f64)]| {
        entries
            .iter()
            .map(|(value, label, score)| ChoiceOption {
                value: value.to_string(),
                label: label.to_string(),
                score: Some(*score),
            })
            .collect()
    };

    vec![
        AssignmentQuestion {
            question_id: "reflect-goal".to_string(),
            prompt: "What is the main goal of this assignment?".to_string(),
            options: scale(&[
                ("understand", "Understand the topic", 1.0),
                ("practice", "Practice skills", 2.0),
                ("review", "Review material", 3.0),
            ]),
        },
        AssignmentQuestion {
            question_id: "reflect-confidence".to_string(),
            prompt: "How confident do you feel about completing this assignment?".to_string(),
            options: scale(&[
                ("not_confident", "Not confident", 1.0),
                ("somewhat_confident", "Somewhat confident", 2.0),
                ("very_confident", "Very confident", 3.0),
            ]),
        },
    ]
}
