use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::users::domain::UserId;

/// Identifier wrapper for questionnaire definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentTypeId(pub String);

/// Identifier wrapper for individual questions. Answer sets key on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for completed submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Interpretation family for a questionnaire. Tagged once when the catalog
/// loads so scoring never dispatches on display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentCategory {
    Depression,
    Anxiety,
    General,
}

impl AssessmentCategory {
    /// Derive the category from a display name. Case-sensitive substring
    /// match, "Depression" checked before "Anxiety".
    pub fn from_name(name: &str) -> Self {
        if name.contains("Depression") {
            AssessmentCategory::Depression
        } else if name.contains("Anxiety") {
            AssessmentCategory::Anxiety
        } else {
            AssessmentCategory::General
        }
    }
}

/// A named questionnaire. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentType {
    pub type_id: AssessmentTypeId,
    pub name: String,
    pub description: String,
    pub category: AssessmentCategory,
}

impl AssessmentType {
    pub fn new(
        type_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let category = AssessmentCategory::from_name(&name);
        Self {
            type_id: AssessmentTypeId(type_id.into()),
            name,
            description: description.into(),
            category,
        }
    }
}

/// One selectable answer. `label` is display-only; `score`, when present,
/// replaces numeric parsing of the submitted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// How a question turns a submitted answer into a score contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnswerScoring {
    /// Parse the submitted value as a number.
    Numeric,
    /// Look the submitted value up in an option table first.
    OptionTable(Vec<ChoiceOption>),
}

impl AnswerScoring {
    /// Parse a raw JSON-encoded option list as stored in reference data.
    /// A malformed list degrades to [`AnswerScoring::Numeric`] with a
    /// warning; bad reference data must never fail a submission.
    pub fn from_raw_options(question_id: &QuestionId, raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return AnswerScoring::Numeric;
        };

        match serde_json::from_str::<Vec<ChoiceOption>>(raw) {
            Ok(options) => AnswerScoring::OptionTable(options),
            Err(error) => {
                tracing::warn!(
                    question_id = %question_id.0,
                    %error,
                    "unparseable option list, falling back to numeric answers"
                );
                AnswerScoring::Numeric
            }
        }
    }

    /// Score override for a submitted value, if the table defines one.
    pub fn option_score(&self, answer: &str) -> Option<f64> {
        match self {
            AnswerScoring::Numeric => None,
            AnswerScoring::OptionTable(options) => options
                .iter()
                .find(|option| option.value == answer)
                .and_then(|option| option.score),
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        match self {
            AnswerScoring::Numeric => &[],
            AnswerScoring::OptionTable(options) => options,
        }
    }
}

/// A single question within a questionnaire. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub question_id: QuestionId,
    pub type_id: AssessmentTypeId,
    pub prompt: String,
    pub weight: f64,
    pub scoring: AnswerScoring,
}

impl AssessmentQuestion {
    /// Normalize a stored weight: absent defaults to 1, and non-positive
    /// values (invalid reference data) are treated as 1 with a warning.
    pub fn resolve_weight(question_id: &QuestionId, raw: Option<f64>) -> f64 {
        match raw {
            Some(weight) if weight > 0.0 => weight,
            Some(weight) => {
                tracing::warn!(
                    question_id = %question_id.0,
                    weight,
                    "non-positive question weight, treating as 1"
                );
                1.0
            }
            None => 1.0,
        }
    }
}

/// Mapping from question id to the submitted answer value.
pub type AnswerSet = BTreeMap<QuestionId, String>;

/// Scored outcome of one submission. Append-only per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_id: AssessmentId,
    pub user_id: UserId,
    pub type_id: AssessmentTypeId,
    pub score: f64,
    pub interpretation: String,
    pub recommendations: String,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// Wire representation of the score, always two decimals.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", self.score)
    }
}

/// Audit row linking a result to one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAnswer {
    pub assessment_id: AssessmentId,
    pub question_id: QuestionId,
    pub answer_value: String,
}
