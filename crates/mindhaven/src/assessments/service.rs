use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AnswerSet, AssessmentAnswer, AssessmentId, AssessmentQuestion, AssessmentResult,
    AssessmentType, AssessmentTypeId, ChoiceOption, QuestionId,
};
use super::repository::AssessmentRepository;
use super::scoring::ScoringEngine;
use crate::storage::StorageError;
use crate::users::domain::UserId;

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

/// Submission payload: which questionnaire, and the raw answers keyed by
/// question id.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    #[serde(rename = "typeId")]
    pub type_id: AssessmentTypeId,
    #[serde(default)]
    pub answers: AnswerSet,
}

/// Response body for a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionView {
    #[serde(rename = "assessmentId")]
    pub assessment_id: AssessmentId,
    pub score: String,
    pub interpretation: String,
    pub recommendations: String,
}

/// One question as served to clients rendering a questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub prompt: String,
    pub weight: f64,
    pub options: Vec<ChoiceOption>,
}

impl From<&AssessmentQuestion> for QuestionView {
    fn from(question: &AssessmentQuestion) -> Self {
        Self {
            question_id: question.question_id.clone(),
            prompt: question.prompt.clone(),
            weight: question.weight,
            options: question.scoring.options().to_vec(),
        }
    }
}

/// One completed submission as served in the history listing.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub assessment_id: AssessmentId,
    pub type_id: AssessmentTypeId,
    pub assessment_name: String,
    pub score: String,
    pub interpretation: String,
    pub recommendations: String,
    pub completed_at: DateTime<Utc>,
}

/// Service composing the questionnaire catalog, the scoring engine, and
/// append-only result persistence.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: ScoringEngine,
        }
    }

    pub fn types(&self) -> Result<Vec<AssessmentType>, AssessmentServiceError> {
        Ok(self.repository.types()?)
    }

    pub fn questions(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Vec<QuestionView>, AssessmentServiceError> {
        let questions = self.fetch_questionnaire(type_id)?.1;
        Ok(questions.iter().map(QuestionView::from).collect())
    }

    /// Score a submission and persist the result plus its audit rows.
    pub fn submit(
        &self,
        user_id: &UserId,
        request: SubmissionRequest,
    ) -> Result<SubmissionView, AssessmentServiceError> {
        if request.answers.is_empty() {
            return Err(AssessmentServiceError::EmptyAnswers);
        }

        let (assessment, questions) = self.fetch_questionnaire(&request.type_id)?;
        let outcome = self.engine.score(&assessment, &questions, &request.answers);

        let result = AssessmentResult {
            assessment_id: next_assessment_id(),
            user_id: user_id.clone(),
            type_id: request.type_id.clone(),
            score: outcome.final_score,
            interpretation: outcome.interpretation.clone(),
            recommendations: outcome.recommendations.clone(),
            completed_at: Utc::now(),
        };
        let stored = self.repository.insert_result(result)?;

        // Every submitted answer is recorded for audit, including ids that
        // are not part of this questionnaire and so contributed nothing to
        // the score.
        let answer_rows = request
            .answers
            .iter()
            .map(|(question_id, answer_value)| AssessmentAnswer {
                assessment_id: stored.assessment_id.clone(),
                question_id: question_id.clone(),
                answer_value: answer_value.clone(),
            })
            .collect();
        self.repository.insert_answers(answer_rows)?;

        Ok(SubmissionView {
            assessment_id: stored.assessment_id,
            score: outcome.formatted_score(),
            interpretation: outcome.interpretation,
            recommendations: outcome.recommendations,
        })
    }

    /// Completed submissions for a user, newest first, with type names.
    pub fn history(&self, user_id: &UserId) -> Result<Vec<HistoryView>, AssessmentServiceError> {
        let results = self.repository.results_for(user_id)?;
        results
            .into_iter()
            .map(|result| {
                let name = self
                    .repository
                    .type_by_id(&result.type_id)?
                    .map(|assessment| assessment.name)
                    .unwrap_or_default();
                Ok(HistoryView {
                    score: result.formatted_score(),
                    assessment_id: result.assessment_id,
                    type_id: result.type_id,
                    assessment_name: name,
                    interpretation: result.interpretation,
                    recommendations: result.recommendations,
                    completed_at: result.completed_at,
                })
            })
            .collect()
    }

    fn fetch_questionnaire(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<(AssessmentType, Vec<AssessmentQuestion>), AssessmentServiceError> {
        let assessment = self
            .repository
            .type_by_id(type_id)?
            .ok_or(AssessmentServiceError::UnknownType)?;
        let questions = self.repository.questions_for(type_id)?;
        if questions.is_empty() {
            return Err(AssessmentServiceError::UnknownType);
        }
        Ok((assessment, questions))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("Type ID and answers are required")]
    EmptyAnswers,
    #[error("Assessment type not found")]
    UnknownType,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
