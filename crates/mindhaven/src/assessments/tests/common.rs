use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::domain::{
    AnswerScoring, AnswerSet, AssessmentAnswer, AssessmentId, AssessmentQuestion,
    AssessmentResult, AssessmentType, AssessmentTypeId, ChoiceOption, QuestionId,
};
use crate::assessments::repository::AssessmentRepository;
use crate::assessments::service::AssessmentService;
use crate::auth::TokenIssuer;
use crate::config::AuthConfig;
use crate::storage::StorageError;
use crate::users::domain::UserId;

pub(super) fn depression_type() -> AssessmentType {
    AssessmentType::new(
        "dep-screen",
        "Depression Screener",
        "Short depressive symptom screen.",
    )
}

pub(super) fn anxiety_type() -> AssessmentType {
    AssessmentType::new(
        "anx-screen",
        "Anxiety Screener",
        "Short anxiety symptom screen.",
    )
}

pub(super) fn wellbeing_type() -> AssessmentType {
    AssessmentType::new("wellbeing", "Wellbeing Check", "General wellbeing check-in.")
}

pub(super) fn numeric_question(type_id: &AssessmentTypeId, id: &str, weight: f64) -> AssessmentQuestion {
    AssessmentQuestion {
        question_id: QuestionId(id.to_string()),
        type_id: type_id.clone(),
        prompt: format!("Prompt for {id}"),
        weight,
        scoring: AnswerScoring::Numeric,
    }
}

pub(super) fn option_question(
    type_id: &AssessmentTypeId,
    id: &str,
    weight: f64,
    options: Vec<(&str, Option<f64>)>,
) -> AssessmentQuestion {
    let options = options
        .into_iter()
        .map(|(value, score)| ChoiceOption {
            value: value.to_string(),
            label: value.replace('_', " "),
            score,
        })
        .collect();
    AssessmentQuestion {
        question_id: QuestionId(id.to_string()),
        type_id: type_id.clone(),
        prompt: format!("Prompt for {id}"),
        weight,
        scoring: AnswerScoring::OptionTable(options),
    }
}

pub(super) fn answers(entries: &[(&str, &str)]) -> AnswerSet {
    entries
        .iter()
        .map(|(id, value)| (QuestionId(id.to_string()), value.to_string()))
        .collect()
}

pub(super) fn user() -> UserId {
    UserId("user-000001".to_string())
}

#[derive(Default)]
pub(super) struct MemoryAssessments {
    pub(super) catalog: Mutex<Vec<(AssessmentType, Vec<AssessmentQuestion>)>>,
    pub(super) results: Mutex<Vec<AssessmentResult>>,
    pub(super) answers: Mutex<HashMap<AssessmentId, Vec<AssessmentAnswer>>>,
}

impl MemoryAssessments {
    pub(super) fn with_catalog(catalog: Vec<(AssessmentType, Vec<AssessmentQuestion>)>) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            ..Self::default()
        }
    }
}

impl AssessmentRepository for MemoryAssessments {
    fn types(&self) -> Result<Vec<AssessmentType>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().map(|(assessment, _)| assessment.clone()).collect())
    }

    fn type_by_id(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Option<AssessmentType>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .find(|(assessment, _)| &assessment.type_id == type_id)
            .map(|(assessment, _)| assessment.clone()))
    }

    fn questions_for(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Vec<AssessmentQuestion>, StorageError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .find(|(assessment, _)| &assessment.type_id == type_id)
            .map(|(_, questions)| questions.clone())
            .unwrap_or_default())
    }

    fn insert_result(&self, result: AssessmentResult) -> Result<AssessmentResult, StorageError> {
        let mut guard = self.results.lock().expect("results mutex poisoned");
        guard.push(result.clone());
        Ok(result)
    }

    fn insert_answers(&self, answers: Vec<AssessmentAnswer>) -> Result<(), StorageError> {
        let mut guard = self.answers.lock().expect("answers mutex poisoned");
        for answer in answers {
            guard
                .entry(answer.assessment_id.clone())
                .or_default()
                .push(answer);
        }
        Ok(())
    }

    fn results_for(&self, user_id: &UserId) -> Result<Vec<AssessmentResult>, StorageError> {
        let guard = self.results.lock().expect("results mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|result| &result.user_id == user_id)
            .cloned()
            .collect())
    }

    fn answers_for(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentAnswer>, StorageError> {
        let guard = self.answers.lock().expect("answers mutex poisoned");
        Ok(guard.get(assessment_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableAssessments;

impl AssessmentRepository for UnavailableAssessments {
    fn types(&self) -> Result<Vec<AssessmentType>, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn type_by_id(
        &self,
        _type_id: &AssessmentTypeId,
    ) -> Result<Option<AssessmentType>, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn questions_for(
        &self,
        _type_id: &AssessmentTypeId,
    ) -> Result<Vec<AssessmentQuestion>, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn insert_result(&self, _result: AssessmentResult) -> Result<AssessmentResult, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn insert_answers(&self, _answers: Vec<AssessmentAnswer>) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn results_for(&self, _user_id: &UserId) -> Result<Vec<AssessmentResult>, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }

    fn answers_for(
        &self,
        _assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentAnswer>, StorageError> {
        Err(StorageError::Unavailable("database offline".to_string()))
    }
}

/// Two-question depression screener used by the service and routing tests.
pub(super) fn screener_catalog() -> Vec<(AssessmentType, Vec<AssessmentQuestion>)> {
    let assessment = depression_type();
    let questions = vec![
        numeric_question(&assessment.type_id, "q1", 1.0),
        numeric_question(&assessment.type_id, "q2", 1.0),
    ];
    vec![(assessment, questions)]
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryAssessments>,
    Arc<MemoryAssessments>,
) {
    let repository = Arc::new(MemoryAssessments::with_catalog(screener_catalog()));
    let service = AssessmentService::new(repository.clone());
    (service, repository)
}

pub(super) fn issuer() -> TokenIssuer {
    TokenIssuer::new(&AuthConfig {
        jwt_secret: "assessment-tests-secret-with-length!!".to_string(),
        token_ttl_hours: 1,
    })
}

pub(super) fn bearer(issuer: &TokenIssuer) -> String {
    let token = issuer
        .issue(&user(), "casey")
        .expect("test token issues");
    format!("Bearer {token}")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn empty_answers() -> AnswerSet {
    BTreeMap::new()
}
