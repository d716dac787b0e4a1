//! Integration specifications for the assessment submission flow.
//!
//! Scenarios run the bundled screening catalog through the public service
//! facade: catalog browsing, scoring, banding, audit rows, and history.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use mindhaven::assessments::{
        standard_catalog, AssessmentAnswer, AssessmentId, AssessmentQuestion, AssessmentRepository,
        AssessmentResult, AssessmentService, AssessmentType, AssessmentTypeId,
    };
    use mindhaven::storage::StorageError;
    use mindhaven::users::domain::UserId;

    #[derive(Default)]
    pub(super) struct MemoryAssessments {
        catalog: Mutex<Vec<(AssessmentType, Vec<AssessmentQuestion>)>>,
        results: Mutex<Vec<AssessmentResult>>,
        answers: Mutex<HashMap<AssessmentId, Vec<AssessmentAnswer>>>,
    }

    impl MemoryAssessments {
        pub(super) fn seeded() -> Self {
            Self {
                catalog: Mutex::new(standard_catalog()),
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

        fn insert_result(
            &self,
            result: AssessmentResult,
        ) -> Result<AssessmentResult, StorageError> {
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

    pub(super) fn build_service() -> (
        AssessmentService<MemoryAssessments>,
        Arc<MemoryAssessments>,
    ) {
        let repository = Arc::new(MemoryAssessments::seeded());
        (AssessmentService::new(repository.clone()), repository)
    }

    pub(super) fn user() -> UserId {
        UserId("user-000001".to_string())
    }
}

use common::{build_service, user};
use mindhaven::assessments::{
    AnswerSet, AssessmentRepository, AssessmentTypeId, QuestionId, SubmissionRequest,
};

fn answers(entries: &[(&str, &str)]) -> AnswerSet {
    entries
        .iter()
        .map(|(id, value)| (QuestionId(id.to_string()), value.to_string()))
        .collect()
}

#[test]
fn catalog_exposes_both_bundled_screeners() {
    let (service, _) = build_service();
    let types = service.types().expect("types load");
    let names: Vec<&str> = types.iter().map(|assessment| assessment.name.as_str()).collect();
    assert!(names.contains(&"Depression Screening (PHQ-9)"));
    assert!(names.contains(&"Anxiety Screening (GAD-7)"));

    let questions = service
        .questions(&AssessmentTypeId("phq-9".to_string()))
        .expect("questions load");
    assert_eq!(questions.len(), 9);
    assert_eq!(questions[0].options.len(), 4);
}

#[test]
fn a_full_phq9_submission_scores_through_option_values() {
    let (service, _) = build_service();

    // All nine answered "nearly every day" scores 3.00: option values are
    // tokens, so scoring must come from the option table.
    let submitted: Vec<(String, &str)> = (1..=9)
        .map(|index| (format!("phq9-q{index}"), "nearly_every_day"))
        .collect();
    let submitted: AnswerSet = submitted
        .into_iter()
        .map(|(id, value)| (QuestionId(id), value.to_string()))
        .collect();

    let view = service
        .submit(
            &user(),
            SubmissionRequest {
                type_id: AssessmentTypeId("phq-9".to_string()),
                answers: submitted,
            },
        )
        .expect("submission scores");

    assert_eq!(view.score, "3.00");
    assert_eq!(view.interpretation, "Minimal depression");
}

#[test]
fn partial_submissions_average_only_answered_questions() {
    let (service, _) = build_service();

    let view = service
        .submit(
            &user(),
            SubmissionRequest {
                type_id: AssessmentTypeId("gad-7".to_string()),
                answers: answers(&[
                    ("gad7-q1", "nearly_every_day"),
                    ("gad7-q2", "more_than_half"),
                ]),
            },
        )
        .expect("submission scores");

    // (3 + 2) / 2
    assert_eq!(view.score, "2.50");
    assert_eq!(view.interpretation, "Minimal anxiety");
}

#[test]
fn submissions_append_to_history_with_audit_rows() {
    let (service, repository) = build_service();

    let first = service
        .submit(
            &user(),
            SubmissionRequest {
                type_id: AssessmentTypeId("phq-9".to_string()),
                answers: answers(&[("phq9-q1", "several_days"), ("off-catalog", "noted")]),
            },
        )
        .expect("first submission");
    let second = service
        .submit(
            &user(),
            SubmissionRequest {
                type_id: AssessmentTypeId("gad-7".to_string()),
                answers: answers(&[("gad7-q1", "several_days")]),
            },
        )
        .expect("second submission");

    let history = service.history(&user()).expect("history loads");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].assessment_id, second.assessment_id);
    assert_eq!(history[0].assessment_name, "Anxiety Screening (GAD-7)");
    assert_eq!(history[1].assessment_id, first.assessment_id);

    // The stray answer is on the audit trail even though it never scored.
    let audit = repository
        .answers_for(&first.assessment_id)
        .expect("audit rows load");
    assert_eq!(audit.len(), 2);
    assert!(audit
        .iter()
        .any(|row| row.question_id == QuestionId("off-catalog".to_string())));
}

#[test]
fn resubmitting_identical_answers_reproduces_the_result() {
    let (service, _) = build_service();
    let request = || SubmissionRequest {
        type_id: AssessmentTypeId("phq-9".to_string()),
        answers: answers(&[("phq9-q1", "nearly_every_day"), ("phq9-q2", "several_days")]),
    };

    let first = service.submit(&user(), request()).expect("first scores");
    let second = service.submit(&user(), request()).expect("second scores");

    assert_eq!(first.score, second.score);
    assert_eq!(first.interpretation, second.interpretation);
    assert_eq!(first.recommendations, second.recommendations);
    assert_ne!(first.assessment_id, second.assessment_id);
}
