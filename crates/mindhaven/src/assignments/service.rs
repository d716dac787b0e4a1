use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    reflection_questions, Assignment, AssignmentDraft, AssignmentId, AssignmentQuestion,
    AssignmentResponse,
};
use super::repository::AssignmentRepository;
use crate::storage::StorageError;
use crate::users::domain::UserId;

static ASSIGNMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assignment_id() -> AssignmentId {
    let id = ASSIGNMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssignmentId(format!("asn-{id:06}"))
}

/// Service enforcing ownership over assignments and their responses.
pub struct AssignmentService<R> {
    repository: Arc<R>,
}

impl<R> AssignmentService<R>
where
    R: AssignmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn assignments(&self, user_id: &UserId) -> Result<Vec<Assignment>, AssignmentServiceError> {
        Ok(self.repository.assignments_for(user_id)?)
    }

    pub fn create(
        &self,
        user_id: &UserId,
        draft: AssignmentDraft,
    ) -> Result<Assignment, AssignmentServiceError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(AssignmentServiceError::MissingTitle);
        }

        let assignment = Assignment {
            assignment_id: next_assignment_id(),
            user_id: user_id.clone(),
            title,
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status,
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(assignment)?)
    }

    pub fn update(
        &self,
        user_id: &UserId,
        assignment_id: &AssignmentId,
        draft: AssignmentDraft,
    ) -> Result<Assignment, AssignmentServiceError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(AssignmentServiceError::MissingTitle);
        }
        let existing = self.owned(user_id, assignment_id)?;

        let updated = Assignment {
            title,
            description: draft.description,
            due_date: draft.due_date,
            status: draft.status,
            ..existing
        };
        self.repository.update(updated.clone())?;
        Ok(updated)
    }

    pub fn delete(
        &self,
        user_id: &UserId,
        assignment_id: &AssignmentId,
    ) -> Result<(), AssignmentServiceError> {
        self.owned(user_id, assignment_id)?;
        Ok(self.repository.delete(assignment_id)?)
    }

    pub fn questions(&self) -> Vec<AssignmentQuestion> {
        reflection_questions()
    }

    /// Store reflection answers verbatim against an owned assignment.
    pub fn submit_responses(
        &self,
        user_id: &UserId,
        assignment_id: &AssignmentId,
        answers: BTreeMap<String, String>,
    ) -> Result<usize, AssignmentServiceError> {
        if answers.is_empty() {
            return Err(AssignmentServiceError::EmptyResponses);
        }
        self.owned(user_id, assignment_id)?;

        let count = answers.len();
        let rows = answers
            .into_iter()
            .map(|(question_id, answer_value)| AssignmentResponse {
                assignment_id: assignment_id.clone(),
                question_id,
                answer_value,
            })
            .collect();
        self.repository.insert_responses(rows)?;
        Ok(count)
    }

    fn owned(
        &self,
        user_id: &UserId,
        assignment_id: &AssignmentId,
    ) -> Result<Assignment, AssignmentServiceError> {
        self.repository
            .fetch(assignment_id)?
            .filter(|assignment| &assignment.user_id == user_id)
            .ok_or(AssignmentServiceError::UnknownAssignment)
    }
}

/// Error raised by the assignment service.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentServiceError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Responses are required")]
    EmptyResponses,
    #[error("Assignment not found")]
    UnknownAssignment,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryAssignments {
        assignments: Mutex<Vec<Assignment>>,
        responses: Mutex<Vec<AssignmentResponse>>,
    }

    impl AssignmentRepository for MemoryAssignments {
        fn insert(&self, assignment: Assignment) -> Result<Assignment, StorageError> {
            let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
            guard.push(assignment.clone());
            Ok(assignment)
        }

        fn update(&self, assignment: Assignment) -> Result<(), StorageError> {
            let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
            match guard
                .iter_mut()
                .find(|row| row.assignment_id == assignment.assignment_id)
            {
                Some(row) => {
                    *row = assignment;
                    Ok(())
                }
                None => Err(StorageError::NotFound),
            }
        }

        fn delete(&self, assignment_id: &AssignmentId) -> Result<(), StorageError> {
            let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
            let before = guard.len();
            guard.retain(|row| &row.assignment_id != assignment_id);
            if guard.len() == before {
                Err(StorageError::NotFound)
            } else {
                Ok(())
            }
        }

        fn fetch(&self, assignment_id: &AssignmentId) -> Result<Option<Assignment>, StorageError> {
            let guard = self.assignments.lock().expect("assignment mutex poisoned");
            Ok(guard
                .iter()
                .find(|row| &row.assignment_id == assignment_id)
                .cloned())
        }

        fn assignments_for(&self, user_id: &UserId) -> Result<Vec<Assignment>, StorageError> {
            let guard = self.assignments.lock().expect("assignment mutex poisoned");
            let mut rows: Vec<Assignment> = guard
                .iter()
                .filter(|row| &row.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| a.due_date.cmp(&b.due_date));
            Ok(rows)
        }

        fn insert_responses(
            &self,
            responses: Vec<AssignmentResponse>,
        ) -> Result<(), StorageError> {
            let mut guard = self.responses.lock().expect("response mutex poisoned");
            guard.extend(responses);
            Ok(())
        }

        fn responses_for(
            &self,
            assignment_id: &AssignmentId,
        ) -> Result<Vec<AssignmentResponse>, StorageError> {
            let guard = self.responses.lock().expect("response mutex poisoned");
            Ok(guard
                .iter()
                .filter(|row| &row.assignment_id == assignment_id)
                .cloned()
                .collect())
        }
    }

    fn user() -> UserId {
        UserId("user-000001".to_string())
    }

    fn draft(title: &str) -> AssignmentDraft {
        AssignmentDraft {
            title: title.to_string(),
            description: None,
            due_date: None,
            status: "assigned".to_string(),
        }
    }

    fn service() -> (AssignmentService<MemoryAssignments>, Arc<MemoryAssignments>) {
        let repository = Arc::new(MemoryAssignments::default());
        (AssignmentService::new(repository.clone()), repository)
    }

    #[test]
    fn responses_attach_to_owned_assignments() {
        let (service, repository) = service();
        let assignment = service
            .create(&user(), draft("Practice breathing exercise"))
            .expect("assignment creates");

        let mut answers = BTreeMap::new();
        answers.insert("reflect-goal".to_string(), "practice".to_string());
        answers.insert("reflect-confidence".to_string(), "very_confident".to_string());

        let count = service
            .submit_responses(&user(), &assignment.assignment_id, answers)
            .expect("responses save");
        assert_eq!(count, 2);
        assert_eq!(
            repository
                .responses_for(&assignment.assignment_id)
                .expect("responses load")
                .len(),
            2
        );
    }

    #[test]
    fn responses_to_foreign_assignments_are_rejected() {
        let (service, _) = service();
        let assignment = service
            .create(&user(), draft("Daily walk"))
            .expect("assignment creates");

        let mut answers = BTreeMap::new();
        answers.insert("reflect-goal".to_string(), "practice".to_string());

        let other = UserId("user-000002".to_string());
        let err = service
            .submit_responses(&other, &assignment.assignment_id, answers)
            .expect_err("must hide foreign rows");
        assert!(matches!(err, AssignmentServiceError::UnknownAssignment));
    }

    #[test]
    fn empty_response_sets_are_rejected() {
        let (service, _) = service();
        let assignment = service
            .create(&user(), draft("Daily walk"))
            .expect("assignment creates");
        let err = service
            .submit_responses(&user(), &assignment.assignment_id, BTreeMap::new())
            .expect_err("must reject");
        assert!(matches!(err, AssignmentServiceError::EmptyResponses));
    }

    #[test]
    fn the_reflection_set_is_fixed() {
        let (service, _) = service();
        let questions = service.questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options.len(), 3);
    }
}
