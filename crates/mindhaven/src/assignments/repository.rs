use super::domain::{Assignment, AssignmentId, AssignmentResponse};
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for assignments and their reflection responses.
pub trait AssignmentRepository: Send + Sync {
    fn insert(&self, assignment: Assignment) -> Result<Assignment, StorageError>;
    fn update(&self, assignment: Assignment) -> Result<(), StorageError>;
    fn delete(&self, assignment_id: &AssignmentId) -> Result<(), StorageError>;
    fn fetch(&self, assignment_id: &AssignmentId) -> Result<Option<Assignment>, StorageError>;
    /// Assignments for a user, earliest due date first.
    fn assignments_for(&self, user_id: &UserId) -> Result<Vec<Assignment>, StorageError>;
    fn insert_responses(&self, responses: Vec<AssignmentResponse>) -> Result<(), StorageError>;
    fn responses_for(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<AssignmentResponse>, StorageError>;
}
