use super::domain::{
    AssessmentAnswer, AssessmentId, AssessmentQuestion, AssessmentResult, AssessmentType,
    AssessmentTypeId,
};
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for the questionnaire catalog and submission rows.
/// Types and questions are immutable reference data; results and answers
/// are append-only.
pub trait AssessmentRepository: Send + Sync {
    fn types(&self) -> Result<Vec<AssessmentType>, StorageError>;
    fn type_by_id(&self, type_id: &AssessmentTypeId)
        -> Result<Option<AssessmentType>, StorageError>;
    /// Questions for a type, in catalog order.
    fn questions_for(
        &self,
        type_id: &AssessmentTypeId,
    ) -> Result<Vec<AssessmentQuestion>, StorageError>;
    fn insert_result(&self, result: AssessmentResult)
        -> Result<AssessmentResult, StorageError>;
    fn insert_answers(&self, answers: Vec<AssessmentAnswer>) -> Result<(), StorageError>;
    /// Completed results for a user, newest first.
    fn results_for(&self, user_id: &UserId) -> Result<Vec<AssessmentResult>, StorageError>;
    /// Audit rows for one result.
    fn answers_for(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<Vec<AssessmentAnswer>, StorageError>;
}
