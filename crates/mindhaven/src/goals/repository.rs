use super::domain::{Goal, GoalId};
use crate::storage::StorageError;
use crate::users::domain::UserId;

/// Storage abstraction for goals.
pub trait GoalRepository: Send + Sync {
    fn insert(&self, goal: Goal) -> Result<Goal, StorageError>;
    fn update(&self, goal: Goal) -> Result<(), StorageError>;
    fn delete(&self, goal_id: &GoalId) -> Result<(), StorageError>;
    fn fetch(&self, goal_id: &GoalId) -> Result<Option<Goal>, StorageError>;
    /// Goals for a user, newest first.
    fn goals_for(&self, user_id: &UserId) -> Result<Vec<Goal>, StorageError>;
}
