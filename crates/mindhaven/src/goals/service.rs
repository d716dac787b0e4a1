use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{Goal, GoalDraft, GoalId};
use super::repository::GoalRepository;
use crate::storage::StorageError;
use crate::users::domain::UserId;

const MAX_TITLE_CHARS: usize = 100;

static GOAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_goal_id() -> GoalId {
    let id = GOAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    GoalId(format!("goal-{id:06}"))
}

/// Service enforcing ownership and validation over the goal store.
pub struct GoalService<R> {
    repository: Arc<R>,
}

impl<R> GoalService<R>
where
    R: GoalRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn goals(&self, user_id: &UserId) -> Result<Vec<Goal>, GoalServiceError> {
        Ok(self.repository.goals_for(user_id)?)
    }

    pub fn create(&self, user_id: &UserId, draft: GoalDraft) -> Result<Goal, GoalServiceError> {
        let (title, description, progress) = validate_draft(&draft)?;

        let goal = Goal {
            goal_id: next_goal_id(),
            user_id: user_id.clone(),
            title,
            description,
            target_date: draft.target_date,
            status: draft.status,
            progress,
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(goal)?)
    }

    pub fn update(
        &self,
        user_id: &UserId,
        goal_id: &GoalId,
        draft: GoalDraft,
    ) -> Result<Goal, GoalServiceError> {
        let (title, description, progress) = validate_draft(&draft)?;
        let existing = self.owned_goal(user_id, goal_id)?;

        let updated = Goal {
            title,
            description,
            target_date: draft.target_date,
            status: draft.status,
            progress,
            ..existing
        };
        self.repository.update(updated.clone())?;
        Ok(updated)
    }

    pub fn delete(&self, user_id: &UserId, goal_id: &GoalId) -> Result<(), GoalServiceError> {
        self.owned_goal(user_id, goal_id)?;
        Ok(self.repository.delete(goal_id)?)
    }

    /// Fetch a goal, treating rows owned by other users as missing so the
    /// API never confirms their existence.
    fn owned_goal(&self, user_id: &UserId, goal_id: &GoalId) -> Result<Goal, GoalServiceError> {
        self.repository
            .fetch(goal_id)?
            .filter(|goal| &goal.user_id == user_id)
            .ok_or(GoalServiceError::UnknownGoal)
    }
}

fn validate_draft(draft: &GoalDraft) -> Result<(String, Option<String>, u8), GoalServiceError> {
    let title = draft.title.trim().to_string();
    let length = title.chars().count();
    if length == 0 || length > MAX_TITLE_CHARS {
        return Err(GoalServiceError::InvalidTitle);
    }
    if !(0..=100).contains(&draft.progress) {
        return Err(GoalServiceError::InvalidProgress);
    }
    let description = draft
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_string);
    Ok((title, description, draft.progress as u8))
}

/// Error raised by the goal service.
#[derive(Debug, thiserror::Error)]
pub enum GoalServiceError {
    #[error("Title must be between 1 and 100 characters")]
    InvalidTitle,
    #[error("Progress must be between 0 and 100")]
    InvalidProgress,
    #[error("Goal not found")]
    UnknownGoal,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
