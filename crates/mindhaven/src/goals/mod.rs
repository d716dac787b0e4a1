//! Personal goals with progress tracking.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Goal, GoalDraft, GoalId, GoalStatus};
pub use repository::GoalRepository;
pub use router::goal_router;
pub use service::{GoalService, GoalServiceError};
