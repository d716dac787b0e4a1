//! Daily mood scores and the rolling statistics shown on the dashboard.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{MoodEntry, MoodEntryId, MoodStats};
pub use repository::MoodRepository;
pub use router::mood_router;
pub use service::{MoodService, MoodServiceError};
