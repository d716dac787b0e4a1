use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::users::domain::UserId;

/// Identifier wrapper for mood entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoodEntryId(pub String);

/// One logged mood score on a 1-10 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub entry_id: MoodEntryId,
    pub user_id: UserId,
    pub mood_score: u8,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Rolling aggregates over the last month of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStats {
    /// Mean score over the last seven days, one decimal.
    pub weekly_average: f64,
    /// Second-half mean minus first-half mean of the week's entries in
    /// chronological order; positive means mood is improving.
    pub trend: f64,
    pub entries_this_week: usize,
    pub total_entries: usize,
}
