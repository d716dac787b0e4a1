use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentReport;
use crate::users::domain::UserId;

/// Identifier wrapper for journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

/// One journal entry. The sentiment report is computed when the entry is
/// written and never recomputed afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: EntryId,
    pub user_id: UserId,
    pub body: String,
    pub sentiment: SentimentReport,
    pub created_at: DateTime<Utc>,
}

/// Aggregated sentiment across a user's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentTrends {
    pub total_entries: usize,
    pub sentiments: SentimentCounts,
    /// Mean lexicon score across all entries, two decimals.
    pub average_score: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}
