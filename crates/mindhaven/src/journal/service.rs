use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{EntryId, JournalEntry, SentimentCounts, SentimentTrends};
use super::repository::JournalRepository;
use crate::sentiment::{SentimentAnalyzer, SentimentLabel};
use crate::storage::StorageError;
use crate::users::domain::UserId;

const MAX_ENTRY_CHARS: usize = 5000;

static ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_entry_id() -> EntryId {
    let id = ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntryId(format!("entry-{id:06}"))
}

/// Service composing sentiment capture and append-only entry storage.
pub struct JournalService<R> {
    repository: Arc<R>,
    analyzer: SentimentAnalyzer,
}

impl<R> JournalService<R>
where
    R: JournalRepository + 'static,
{
    pub fn new(repository: Arc<R>, analyzer: SentimentAnalyzer) -> Self {
        Self {
            repository,
            analyzer,
        }
    }

    /// Score the entry text and persist it with the captured sentiment.
    pub fn create_entry(
        &self,
        user_id: &UserId,
        body: &str,
    ) -> Result<JournalEntry, JournalServiceError> {
        let body = body.trim();
        let length = body.chars().count();
        if length == 0 || length > MAX_ENTRY_CHARS {
            return Err(JournalServiceError::InvalidBody);
        }

        let sentiment = self.analyzer.analyze(body);
        let entry = JournalEntry {
            entry_id: next_entry_id(),
            user_id: user_id.clone(),
            body: body.to_string(),
            sentiment,
            created_at: Utc::now(),
        };

        Ok(self.repository.insert(entry)?)
    }

    /// Entries for a user, newest first.
    pub fn entries(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, JournalServiceError> {
        Ok(self.repository.entries_for(user_id)?)
    }

    /// Aggregate stored sentiment for trend display. Stored reports are
    /// summed as-is; nothing is rescored.
    pub fn analysis(&self, user_id: &UserId) -> Result<SentimentTrends, JournalServiceError> {
        let entries = self.repository.entries_for(user_id)?;

        let mut counts = SentimentCounts {
            positive: 0,
            neutral: 0,
            negative: 0,
        };
        let mut score_sum: i64 = 0;
        for entry in &entries {
            match entry.sentiment.sentiment {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
                SentimentLabel::Negative => counts.negative += 1,
            }
            score_sum += entry.sentiment.score;
        }

        let average = if entries.is_empty() {
            0.0
        } else {
            score_sum as f64 / entries.len() as f64
        };

        Ok(SentimentTrends {
            total_entries: entries.len(),
            sentiments: counts,
            average_score: format!("{average:.2}"),
        })
    }
}

/// Error raised by the journal service.
#[derive(Debug, thiserror::Error)]
pub enum JournalServiceError {
    #[error("Journal entry must be between 1 and 5000 characters")]
    InvalidBody,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
