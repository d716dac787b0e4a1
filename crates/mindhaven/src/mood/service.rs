use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::domain::{MoodEntry, MoodEntryId, MoodStats};
use super::repository::MoodRepository;
use crate::storage::StorageError;
use crate::users::domain::UserId;

static MOOD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_mood_id() -> MoodEntryId {
    let id = MOOD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MoodEntryId(format!("mood-{id:06}"))
}

/// Service recording mood scores and deriving rolling statistics.
pub struct MoodService<R> {
    repository: Arc<R>,
}

impl<R> MoodService<R>
where
    R: MoodRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create_entry(
        &self,
        user_id: &UserId,
        mood_score: i64,
        notes: Option<String>,
    ) -> Result<MoodEntry, MoodServiceError> {
        if !(1..=10).contains(&mood_score) {
            return Err(MoodServiceError::ScoreOutOfRange);
        }

        let entry = MoodEntry {
            entry_id: next_mood_id(),
            user_id: user_id.clone(),
            mood_score: mood_score as u8,
            notes: notes.filter(|notes| !notes.trim().is_empty()),
            recorded_at: Utc::now(),
        };

        Ok(self.repository.insert(entry)?)
    }

    /// Entries for a user, newest first.
    pub fn entries(&self, user_id: &UserId) -> Result<Vec<MoodEntry>, MoodServiceError> {
        Ok(self.repository.entries_for(user_id)?)
    }

    /// Aggregates over the 30 days before `now`: a weekly average, and a
    /// trend comparing the older half of the week's entries with the newer
    /// half.
    pub fn stats(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<MoodStats, MoodServiceError> {
        let month_entries =
            self.repository
                .entries_between(user_id, now - Duration::days(30), now)?;

        let week_start = now - Duration::days(7);
        let week_entries: Vec<&MoodEntry> = month_entries
            .iter()
            .filter(|entry| entry.recorded_at >= week_start)
            .collect();

        let weekly_average = if week_entries.is_empty() {
            0.0
        } else {
            let sum: u32 = week_entries.iter().map(|entry| u32::from(entry.mood_score)).sum();
            round1(f64::from(sum) / week_entries.len() as f64)
        };

        let trend = if week_entries.len() >= 2 {
            let midpoint = week_entries.len() / 2;
            let (older, newer) = week_entries.split_at(midpoint);
            round2(mean(newer) - mean(older))
        } else {
            0.0
        };

        Ok(MoodStats {
            weekly_average,
            trend,
            entries_this_week: week_entries.len(),
            total_entries: month_entries.len(),
        })
    }
}

fn mean(entries: &[&MoodEntry]) -> f64 {
    let sum: u32 = entries.iter().map(|entry| u32::from(entry.mood_score)).sum();
    f64::from(sum) / entries.len() as f64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Error raised by the mood service.
#[derive(Debug, thiserror::Error)]
pub enum MoodServiceError {
    #[error("Mood score must be between 1 and 10")]
    ScoreOutOfRange,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
