//! Free-text journal entries with sentiment captured at creation time.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{EntryId, JournalEntry, SentimentCounts, SentimentTrends};
pub use repository::JournalRepository;
pub use router::journal_router;
pub use service::{JournalService, JournalServiceError};
