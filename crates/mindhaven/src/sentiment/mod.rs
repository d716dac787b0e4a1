//! Lexicon-based sentiment scoring for journal entries and chat messages.
//!
//! The classifier is a pure function over its input text: it sums the
//! valence of every recognized word and maps the total onto a three-way
//! label with fixed thresholds. Results are captured once at entry
//! creation and never recomputed.

mod lexicon;

pub use lexicon::Lexicon;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Coarse three-way polarity classification of free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Fixed-threshold mapping from a lexicon sum to a label.
    pub fn from_score(score: i64) -> Self {
        if score > 1 {
            SentimentLabel::Positive
        } else if score < -1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

/// Sentiment captured for a single piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: SentimentLabel,
    pub score: i64,
}

/// Stateless classifier over an injected word-valence table.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Analyzer backed by the bundled affect table.
    pub fn bundled() -> Self {
        Self {
            lexicon: Arc::new(Lexicon::bundled().clone()),
        }
    }

    /// Score a text by summing the valence of every recognized token.
    /// Tolerates empty input and text of any length.
    pub fn analyze(&self, text: &str) -> SentimentReport {
        let score: i64 = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .filter_map(|token| self.lexicon.valence(&token.to_lowercase()))
            .map(i64::from)
            .sum();

        SentimentReport {
            sentiment: SentimentLabel::from_score(score),
            score,
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::bundled()
    }
}
