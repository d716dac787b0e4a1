//! Weighted questionnaire scoring and interpretation.
//!
//! The engine is a pure function over its inputs: it never fails, never
//! performs I/O, and degrades gracefully on bad data (unanswered
//! questions, unparseable values). Structural failures — an unknown type
//! or an empty answer set — are rejected by the service before the engine
//! runs.

mod bands;
mod rules;

pub use bands::Banding;
pub use rules::ScoreBreakdown;

use super::domain::{AnswerSet, AssessmentQuestion, AssessmentType};

/// Stateless scorer applying weighted accumulation and category banding.
pub struct ScoringEngine;

/// Scoring output carried through to persistence and the API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOutcome {
    pub final_score: f64,
    pub interpretation: String,
    pub recommendations: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoringOutcome {
    /// Wire representation of the score, always two decimals.
    pub fn formatted_score(&self) -> String {
        format!("{:.2}", self.final_score)
    }
}

impl ScoringEngine {
    pub fn score(
        &self,
        assessment: &AssessmentType,
        questions: &[AssessmentQuestion],
        answers: &AnswerSet,
    ) -> ScoringOutcome {
        let breakdown = rules::score_answers(questions, answers);
        let banding = bands::interpret(assessment.category, breakdown.final_score);

        ScoringOutcome {
            final_score: breakdown.final_score,
            interpretation: banding.interpretation,
            recommendations: banding.recommendations,
            breakdown,
        }
    }
}
