//! Scored psychological questionnaires: catalog, weighted scoring,
//! interpretation bands, and append-only submission history.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::standard_catalog;
pub use domain::{
    AnswerScoring, AnswerSet, AssessmentAnswer, AssessmentCategory, AssessmentId,
    AssessmentQuestion, AssessmentResult, AssessmentType, AssessmentTypeId, ChoiceOption,
    QuestionId,
};
pub use repository::AssessmentRepository;
pub use router::assessment_router;
pub use scoring::{Banding, ScoreBreakdown, ScoringEngine, ScoringOutcome};
pub use service::{
    AssessmentService, AssessmentServiceError, HistoryView, QuestionView, SubmissionRequest,
    SubmissionView,
};
