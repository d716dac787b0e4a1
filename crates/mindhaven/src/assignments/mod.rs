//! Therapy assignments: CRUD plus a fixed reflection questionnaire whose
//! responses are stored verbatim (never scored).

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Assignment, AssignmentDraft, AssignmentId, AssignmentQuestion, AssignmentResponse,
};
pub use repository::AssignmentRepository;
pub use router::assignment_router;
pub use service::{AssignmentService, AssignmentServiceError};
