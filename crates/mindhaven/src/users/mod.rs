//! Account registration, login, and profile lookup.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Credentials, Registration, UserAccount, UserId, UserProfile};
pub use repository::UserRepository;
pub use router::auth_router;
pub use service::{AccountService, AccountServiceError, AuthSession};
