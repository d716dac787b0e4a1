//! Stateless bearer-token authentication.
//!
//! Tokens are HS256-signed JWTs carrying the user id and username; password
//! storage uses argon2id PHC strings. Handlers receive the verified
//! identity through the [`AuthenticatedUser`] extractor.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::AuthenticatedUser;
pub use token::{Claims, TokenIssuer};

/// Error raised by the credential and token helpers.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to hash password: {0}")]
    Hash(String),
    #[error("invalid password hash format: {0}")]
    MalformedHash(String),
    #[error("failed to sign token: {0}")]
    Sign(String),
    #[error("invalid token")]
    InvalidToken,
    #[error("system clock error: {0}")]
    Clock(String),
}
