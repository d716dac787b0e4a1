use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::domain::{Credentials, Registration, UserAccount, UserId, UserProfile};
use super::repository::UserRepository;
use crate::auth::{password, AuthError, TokenIssuer};
use crate::storage::StorageError;

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:06}"))
}

/// Issued on successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Service composing credential checks, the account repository, and token
/// issuance.
pub struct AccountService<R> {
    repository: Arc<R>,
    tokens: TokenIssuer,
}

impl<R> AccountService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repository: Arc<R>, tokens: TokenIssuer) -> Self {
        Self { repository, tokens }
    }

    /// Register a new account and issue a session token for it.
    pub fn register(&self, registration: Registration) -> Result<AuthSession, AccountServiceError> {
        let username = registration.username.trim().to_string();
        let email = registration.email.trim().to_string();
        let password = registration.password;

        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountServiceError::MissingFields);
        }
        if username.chars().count() < 3 {
            return Err(AccountServiceError::UsernameTooShort);
        }
        if !is_plausible_email(&email) {
            return Err(AccountServiceError::InvalidEmail);
        }
        if password.chars().count() < 6 {
            return Err(AccountServiceError::PasswordTooShort);
        }

        if self.repository.find_by_email(&email)?.is_some() {
            return Err(AccountServiceError::EmailInUse);
        }

        let account = UserAccount {
            user_id: next_user_id(),
            username,
            email,
            password_hash: password::hash_password(&password)?,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(account).map_err(|err| match err {
            StorageError::Conflict => AccountServiceError::EmailInUse,
            other => AccountServiceError::Storage(other),
        })?;

        self.session_for(&stored)
    }

    /// Check credentials and issue a session token.
    pub fn login(&self, credentials: Credentials) -> Result<AuthSession, AccountServiceError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AccountServiceError::MissingFields);
        }

        let account = self
            .repository
            .find_by_email(email)?
            .ok_or(AccountServiceError::InvalidCredentials)?;

        if !password::verify_password(&credentials.password, &account.password_hash)? {
            return Err(AccountServiceError::InvalidCredentials);
        }

        self.session_for(&account)
    }

    /// Fetch the profile for an authenticated user.
    pub fn profile(&self, user_id: &UserId) -> Result<UserProfile, AccountServiceError> {
        let account = self
            .repository
            .find_by_id(user_id)?
            .ok_or(AccountServiceError::UnknownUser)?;
        Ok(UserProfile::from(&account))
    }

    fn session_for(&self, account: &UserAccount) -> Result<AuthSession, AccountServiceError> {
        let token = self.tokens.issue(&account.user_id, &account.username)?;
        Ok(AuthSession {
            token,
            user: UserProfile::from(account),
        })
    }
}

/// Cheap shape check; full RFC validation is not the goal, catching typoed
/// addresses at registration time is.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error("Please provide all required fields")]
    MissingFields,
    #[error("Username must be at least 3 characters")]
    UsernameTooShort,
    #[error("Please provide a valid email")]
    InvalidEmail,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Email already in use")]
    EmailInUse,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UnknownUser,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
