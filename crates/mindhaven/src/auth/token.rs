//! JWT issuance and verification.
//!
//! Tokens are signed with HS256; expiry defaults to 24 hours and is
//! configured through [`AuthConfig`].

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::AuthError;
use crate::config::AuthConfig;
use crate::users::domain::UserId;

/// Payload carried by an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp).
    pub iat: u64,
    /// Expiration time (Unix timestamp).
    pub exp: u64,
}

/// Signs and verifies bearer tokens. Cheap to clone; shared across handlers
/// through an axum `Extension`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl_seconds: u64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(config.jwt_secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(config.jwt_secret.as_bytes())),
            ttl_seconds: config.token_ttl_hours * 3600,
        }
    }

    pub fn issue(&self, user_id: &UserId, username: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| AuthError::Clock(err.to_string()))?
            .as_secs();

        let claims = Claims {
            sub: user_id.0.clone(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AuthError::Sign(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: "unit-test-secret-with-enough-length!".to_string(),
            token_ttl_hours: 1,
        })
    }

    #[test]
    fn issued_tokens_verify() {
        let issuer = issuer();
        let token = issuer
            .issue(&UserId("user-000001".to_string()), "casey")
            .expect("token issues");

        let claims = issuer.verify(&token).expect("token verifies");
        assert_eq!(claims.sub, "user-000001");
        assert_eq!(claims.username, "casey");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let token = issuer()
            .issue(&UserId("user-000001".to_string()), "casey")
            .expect("token issues");

        let other = TokenIssuer::new(&AuthConfig {
            jwt_secret: "a-completely-different-signing-secret".to_string(),
            token_ttl_hours: 1,
        });
        assert!(matches!(
            other.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            issuer().verify("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
