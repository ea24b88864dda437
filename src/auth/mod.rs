//! Identity verification.
//!
//! Bearer credentials are ID tokens minted by the external identity
//! provider. The rest of the service only needs one answer from them: which
//! user is calling. `IdentityVerifier` is that seam.

pub mod jwt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use jwt::JwtIdentityVerifier;

/// Claims carried by a provider ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Stable user identifier.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    pub fn new(uid: impl Into<String>, email: Option<String>, ttl: chrono::Duration) -> Self {
        let now = chrono::Utc::now();
        Self {
            sub: uid.into(),
            user_id: None,
            email,
            aud: None,
            iss: None,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// `sub`, or the provider's `user_id` claim when `sub` is blank.
    pub fn uid(&self) -> Option<&str> {
        if !self.sub.trim().is_empty() {
            return Some(&self.sub);
        }
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// Caller identity established by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Authorization header is required")]
    MissingCredentials,

    #[error("Invalid authorization header format")]
    MalformedCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has no subject")]
    MissingSubject,

    #[error("Identity provider misconfigured: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;
}
