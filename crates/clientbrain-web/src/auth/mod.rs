//! Authentication providers.
//!
//! The site only needs four operations from an identity service: password
//! sign-in, sign-up, sign-out and "who owns this token". Any provider error
//! carries a human-readable message that the login and signup pages show
//! verbatim.

mod memory;
mod supabase;

pub use memory::MemoryAuth;
pub use supabase::SupabaseAuth;

use async_trait::async_trait;
use clientbrain_common::{ClientBrainError, SessionToken};
use serde::{Deserialize, Serialize};

/// A signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: SessionToken,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The provider refused the request (bad credentials, duplicate account).
    #[error("{message}")]
    Rejected { message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("auth provider not configured: {0}")]
    NotConfigured(String),
}

impl AuthError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Message suitable for showing on a form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            _ => "Authentication service unavailable. Please try again.".to_string(),
        }
    }
}

impl From<AuthError> for ClientBrainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Network(e) => Self::Network(e),
            other => Self::Auth(other.to_string()),
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Password sign-in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Create an account. Returns a session when the provider signs the
    /// new user in immediately, `None` when it waits for email confirmation.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>, AuthError>;

    /// Revoke a session token.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError>;

    /// The user a token belongs to, or `None` if it is unknown or expired.
    async fn get_user(&self, token: &SessionToken) -> Result<Option<User>, AuthError>;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let err = AuthError::rejected("Invalid login credentials");
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.user_message(), "Invalid login credentials");
    }

    #[test]
    fn transport_errors_are_not_leaked() {
        let err = AuthError::Network("connection refused to 10.0.0.3".into());
        assert!(!err.user_message().contains("10.0.0.3"));
    }

    #[test]
    fn converts_to_workspace_error() {
        let err: ClientBrainError = AuthError::Network("timeout".into()).into();
        assert!(matches!(err, ClientBrainError::Network(_)));
        let err: ClientBrainError = AuthError::rejected("nope").into();
        assert_eq!(err.to_string(), "auth error: nope");
    }
}
