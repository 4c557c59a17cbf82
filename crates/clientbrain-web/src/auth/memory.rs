//! In-process auth provider for local development and tests.
//!
//! Accounts and sessions live in memory and vanish on restart. Passwords
//! are kept in plain text, so never point real users at this provider.

use std::collections::HashMap;

use async_trait::async_trait;
use clientbrain_common::{new_id, SessionToken};
use tokio::sync::RwLock;
use tracing::debug;

use super::{AuthError, AuthProvider, AuthSession, User};

/// Minimum password length, matching the hosted provider's default.
pub const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user: User,
    password: String,
}

/// Auth provider backed by two in-memory maps.
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<SessionToken, String>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Seed an account.
    pub fn with_user(mut self, email: &str, password: &str) -> Self {
        let key = normalize(email);
        self.accounts.get_mut().insert(
            key.clone(),
            Account {
                user: User { id: new_id(), email: key },
                password: password.to_string(),
            },
        );
        self
    }

    /// Number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn open_session(&self, user: User) -> AuthSession {
        let token = SessionToken::generate();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.email.clone());
        AuthSession {
            access_token: token,
            user,
        }
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = {
            let accounts = self.accounts.read().await;
            match accounts.get(&normalize(email)) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthError::rejected("Invalid login credentials")),
            }
        };
        debug!(user_id = %user.id, "memory sign-in");
        Ok(self.open_session(user).await)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>, AuthError> {
        let key = normalize(email);
        if !key.contains('@') {
            return Err(AuthError::rejected("Unable to validate email address: invalid format"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::rejected(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters."
            )));
        }

        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AuthError::rejected("User already registered"));
            }
            let user = User {
                id: new_id(),
                email: key.clone(),
            };
            accounts.insert(
                key,
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };
        debug!(user_id = %user.id, "memory sign-up");
        Ok(Some(self.open_session(user).await))
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn get_user(&self, token: &SessionToken) -> Result<Option<User>, AuthError> {
        let email = match self.sessions.read().await.get(token) {
            Some(email) => email.clone(),
            None => return Ok(None),
        };
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&email).map(|a| a.user.clone()))
    }
}

// =============================================================================
// Tests
// =============================================================================
