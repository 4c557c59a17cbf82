//! Supabase (GoTrue) auth client.
//!
//! Talks to the project's `/auth/v1` REST endpoints with the publishable
//! anon key in the `apikey` header. The user's access token doubles as the
//! site's session token.

use std::fmt;

use async_trait::async_trait;
use clientbrain_common::SessionToken;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{AuthError, AuthProvider, AuthSession, User};

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<GoTrueUser> for User {
    fn from(u: GoTrueUser) -> Self {
        User {
            id: u.id,
            email: u.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    user: GoTrueUser,
}

/// Sign-up returns a session when auto-confirm is on, a bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

/// Supabase auth provider.
pub struct SupabaseAuth {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
}

impl fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

impl SupabaseAuth {
    /// Client for the project at `url` (e.g. `https://xyz.supabase.co`).
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, AuthError> {
        let base_url = url.into().trim_end_matches('/').to_string();
        let anon_key = anon_key.into();
        if base_url.is_empty() {
            return Err(AuthError::NotConfigured("auth.url is empty".into()));
        }
        if anon_key.is_empty() {
            return Err(AuthError::NotConfigured("SUPABASE_ANON_KEY is not set".into()));
        }
        Ok(Self {
            base_url,
            anon_key,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(self.endpoint(path))
            .header("apikey", &self.anon_key)
            .header("content-type", "application/json")
    }

    /// Turn a non-2xx response into an error carrying GoTrue's message.
    async fn rejection(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| format!("Request failed ({status})"));
        if status.is_server_error() {
            warn!(%status, "supabase auth server error");
        }
        AuthError::Rejected { message }
    }
}

/// Pull the human-readable message out of a GoTrue error body. Newer
/// servers use `msg`, older ones `error_description`.
fn error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn credentials(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        debug!("supabase sign-in request");
        let response = self
            .post("token?grant_type=password")
            .json(&credentials(email, password))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let session: GoTrueSession = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(AuthSession {
            access_token: SessionToken::new(session.access_token),
            user: session.user.into(),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthSession>, AuthError> {
        debug!("supabase sign-up request");
        let response = self
            .post("signup")
            .json(&credentials(email, password))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let parsed: SignUpResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(match parsed {
            SignUpResponse::Session(s) => Some(AuthSession {
                access_token: SessionToken::new(s.access_token),
                user: s.user.into(),
            }),
            SignUpResponse::User(u) => {
                debug!(user_id = %u.id, "sign-up awaiting email confirmation");
                None
            }
        })
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthError> {
        let response = self
            .post("logout")
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        // An already-expired token is as good as signed out.
        if status.is_success() || status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(Self::rejection(response).await)
    }

    async fn get_user(&self, token: &SessionToken) -> Result<Option<User>, AuthError> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::rejection(response).await);
        }

        let user: GoTrueUser = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;
        Ok(Some(user.into()))
    }
}

// =============================================================================
// Tests
// =============================================================================
