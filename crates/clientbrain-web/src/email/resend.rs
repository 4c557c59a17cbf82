//! Resend HTTP API mailer.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use super::{EmailError, EmailMessage, Mailer};

/// Sends mail through `POST {api_url}` with a bearer API key.
pub struct ResendMailer {
    api_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResendMailer")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ResendMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, EmailError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(EmailError::NotConfigured("RESEND_API_KEY is not set".into()));
        }
        Ok(Self {
            api_url: api_url.into(),
            api_key,
            http: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        debug!(to = %message.to, "resend API request");

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EmailError::Api(format!("HTTP {status}: {text}")));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
