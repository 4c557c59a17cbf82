//! Outbound email.
//!
//! The site sends exactly one kind of message: a notification to the
//! operator whenever someone joins the waitlist.

mod log;
mod resend;

pub use self::log::LogMailer;
pub use self::resend::ResendMailer;

use async_trait::async_trait;
use clientbrain_common::ClientBrainError;
use clientbrain_config::schema::EmailConfig;
use serde::Serialize;

/// A single HTML email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("email provider not configured: {0}")]
    NotConfigured(String),
}

impl From<EmailError> for ClientBrainError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Network(e) => Self::Network(e),
            other => Self::Email(other.to_string()),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The operator notification for a new waitlist signup.
pub fn waitlist_notification(config: &EmailConfig, email: &str) -> EmailMessage {
    let escaped = escape_html(email);
    let html = format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto; padding: 32px;">
  <h2 style="color: #111;">New Waitlist Signup</h2>
  <p style="font-size: 16px; color: #333;">Someone just joined the ClientBrain waitlist:</p>
  <p style="font-size: 18px; font-weight: 600; color: #4F8EF7;">{escaped}</p>
  <hr style="border: none; border-top: 1px solid #eee; margin: 24px 0;" />
  <p style="font-size: 13px; color: #999;">This is an automated notification from your ClientBrain landing page.</p>
</div>"#
    );
    EmailMessage {
        from: config.from.clone(),
        to: config.notify_address.clone(),
        subject: format!("New Waitlist Signup: {email}"),
        html,
    }
}

// =============================================================================
// Tests
// =============================================================================
