//! Mailer that only logs, for local development.

use async_trait::async_trait;
use tracing::info;

use super::{EmailError, EmailMessage, Mailer};

/// Logs each message instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            bytes = message.html.len(),
            "email (not sent, log mailer)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_always_succeeds() {
        let mailer = LogMailer::new();
        let msg = EmailMessage {
            from: "a@x.io".into(),
            to: "b@x.io".into(),
            subject: "hi".into(),
            html: "<p>hi</p>".into(),
        };
        for _ in 0..3 {
            assert!(mailer.send(msg.clone()).await.is_ok());
        }
    }
}
