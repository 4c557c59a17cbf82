//! Web site configuration: listener, auth provider and email delivery.

use serde::{Deserialize, Serialize};

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Which auth backend the site talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    /// Hosted Supabase project (GoTrue REST API).
    Supabase,
    /// In-process accounts, lost on restart. For local development.
    #[default]
    Memory,
}

/// Authentication settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub provider: AuthProviderKind,
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Publishable (anon) key. Read from `SUPABASE_ANON_KEY`.
    #[serde(skip_serializing)]
    pub anon_key: String,
    /// Name of the cookie carrying the access token.
    pub session_cookie: String,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProviderKind::Memory,
            url: String::new(),
            anon_key: String::new(),
            session_cookie: "cb-session".into(),
            secure_cookie: false,
        }
    }
}

/// Which transactional-email backend delivers notifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProviderKind {
    Resend,
    /// Write messages to the log instead of sending them.
    #[default]
    Log,
}

/// Email delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub provider: EmailProviderKind,
    pub api_url: String,
    /// Read from `RESEND_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Sender shown on waitlist notifications.
    pub from: String,
    /// Operator address that receives waitlist notifications.
    pub notify_address: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProviderKind::Log,
            api_url: "https://api.resend.com/emails".into(),
            api_key: String::new(),
            from: "ClientBrain Waitlist <onboarding@resend.dev>".into(),
            notify_address: "team@clientbrain.app".into(),
        }
    }
}
