//! Shared application state handed to every route.

use std::convert::Infallible;
use std::sync::Arc;

use clientbrain_common::ClientBrainError;
use clientbrain_config::schema::{AuthProviderKind, EmailProviderKind};
use clientbrain_config::ClientBrainConfig;
use clientbrain_globe::GlobeParams;
use tracing::{info, warn};
use warp::Filter;

use crate::auth::{AuthProvider, MemoryAuth, SupabaseAuth};
use crate::email::{LogMailer, Mailer, ResendMailer};

/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthProvider>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<ClientBrainConfig>,
    pub globe: Arc<GlobeParams>,
}

impl AppState {
    pub fn new(config: ClientBrainConfig, auth: Arc<dyn AuthProvider>, mailer: Arc<dyn Mailer>) -> Self {
        let globe = GlobeParams::from_config(&config.globe);
        Self {
            auth,
            mailer,
            config: Arc::new(config),
            globe: Arc::new(globe),
        }
    }

    /// Build providers from config. Fails if a hosted provider is selected
    /// but its URL or key is missing.
    pub fn from_config(config: ClientBrainConfig) -> Result<Self, ClientBrainError> {
        let auth: Arc<dyn AuthProvider> = match config.auth.provider {
            AuthProviderKind::Supabase => {
                info!(url = %config.auth.url, "using supabase auth");
                Arc::new(SupabaseAuth::new(config.auth.url.as_str(), config.auth.anon_key.as_str())?)
            }
            AuthProviderKind::Memory => {
                warn!("using in-memory auth; accounts are lost on restart");
                Arc::new(MemoryAuth::new())
            }
        };

        let mailer: Arc<dyn Mailer> = match config.email.provider {
            EmailProviderKind::Resend => {
                info!("using resend mailer");
                Arc::new(ResendMailer::new(config.email.api_url.as_str(), config.email.api_key.as_str())?)
            }
            EmailProviderKind::Log => {
                warn!("using log mailer; waitlist notifications are not delivered");
                Arc::new(LogMailer::new())
            }
        };

        Ok(Self::new(config, auth, mailer))
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.auth.session_cookie
    }
}

/// Inject the state into a filter chain.
pub fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build_local_providers() {
        let state = AppState::from_config(ClientBrainConfig::default()).unwrap();
        assert_eq!(state.cookie_name(), "cb-session");
        assert_eq!(state.globe.point_count, 220);
    }

    #[test]
    fn supabase_without_key_fails() {
        let mut config = ClientBrainConfig::default();
        config.auth.provider = AuthProviderKind::Supabase;
        config.auth.url = "https://x.supabase.co".into();
        assert!(matches!(AppState::from_config(config), Err(ClientBrainError::Auth(_))));
    }

    #[test]
    fn resend_without_key_fails() {
        let mut config = ClientBrainConfig::default();
        config.email.provider = EmailProviderKind::Resend;
        assert!(matches!(AppState::from_config(config), Err(ClientBrainError::Email(_))));
    }
}
