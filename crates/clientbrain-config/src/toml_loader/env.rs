//! Environment overrides for values that must not live in the config file.

use crate::schema::ClientBrainConfig;
use tracing::debug;

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut ClientBrainConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup.
///
/// Recognized keys: `SUPABASE_URL`, `SUPABASE_ANON_KEY`, `RESEND_API_KEY`,
/// `CLIENTBRAIN_PORT`. Empty values are ignored.
pub fn apply_overrides_from<F>(config: &mut ClientBrainConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = get("SUPABASE_URL") {
        debug!("auth.url overridden from environment");
        config.auth.url = url;
    }
    if let Some(key) = get("SUPABASE_ANON_KEY") {
        config.auth.anon_key = key;
    }
    if let Some(key) = get("RESEND_API_KEY") {
        config.email.api_key = key;
    }
    if let Some(port) = get("CLIENTBRAIN_PORT") {
        match port.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => tracing::warn!("ignoring invalid CLIENTBRAIN_PORT '{port}'"),
        }
    }
}
