//! Configuration schema types for ClientBrain.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults that reproduce the production
//! landing page.

mod globe;
mod server;
mod system;

pub use globe::*;
pub use server::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for ClientBrain.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientBrainConfig {
    pub globe: GlobeConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_globe_matches_landing_page() {
        let config = ClientBrainConfig::default();
        let g = &config.globe;
        assert_eq!(g.point_count, 220);
        assert!((g.idle_yaw_step - 0.004).abs() < 1e-12);
        assert!((g.yaw_sensitivity - 0.55).abs() < 1e-12);
        assert!((g.pitch_sensitivity - 0.35).abs() < 1e-12);
        assert!((g.radius_fraction - 0.37).abs() < 1e-12);
        assert!((g.connection_distance - 0.55).abs() < 1e-12);
        assert!((g.connection_depth_cutoff - (-0.05)).abs() < 1e-12);
        assert!((g.point_depth_cutoff - (-0.4)).abs() < 1e-12);
        assert_eq!(g.line_color, "#4F8EF7");
        assert_eq!(g.core_color, "#A0D2FF");
        assert_eq!(g.connection_strategy, ConnectionStrategy::BruteForce);
    }

    #[test]
    fn default_server_and_providers() {
        let config = ClientBrainConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.provider, AuthProviderKind::Memory);
        assert_eq!(config.email.provider, EmailProviderKind::Log);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ClientBrainConfig = toml::from_str(
            r#"
[globe]
point_count = 500
connection_strategy = "grid"

[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(config.globe.point_count, 500);
        assert_eq!(config.globe.connection_strategy, ConnectionStrategy::Grid);
        assert!((config.globe.radius_fraction - 0.37).abs() < 1e-12);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn provider_kinds_deserialize_lowercase() {
        let config: ClientBrainConfig = toml::from_str(
            r#"
[auth]
provider = "supabase"
url = "https://project.supabase.co"

[email]
provider = "resend"

[logging]
level = "debug"
"#,
        )
        .unwrap();
        assert_eq!(config.auth.provider, AuthProviderKind::Supabase);
        assert_eq!(config.email.provider, EmailProviderKind::Resend);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn secrets_are_not_serialized_to_toml() {
        let mut config = ClientBrainConfig::default();
        config.auth.anon_key = "anon".into();
        config.email.api_key = "key".into();
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("anon_key"));
        assert!(!text.contains("api_key"));
    }
}
