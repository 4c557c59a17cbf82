//! ClientBrain configuration system.
//!
//! TOML-based configuration for the globe renderer and the web site.
//! All sections use serde defaults so partial configs work out of the box;
//! secrets are read from the environment rather than the file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use clientbrain_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ClientBrainConfig, CONFIG_SCHEMA_VERSION};

use clientbrain_common::ConfigError;

/// Load config from the platform default path.
///
/// Creates a default `clientbrain.toml` if none exists, applies
/// environment overrides, and validates the result.
pub fn load_config() -> Result<ClientBrainConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
///
/// Secret fields are skipped by the schema and never appear.
pub fn config_to_json(config: &ClientBrainConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = ClientBrainConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"globe\""));
        assert!(json.contains("\"server\""));
        assert!(json.contains("\"auth\""));
        assert!(json.contains("\"email\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_to_json_omits_secrets() {
        let mut config = ClientBrainConfig::default();
        config.auth.anon_key = "anon-123".into();
        config.email.api_key = "re_456".into();
        let json = config_to_json(&config);
        assert!(!json.contains("anon-123"));
        assert!(!json.contains("re_456"));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = ClientBrainConfig::default();
        let json = config_to_json(&config);
        let parsed: ClientBrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.globe.point_count, 220);
        assert_eq!(parsed.server.port, 3000);
        assert_eq!(parsed.auth.session_cookie, "cb-session");
    }
}
