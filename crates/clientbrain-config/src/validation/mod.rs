//! Full configuration validation.
//!
//! Validates numeric ranges, color formats, and provider prerequisites.
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod globe;
mod helpers;
mod site;


use crate::schema::ClientBrainConfig;
use clientbrain_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ClientBrainConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    globe::validate_globe(&mut errors, config);
    site::validate_server(&mut errors, config);
    site::validate_auth(&mut errors, config);
    site::validate_email(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
