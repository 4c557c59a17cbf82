//! Where `clientbrain.toml` lives and how a fresh one is written.

use clientbrain_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_config_toml;

/// Directory under the platform config dir holding the site config.
const APP_DIR: &str = "clientbrain";

/// File name of the site config.
const CONFIG_FILE_NAME: &str = "clientbrain.toml";

/// `<config dir>/clientbrain/clientbrain.toml`, e.g.
/// `~/.config/clientbrain/clientbrain.toml` on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory for clientbrain.toml".into()))
}

/// Write the commented template to `path`, creating parent directories.
///
/// Every key in the template is commented out, so the written file loads
/// to the built-in defaults until the operator edits it.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, at: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", at.display()))
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err("create config directory", dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_err("write", path, e))?;

    info!(path = %path.display(), "wrote default clientbrain.toml");
    Ok(())
}
