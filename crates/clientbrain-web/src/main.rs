//! clientbrain: the ClientBrain site, plus headless globe rendering.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use clientbrain_common::ConfigError;
use clientbrain_config::schema::LogLevel;
use clientbrain_config::{toml_loader, validation, ClientBrainConfig};
use clientbrain_web::cli::{Cli, Command};
use clientbrain_web::commands;

/// Read the config file, then overlay secrets from the environment.
///
/// Validation problems are logged by the loader and do not stop startup.
fn load_config(path: Option<&Path>) -> Result<ClientBrainConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    toml_loader::apply_env_overrides(&mut config);
    Ok(config)
}

fn init_tracing(level: LogLevel) {
    let level = level.as_directive();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "clientbrain={level},clientbrain_web={level},clientbrain_globe={level},clientbrain_config={level},warp=warn"
                )
                .into()
            }),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("clientbrain: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.log_level.map(Into::into).unwrap_or(config.logging.level));
    if let Err(e) = validation::validate(&config) {
        tracing::warn!("{e}");
    }

    let result = match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => commands::serve(config, port).await,
        Command::Render { out, frames, size } => commands::render(&config, &out, frames, size).map(|paths| {
            for path in paths {
                println!("{}", path.display());
            }
        }),
        Command::Bench { frames, size, raster } => {
            println!("{}", commands::bench(&config, frames, size, raster));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
