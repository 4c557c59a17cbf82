//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clientbrain_config::schema::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "clientbrain", version, about = "ClientBrain site and globe renderer")]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log level.
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<Level>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web server (default).
    Serve {
        /// Override `server.port`.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write PNG frames of the globe animation.
    Render {
        /// Output directory, created if missing.
        #[arg(short, long, default_value = "frames")]
        out: PathBuf,

        /// Number of consecutive frames to write.
        #[arg(short, long, default_value_t = 1)]
        frames: u64,

        /// Image edge in pixels (defaults to `globe.still_size`).
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Time frame rendering headlessly.
    Bench {
        #[arg(short, long, default_value_t = 600)]
        frames: u64,

        /// Viewport edge in CSS pixels.
        #[arg(short, long, default_value_t = 520)]
        size: u32,

        /// Rasterize into an image instead of only counting draw calls.
        #[arg(long)]
        raster: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}
