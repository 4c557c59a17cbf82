//! Types shared by every ClientBrain crate: error enums, colors and ids.

pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ClientBrainError, ConfigError};
pub use id::{new_correlation_id, new_id, SessionToken};
pub use types::Color;

pub type Result<T> = std::result::Result<T, ClientBrainError>;
