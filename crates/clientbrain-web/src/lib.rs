//! ClientBrain web service.
//!
//! Landing page with the globe and the waitlist endpoint, password auth
//! against a pluggable provider, and a guarded dashboard. The `clientbrain`
//! binary wraps this with a CLI that also renders and benchmarks the globe
//! headlessly.

pub mod auth;
pub mod cli;
pub mod commands;
pub mod email;
pub mod guard;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::routes;
pub use state::AppState;
