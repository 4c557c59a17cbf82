//! The two draw passes of a frame: proximity lines, then depth-sorted dots.

mod connections;
mod points;

pub use connections::{find_connections, Connection};
pub use points::{dots, paint_order, Dot};
