//! Sphere geometry: lattice generation, rotation, and projection.
//!
//! The base point set is generated once and never mutated; every frame
//! rotates transient copies and projects them to screen space.

mod lattice;
mod projection;
mod rotation;
mod types;

pub use lattice::*;
pub use projection::*;
pub use rotation::*;
pub use types::*;
