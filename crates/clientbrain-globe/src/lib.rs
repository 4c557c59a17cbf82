//! Point-sphere ("globe") renderer.
//!
//! A rotating cloud of points on a unit sphere, laid out with a spherical
//! Fibonacci lattice, projected orthographically onto a 2-D surface, with
//! proximity lines between nearby front-facing points and a glow per dot.
//!
//! The crate is split the same way a frame flows:
//! - [`sphere`]: lattice generation, rotation, projection
//! - [`passes`]: the connection pass and the depth-sorted point pass
//! - [`renderer`]: sequences one frame of draw calls onto a [`Context2d`]
//! - [`host`]: mounting onto a host environment (frame scheduler, resize
//!   observer, pointer events) with deterministic teardown
//! - [`backends`]: a recording surface and a software rasterizer

pub mod backends;
pub mod host;
pub mod params;
pub mod passes;
pub mod perf;
pub mod renderer;
pub mod sphere;
pub mod surface;

pub use backends::{render_still, CommandLog, DrawCommand, RasterCanvas, RecordingCanvas};
pub use host::{mount, Host, ManualHost, MountedGlobe};
pub use params::GlobeParams;
pub use perf::FrameTimer;
pub use renderer::{FrameStats, GlobeRenderer};
pub use sphere::{Point, PointerOffset, ProjectedPoint, RotationState, Viewport};
pub use surface::{BoxSize, Canvas, Context2d, Fill, Rgba, Vec2};

/// Errors produced outside the frame loop (encoding stills, writing files).
///
/// Drawing itself never fails: a missing context is a silent no-op.
#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<GlobeError> for clientbrain_common::ClientBrainError {
    fn from(err: GlobeError) -> Self {
        match err {
            GlobeError::Io(e) => Self::Io(e),
            other => Self::Renderer(other.to_string()),
        }
    }
}
