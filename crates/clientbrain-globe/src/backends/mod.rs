//! Concrete drawing surfaces.
//!
//! - [`RecordingCanvas`]: logs every draw call, for tests and benches
//! - [`RasterCanvas`]: software rasterizer onto an RGBA image, for stills

mod raster;
mod recording;

pub use raster::{render_still, RasterCanvas};
pub use recording::{CommandCounter, CommandLog, DrawCommand, RecordingCanvas};
