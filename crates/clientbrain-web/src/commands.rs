//! The three things the binary can do: serve, render stills, benchmark.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clientbrain_common::ClientBrainError;
use clientbrain_config::ClientBrainConfig;
use clientbrain_globe::backends::CommandCounter;
use clientbrain_globe::surface::backing_pixels;
use clientbrain_globe::{
    render_still, BoxSize, Canvas, Context2d, FrameTimer, GlobeParams, GlobeRenderer, PointerOffset,
    RasterCanvas, RotationState, Viewport,
};
use tracing::{info, warn};

use crate::routes::routes;
use crate::state::AppState;

/// Run the web server until Ctrl-C.
pub async fn serve(config: ClientBrainConfig, port: Option<u16>) -> Result<(), ClientBrainError> {
    let port = port.unwrap_or(config.server.port);
    let host = config.server.host.clone();
    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await?
        .next()
        .ok_or_else(|| ClientBrainError::Network(format!("cannot resolve {host}:{port}")))?;

    let state = AppState::from_config(config)?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c; stop the process to exit");
            std::future::pending::<()>().await;
        }
    };
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| ClientBrainError::Network(format!("failed to bind {addr}: {e}")))?;

    info!("clientbrain listening on http://{bound}");
    server.await;
    info!("server stopped");
    Ok(())
}

/// Write `frames` consecutive animation frames as PNGs into `out`.
pub fn render(
    config: &ClientBrainConfig,
    out: &Path,
    frames: u64,
    size: Option<u32>,
) -> Result<Vec<PathBuf>, ClientBrainError> {
    let params = GlobeParams::from_config(&config.globe);
    let size = size.unwrap_or(config.globe.still_size);
    std::fs::create_dir_all(out)?;

    let mut written = Vec::new();
    for frame in 0..frames {
        let path = out.join(format!("globe-{frame:04}.png"));
        render_still(&params, size, frame).save_png(&path)?;
        written.push(path);
    }
    info!(frames, size, dir = %out.display(), "globe frames written");
    Ok(written)
}

/// Timing summary of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub frames: u64,
    pub fps: f64,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p99_ms: f64,
    pub lines_per_frame: f64,
    pub dots_per_frame: f64,
}

impl std::fmt::Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames: {:.1} fps, mean {:.3} ms, p50 {:.3} ms, p99 {:.3} ms, {:.1} lines and {:.1} dots per frame",
            self.frames, self.fps, self.mean_ms, self.p50_ms, self.p99_ms, self.lines_per_frame, self.dots_per_frame
        )
    }
}

/// Most frame samples a benchmark keeps for its percentiles.
const MAX_BENCH_WINDOW: usize = 100_000;

/// Timer window for a run of `frames`: every frame, up to [`MAX_BENCH_WINDOW`].
fn bench_window(frames: u64) -> usize {
    usize::try_from(frames).map_or(MAX_BENCH_WINDOW, |n| n.clamp(1, MAX_BENCH_WINDOW))
}

/// Render `frames` frames headlessly and time each one.
///
/// By default draw calls are only counted, which measures geometry and the
/// two passes. With `raster` each frame is also rasterized.
pub fn bench(config: &ClientBrainConfig, frames: u64, size: u32, raster: bool) -> BenchReport {
    let params = GlobeParams::from_config(&config.globe);
    let renderer = GlobeRenderer::new(params);
    let edge = size as f64;
    let viewport = Viewport::new(edge);

    let mut counter = CommandCounter::default();
    let mut canvas = RasterCanvas::new(BoxSize::square(edge));
    canvas.set_backing_size(backing_pixels(edge, 1.0), backing_pixels(edge, 1.0));

    let mut rotation = RotationState::default();
    let mut timer = FrameTimer::with_window(bench_window(frames));
    let (mut lines, mut dots) = (0u64, 0u64);

    for _ in 0..frames {
        let ctx: &mut dyn Context2d = if raster { &mut canvas } else { &mut counter };
        let start = Instant::now();
        let stats = renderer.render_frame(ctx, &mut rotation, PointerOffset::CENTER, viewport);
        timer.record(start.elapsed());
        lines += stats.connections as u64;
        dots += stats.dots as u64;
    }

    let per_frame = |n: u64| if frames == 0 { 0.0 } else { n as f64 / frames as f64 };
    let report = BenchReport {
        frames,
        fps: timer.fps(),
        mean_ms: timer.frame_time_ms(),
        p50_ms: timer.percentile_ms(0.5),
        p99_ms: timer.percentile_ms(0.99),
        lines_per_frame: per_frame(lines),
        dots_per_frame: per_frame(dots),
    };
    info!(frames, raster, fps = report.fps, "bench finished");
    report
}

// =============================================================================
// Tests
// =============================================================================
