//! Frame sequencing for the globe.
//!
//! One call to [`GlobeRenderer::render_frame`] clears the square, steps the
//! rotation, projects the lattice and issues the line and dot draw calls.
//! The renderer holds no per-instance animation state: rotation and pointer
//! are passed in, so any number of globes can share one renderer.

use crate::params::GlobeParams;
use crate::passes::{dots, find_connections};
use crate::sphere::{fibonacci_sphere, project, Point, PointerOffset, ProjectedPoint, RotationState, Viewport};
use crate::surface::{Context2d, Fill, Rgba, Vec2};

/// What one frame drew.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Projected points; always the lattice size.
    pub projected: usize,
    pub connections: usize,
    pub dots: usize,
    pub size: f64,
    pub radius: f64,
    pub center: (f64, f64),
}

/// Draws the point sphere onto a 2-D context.
#[derive(Debug, Clone)]
pub struct GlobeRenderer {
    params: GlobeParams,
    points: Vec<Point>,
}

impl GlobeRenderer {
    /// Build the lattice once for the configured point count.
    pub fn new(params: GlobeParams) -> Self {
        let points = fibonacci_sphere(params.point_count);
        tracing::debug!(points = points.len(), "globe lattice generated");
        Self { params, points }
    }

    pub fn params(&self) -> &GlobeParams {
        &self.params
    }

    /// Base lattice, unrotated.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Project the lattice for a rotation without drawing.
    pub fn project(&self, rotation: &RotationState, viewport: Viewport) -> Vec<ProjectedPoint> {
        project(&self.points, rotation, viewport, self.params.radius_fraction)
    }

    /// Draw one frame and advance `rotation` by one idle step.
    pub fn render_frame(
        &self,
        ctx: &mut dyn Context2d,
        rotation: &mut RotationState,
        pointer: PointerOffset,
        viewport: Viewport,
    ) -> FrameStats {
        let p = &self.params;
        let size = viewport.size;
        ctx.clear_rect(0.0, 0.0, size, size);

        rotation.advance(p.idle_yaw_step);
        rotation.apply_pointer(pointer, p.yaw_sensitivity, p.pitch_sensitivity);

        let projected = self.project(rotation, viewport);
        let radius = viewport.radius(p.radius_fraction);

        let connections = find_connections(
            &projected,
            p.max_connection_distance(radius),
            p.connection_depth_cutoff,
            p.line_opacity,
            p.connection_strategy,
        );
        for c in &connections {
            let (a, b) = (&projected[c.a], &projected[c.b]);
            ctx.stroke_line(
                Vec2::new(a.sx, a.sy),
                Vec2::new(b.sx, b.sy),
                Rgba::new(p.line_color, c.alpha),
                p.line_width,
            );
        }

        let dots = dots(&projected, p);
        for d in &dots {
            ctx.fill_circle(
                d.center,
                d.glow_radius,
                Fill::Radial {
                    inner: Rgba::new(p.glow_color, d.glow_alpha),
                    outer: Rgba::transparent(p.glow_color),
                },
            );
            ctx.fill_circle(d.center, d.core_radius, Fill::Solid(Rgba::new(p.core_color, d.core_alpha)));
        }

        FrameStats {
            projected: projected.len(),
            connections: connections.len(),
            dots: dots.len(),
            size,
            radius,
            center: viewport.center(),
        }
    }
}

impl Default for GlobeRenderer {
    fn default() -> Self {
        Self::new(GlobeParams::default())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{DrawCommand, RecordingCanvas};
    use crate::surface::Canvas;
    use crate::BoxSize;

    fn draw(renderer: &GlobeRenderer, rotation: &mut RotationState, size: f64) -> (FrameStats, Vec<DrawCommand>) {
        let mut canvas = RecordingCanvas::new(BoxSize::square(size));
        let log = canvas.log();
        let ctx = canvas.context_2d().expect("recording canvas has a context");
        let stats = renderer.render_frame(ctx, rotation, PointerOffset::CENTER, Viewport::new(size));
        let commands = log.borrow().clone();
        (stats, commands)
    }

    #[test]
    fn frame_starts_with_clear() {
        let (_, commands) = draw(&GlobeRenderer::default(), &mut RotationState::default(), 520.0);
        assert_eq!(
            commands[0],
            DrawCommand::ClearRect { x: 0.0, y: 0.0, width: 520.0, height: 520.0 }
        );
    }

    #[test]
    fn lines_precede_dots_and_glow_precedes_core() {
        let (stats, commands) = draw(&GlobeRenderer::default(), &mut RotationState::default(), 520.0);
        let body = &commands[1..];
        let lines = body.iter().take_while(|c| matches!(c, DrawCommand::Line { .. })).count();
        assert_eq!(lines, stats.connections);

        let circles = &body[lines..];
        assert_eq!(circles.len(), stats.dots * 2);
        for pair in circles.chunks(2) {
            assert!(matches!(pair[0], DrawCommand::Circle { fill: Fill::Radial { .. }, .. }));
            assert!(matches!(pair[1], DrawCommand::Circle { fill: Fill::Solid(_), .. }));
        }
    }

    #[test]
    fn every_frame_projects_whole_lattice() {
        let renderer = GlobeRenderer::default();
        let mut rotation = RotationState::default();
        for _ in 0..5 {
            let (stats, _) = draw(&renderer, &mut rotation, 520.0);
            assert_eq!(stats.projected, 220);
        }
    }

    #[test]
    fn frozen_frames_repeat_exactly() {
        let renderer = GlobeRenderer::new(GlobeParams::default().frozen());
        let mut rotation = RotationState::default();
        let first = draw(&renderer, &mut rotation, 520.0).1;
        let second = draw(&renderer, &mut rotation, 520.0).1;
        assert_eq!(first, second);
        assert_eq!(rotation, RotationState::default());
    }

    #[test]
    fn idle_spin_advances_each_frame() {
        let renderer = GlobeRenderer::default();
        let mut rotation = RotationState::default();
        draw(&renderer, &mut rotation, 520.0);
        draw(&renderer, &mut rotation, 520.0);
        assert!((rotation.idle_yaw - 0.008).abs() < 1e-12);
    }

    #[test]
    fn radius_and_center_follow_viewport() {
        let renderer = GlobeRenderer::default();
        let (small, _) = draw(&renderer, &mut RotationState::default(), 200.0);
        let (large, _) = draw(&renderer, &mut RotationState::default(), 400.0);
        assert!((small.radius - 74.0).abs() < 1e-9);
        assert!((large.radius - 148.0).abs() < 1e-9);
        assert_eq!(small.center, (100.0, 100.0));
        assert_eq!(large.center, (200.0, 200.0));
    }

    #[test]
    fn dots_skip_far_hemisphere() {
        let (stats, _) = draw(&GlobeRenderer::default(), &mut RotationState::default(), 520.0);
        assert!(stats.dots < 220);
        assert!(stats.dots > 110);
    }
}
