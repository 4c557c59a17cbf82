//! Orthographic projection from the unit sphere to the drawing surface.

use super::rotation::RotationState;
use super::types::{Point, ProjectedPoint};

/// Square drawing area derived from the surface's box.
///
/// `size` is the smaller of width and height in CSS pixels; the globe is
/// centered in a `size × size` square anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub size: f64,
}

impl Viewport {
    pub fn new(size: f64) -> Self {
        Self {
            size: if size.is_finite() { size.max(0.0) } else { 0.0 },
        }
    }

    /// Viewport for a surface box of `width × height`.
    pub fn from_box(width: f64, height: f64) -> Self {
        Self::new(width.min(height))
    }

    /// Sphere radius in pixels for a given fraction of the viewport.
    pub fn radius(&self, fraction: f64) -> f64 {
        self.size * fraction
    }

    /// Center of the drawing square.
    pub fn center(&self) -> (f64, f64) {
        (self.size * 0.5, self.size * 0.5)
    }
}

/// Rotate and project every base point. The output has one entry per
/// input point, in the same order.
pub fn project(
    points: &[Point],
    rotation: &RotationState,
    viewport: Viewport,
    radius_fraction: f64,
) -> Vec<ProjectedPoint> {
    let r = viewport.radius(radius_fraction);
    let (cx, cy) = viewport.center();
    let (yaw, pitch) = (rotation.yaw(), rotation.pitch());

    points
        .iter()
        .map(|&p| {
            let q = super::rotation::rotate(p, yaw, pitch);
            ProjectedPoint {
                sx: cx + q.x * r,
                sy: cy + q.y * r,
                z: q.z,
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
