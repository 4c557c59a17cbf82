//! Point pass: painter's-algorithm ordering and per-dot styling.

use crate::params::GlobeParams;
use crate::sphere::ProjectedPoint;
use crate::surface::Vec2;

/// A visible dot: a glow halo under a solid core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub index: usize,
    pub center: Vec2,
    pub brightness: f64,
    pub core_radius: f64,
    pub core_alpha: f64,
    pub glow_radius: f64,
    pub glow_alpha: f64,
}

/// Indices of `projected` ordered back to front. Ties keep their
/// original order.
pub fn paint_order(projected: &[ProjectedPoint]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..projected.len()).collect();
    order.sort_by(|&a, &b| projected[a].z.total_cmp(&projected[b].z));
    order
}

/// Dots to draw, back to front, skipping points behind the cutoff.
pub fn dots(projected: &[ProjectedPoint], params: &GlobeParams) -> Vec<Dot> {
    paint_order(projected)
        .into_iter()
        .filter(|&i| projected[i].z >= params.point_depth_cutoff)
        .map(|i| {
            let p = &projected[i];
            let brightness = p.brightness();
            let core_radius = params.dot_radius(brightness);
            Dot {
                index: i,
                center: Vec2::new(p.sx, p.sy),
                brightness,
                core_radius,
                core_alpha: params.core_alpha(brightness).clamp(0.0, 1.0),
                glow_radius: core_radius * params.halo_multiplier,
                glow_alpha: (brightness * params.glow_opacity).clamp(0.0, 1.0),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
