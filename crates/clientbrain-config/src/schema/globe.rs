//! Point-sphere ("globe") renderer configuration.

use serde::{Deserialize, Serialize};

/// How the connection pass finds nearby point pairs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStrategy {
    /// Compare every visible pair. Fine for a few hundred points.
    #[default]
    BruteForce,
    /// Bucket projected points into a screen grid first.
    Grid,
}

/// Globe renderer settings.
///
/// Distances are fractions so the globe scales with the drawing surface:
/// `radius_fraction` of the viewport size, `connection_distance` of the
/// radius. Depth values are rotated z coordinates in `[-1, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Number of lattice points (valid range: 4-5000).
    pub point_count: u32,
    /// Idle yaw advance per frame in radians (valid range: 0.0-0.5).
    pub idle_yaw_step: f64,
    /// Yaw offset at full pointer deflection (valid range: 0.0-3.2).
    pub yaw_sensitivity: f64,
    /// Pitch offset at full pointer deflection (valid range: 0.0-1.6).
    pub pitch_sensitivity: f64,
    /// Sphere radius as a fraction of the viewport size (valid range: 0.05-0.5).
    pub radius_fraction: f64,
    /// Maximum connection length as a fraction of the radius (valid range: 0.0-2.0).
    pub connection_distance: f64,
    /// Points with depth below this never take part in connections.
    pub connection_depth_cutoff: f64,
    /// Points with depth below this are not drawn.
    pub point_depth_cutoff: f64,
    /// Overall dampening applied to connection opacity (valid range: 0.0-1.0).
    pub line_opacity: f64,
    /// Connection stroke width in CSS pixels (valid range: 0.1-10.0).
    pub line_width: f64,
    /// Core dot radius of the farthest visible point.
    pub dot_base_radius: f64,
    /// Extra core radius gained at full brightness.
    pub dot_depth_radius: f64,
    /// Glow radius as a multiple of the core radius (valid range: 1.0-10.0).
    pub halo_multiplier: f64,
    /// Glow opacity at full brightness (valid range: 0.0-1.0).
    pub glow_opacity: f64,
    /// Core opacity of the farthest visible point (valid range: 0.0-1.0).
    pub core_base_opacity: f64,
    /// Extra core opacity gained at full brightness (valid range: 0.0-1.0).
    pub core_depth_opacity: f64,
    pub line_color: String,
    pub glow_color: String,
    pub core_color: String,
    pub connection_strategy: ConnectionStrategy,
    /// Edge length of server-rendered stills in pixels (valid range: 64-2048).
    pub still_size: u32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            point_count: 220,
            idle_yaw_step: 0.004,
            yaw_sensitivity: 0.55,
            pitch_sensitivity: 0.35,
            radius_fraction: 0.37,
            connection_distance: 0.55,
            connection_depth_cutoff: -0.05,
            point_depth_cutoff: -0.4,
            line_opacity: 0.65,
            line_width: 0.65,
            dot_base_radius: 0.8,
            dot_depth_radius: 2.2,
            halo_multiplier: 4.0,
            glow_opacity: 0.5,
            core_base_opacity: 0.25,
            core_depth_opacity: 0.75,
            line_color: "#4F8EF7".into(),
            glow_color: "#4F8EF7".into(),
            core_color: "#A0D2FF".into(),
            connection_strategy: ConnectionStrategy::BruteForce,
            still_size: 520,
        }
    }
}
