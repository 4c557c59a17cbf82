//! Resolved renderer parameters.
//!
//! `GlobeParams` is built once from `[globe]` config and handed to the
//! renderer. Hex colors are parsed here so the frame loop never touches
//! strings.

use clientbrain_common::Color;
use clientbrain_config::schema::{ConnectionStrategy, GlobeConfig};

/// Default connection and glow color (#4F8EF7).
pub const ACCENT_BLUE: Color = Color::from_rgb(79, 142, 247);

/// Default core dot color (#A0D2FF).
pub const CORE_BLUE: Color = Color::from_rgb(160, 210, 255);

/// Everything the renderer needs to draw a frame, with colors resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeParams {
    pub point_count: usize,
    pub idle_yaw_step: f64,
    pub yaw_sensitivity: f64,
    pub pitch_sensitivity: f64,
    pub radius_fraction: f64,
    pub connection_distance: f64,
    pub connection_depth_cutoff: f64,
    pub point_depth_cutoff: f64,
    pub line_opacity: f64,
    pub line_width: f64,
    pub dot_base_radius: f64,
    pub dot_depth_radius: f64,
    pub halo_multiplier: f64,
    pub glow_opacity: f64,
    pub core_base_opacity: f64,
    pub core_depth_opacity: f64,
    pub line_color: Color,
    pub glow_color: Color,
    pub core_color: Color,
    pub connection_strategy: ConnectionStrategy,
}

impl GlobeParams {
    /// Resolve config into draw parameters.
    ///
    /// An unparseable color falls back to its default with a warning;
    /// validation has already reported it.
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            point_count: config.point_count as usize,
            idle_yaw_step: config.idle_yaw_step,
            yaw_sensitivity: config.yaw_sensitivity,
            pitch_sensitivity: config.pitch_sensitivity,
            radius_fraction: config.radius_fraction,
            connection_distance: config.connection_distance,
            connection_depth_cutoff: config.connection_depth_cutoff,
            point_depth_cutoff: config.point_depth_cutoff,
            line_opacity: config.line_opacity,
            line_width: config.line_width,
            dot_base_radius: config.dot_base_radius,
            dot_depth_radius: config.dot_depth_radius,
            halo_multiplier: config.halo_multiplier,
            glow_opacity: config.glow_opacity,
            core_base_opacity: config.core_base_opacity,
            core_depth_opacity: config.core_depth_opacity,
            line_color: parse_color("line_color", &config.line_color, ACCENT_BLUE),
            glow_color: parse_color("glow_color", &config.glow_color, ACCENT_BLUE),
            core_color: parse_color("core_color", &config.core_color, CORE_BLUE),
            connection_strategy: config.connection_strategy,
        }
    }

    /// Copy with the idle spin disabled. Used for deterministic stills.
    pub fn frozen(&self) -> Self {
        Self {
            idle_yaw_step: 0.0,
            ..self.clone()
        }
    }

    /// Connection cut-off in pixels for a given sphere radius.
    pub fn max_connection_distance(&self, radius: f64) -> f64 {
        radius * self.connection_distance
    }

    /// Core dot radius at a given brightness.
    pub fn dot_radius(&self, brightness: f64) -> f64 {
        self.dot_base_radius + brightness * self.dot_depth_radius
    }

    /// Core dot opacity at a given brightness.
    pub fn core_alpha(&self, brightness: f64) -> f64 {
        self.core_base_opacity + brightness * self.core_depth_opacity
    }
}

impl Default for GlobeParams {
    fn default() -> Self {
        Self::from_config(&GlobeConfig::default())
    }
}

fn parse_color(field: &str, value: &str, fallback: Color) -> Color {
    Color::from_hex(value).unwrap_or_else(|| {
        tracing::warn!(field, value, "invalid globe color, using default");
        fallback
    })
}

// =============================================================================
// Tests
// =============================================================================
