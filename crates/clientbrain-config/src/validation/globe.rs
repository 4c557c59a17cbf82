//! Globe renderer validation (point count, fractions, opacities, colors).

use crate::schema::ClientBrainConfig;

use super::helpers::{validate_hex_color, validate_range, validate_range_f64};

/// Validate all globe constraints.
pub(crate) fn validate_globe(errors: &mut Vec<String>, config: &ClientBrainConfig) {
    let g = &config.globe;

    validate_range(errors, "globe.point_count", g.point_count, 4, 5000);
    validate_range(errors, "globe.still_size", g.still_size, 64, 2048);

    validate_range_f64(errors, "globe.idle_yaw_step", g.idle_yaw_step, 0.0, 0.5);
    validate_range_f64(errors, "globe.yaw_sensitivity", g.yaw_sensitivity, 0.0, 3.2);
    validate_range_f64(errors, "globe.pitch_sensitivity", g.pitch_sensitivity, 0.0, 1.6);
    validate_range_f64(errors, "globe.radius_fraction", g.radius_fraction, 0.05, 0.5);
    validate_range_f64(
        errors,
        "globe.connection_distance",
        g.connection_distance,
        0.0,
        2.0,
    );
    validate_range_f64(
        errors,
        "globe.connection_depth_cutoff",
        g.connection_depth_cutoff,
        -1.0,
        1.0,
    );
    validate_range_f64(
        errors,
        "globe.point_depth_cutoff",
        g.point_depth_cutoff,
        -1.0,
        1.0,
    );

    // Opacities
    validate_range_f64(errors, "globe.line_opacity", g.line_opacity, 0.0, 1.0);
    validate_range_f64(errors, "globe.glow_opacity", g.glow_opacity, 0.0, 1.0);
    validate_range_f64(errors, "globe.core_base_opacity", g.core_base_opacity, 0.0, 1.0);
    validate_range_f64(
        errors,
        "globe.core_depth_opacity",
        g.core_depth_opacity,
        0.0,
        1.0,
    );

    // Sizes
    validate_range_f64(errors, "globe.line_width", g.line_width, 0.1, 10.0);
    validate_range_f64(errors, "globe.dot_base_radius", g.dot_base_radius, 0.0, 20.0);
    validate_range_f64(errors, "globe.dot_depth_radius", g.dot_depth_radius, 0.0, 20.0);
    validate_range_f64(errors, "globe.halo_multiplier", g.halo_multiplier, 1.0, 10.0);

    validate_hex_color(errors, "globe.line_color", &g.line_color);
    validate_hex_color(errors, "globe.glow_color", &g.glow_color);
    validate_hex_color(errors, "globe.core_color", &g.core_color);
}
