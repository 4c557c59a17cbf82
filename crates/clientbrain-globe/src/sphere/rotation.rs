//! Rotation state and the two axis rotations applied every frame.
//!
//! Composition order is fixed: yaw about the vertical (y) axis first,
//! then pitch about the horizontal (x) axis.

use std::f64::consts::TAU;

use super::types::Point;

/// Rotate about the vertical axis.
pub fn rotate_yaw(p: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    Point {
        x: p.x * c - p.z * s,
        y: p.y,
        z: p.x * s + p.z * c,
    }
}

/// Rotate about the horizontal axis.
pub fn rotate_pitch(p: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    Point {
        x: p.x,
        y: p.y * c - p.z * s,
        z: p.y * s + p.z * c,
    }
}

/// Yaw then pitch.
pub fn rotate(p: Point, yaw: f64, pitch: f64) -> Point {
    rotate_pitch(rotate_yaw(p, yaw), pitch)
}

/// Pointer position normalized to `[-1, 1]` on both axes, 0 at the
/// viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerOffset {
    pub x: f64,
    pub y: f64,
}

impl PointerOffset {
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    /// Normalize a raw client position against the window extent.
    ///
    /// A degenerate window (zero or negative extent) maps to the center.
    pub fn from_client(client_x: f64, client_y: f64, window_width: f64, window_height: f64) -> Self {
        Self {
            x: normalize_axis(client_x, window_width),
            y: normalize_axis(client_y, window_height),
        }
    }
}

fn normalize_axis(position: f64, extent: f64) -> f64 {
    if !(extent > 0.0) || !position.is_finite() {
        return 0.0;
    }
    ((position / extent - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Per-instance rotation: an idle yaw that advances every frame plus
/// pointer-driven yaw and pitch offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub idle_yaw: f64,
    pub yaw_offset: f64,
    pub pitch_offset: f64,
}

impl RotationState {
    /// Advance the idle spin by `step` radians, wrapped to `[0, 2π)`.
    pub fn advance(&mut self, step: f64) {
        self.idle_yaw = (self.idle_yaw + step).rem_euclid(TAU);
    }

    /// Recompute the pointer offsets from the latest pointer sample.
    pub fn apply_pointer(&mut self, pointer: PointerOffset, yaw_sensitivity: f64, pitch_sensitivity: f64) {
        self.yaw_offset = pointer.x * yaw_sensitivity;
        self.pitch_offset = pointer.y * pitch_sensitivity;
    }

    pub fn yaw(&self) -> f64 {
        self.idle_yaw + self.yaw_offset
    }

    pub fn pitch(&self) -> f64 {
        self.pitch_offset
    }

    /// Apply the effective rotation to one point.
    pub fn apply(&self, p: Point) -> Point {
        rotate(p, self.yaw(), self.pitch())
    }
}

// =============================================================================
// Tests
// =============================================================================
