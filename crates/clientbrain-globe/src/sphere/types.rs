//! Point types: the immutable lattice point and its per-frame projection.

/// A position on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length. Lattice points have length ≈ 1.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A rotated point mapped to screen space, alive for one frame.
///
/// `z` is the rotated depth in `[-1, 1]`; larger is nearer the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub sx: f64,
    pub sy: f64,
    pub z: f64,
}

impl ProjectedPoint {
    /// Depth remapped to `[0, 1]`: 0 at the far pole, 1 at the near pole.
    pub fn brightness(&self) -> f64 {
        (self.z + 1.0) / 2.0
    }

    /// On-screen distance to another projected point.
    pub fn screen_distance(&self, other: &ProjectedPoint) -> f64 {
        let dx = self.sx - other.sx;
        let dy = self.sy - other.sy;
        (dx * dx + dy * dy).sqrt()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_spans_zero_to_one() {
        let far = ProjectedPoint { sx: 0.0, sy: 0.0, z: -1.0 };
        let mid = ProjectedPoint { sx: 0.0, sy: 0.0, z: 0.0 };
        let near = ProjectedPoint { sx: 0.0, sy: 0.0, z: 1.0 };
        assert!((far.brightness() - 0.0).abs() < 1e-12);
        assert!((mid.brightness() - 0.5).abs() < 1e-12);
        assert!((near.brightness() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn screen_distance_ignores_depth() {
        let a = ProjectedPoint { sx: 0.0, sy: 0.0, z: -1.0 };
        let b = ProjectedPoint { sx: 3.0, sy: 4.0, z: 1.0 };
        assert!((a.screen_distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.screen_distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn point_length() {
        assert!((Point::new(0.0, 0.6, 0.8).length() - 1.0).abs() < 1e-12);
    }
}
