//! Spherical Fibonacci lattice.
//!
//! Places `n` points on the unit sphere at equal-area latitude steps with a
//! golden-ratio azimuth increment. Unlike a latitude/longitude grid this
//! does not bunch points at the poles.

use std::f64::consts::TAU;

use super::types::Point;

/// The golden ratio φ.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Generate `n` near-uniform points on the unit sphere.
///
/// Point `i` has polar angle `acos(1 - 2(i + 0.5)/n)` and azimuth
/// `2π·i/φ`. The first point sits nearest the +z pole, the last nearest
/// the -z pole. The result is deterministic.
pub fn fibonacci_sphere(n: usize) -> Vec<Point> {
    (0..n).map(|i| lattice_point(i, n)).collect()
}

fn lattice_point(i: usize, n: usize) -> Point {
    let azimuth = TAU * (i as f64) / GOLDEN_RATIO;
    let polar = (1.0 - 2.0 * (i as f64 + 0.5) / (n as f64)).acos();

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

    Point {
        x: sin_polar * cos_azimuth,
        y: sin_polar * sin_azimuth,
        z: cos_polar,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_has_requested_count() {
        assert_eq!(fibonacci_sphere(220).len(), 220);
        assert_eq!(fibonacci_sphere(1).len(), 1);
        assert!(fibonacci_sphere(0).is_empty());
    }

    #[test]
    fn every_point_is_on_the_unit_sphere() {
        for (i, p) in fibonacci_sphere(220).iter().enumerate() {
            let len = p.length();
            assert!((len - 1.0).abs() < 1e-9, "point {i}: |p| = {len}");
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 1.0 && p.z.abs() <= 1.0);
        }
    }

    #[test]
    fn lattice_is_deterministic() {
        assert_eq!(fibonacci_sphere(220), fibonacci_sphere(220));
    }

    #[test]
    fn z_descends_from_north_to_south() {
        let pts = fibonacci_sphere(220);
        assert!(pts.windows(2).all(|w| w[0].z > w[1].z));
        assert!(pts[0].z > 0.99);
        assert!(pts[219].z < -0.99);
    }

    #[test]
    fn poles_are_not_clustered() {
        // Each polar cap |z| > 0.9 covers 5% of the sphere's area,
        // so an equal-area lattice puts 11 of 220 points in each.
        let pts = fibonacci_sphere(220);
        let north = pts.iter().filter(|p| p.z > 0.9).count();
        let south = pts.iter().filter(|p| p.z < -0.9).count();
        assert_eq!(north, 11);
        assert_eq!(south, 11);
    }

    #[test]
    fn hemispheres_are_balanced() {
        let pts = fibonacci_sphere(220);
        let front = pts.iter().filter(|p| p.z > 0.0).count();
        assert_eq!(front, 110);
    }

    #[test]
    fn first_point_azimuth_is_zero() {
        // i = 0: azimuth 0 → y = 0, x = sin(polar) ≥ 0
        let p = fibonacci_sphere(220)[0];
        assert!(p.y.abs() < 1e-12);
        assert!(p.x > 0.0);
    }
}
