//! Connection pass: short lines between nearby front-facing points.

use std::collections::HashMap;

use clientbrain_config::schema::ConnectionStrategy;

use crate::sphere::ProjectedPoint;

/// One line to draw between projected points `a` and `b` (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    /// On-screen length in CSS pixels.
    pub distance: f64,
    /// Stroke opacity in `[0, 1]`.
    pub alpha: f64,
}

/// Find every pair of visible points closer than `max_distance` on screen.
///
/// Points with depth below `depth_cutoff` are skipped entirely. Opacity
/// fades linearly with distance and is scaled by the pair's mean
/// brightness and `dampening`. Pairs come out ordered by `(a, b)` for
/// either strategy.
pub fn find_connections(
    projected: &[ProjectedPoint],
    max_distance: f64,
    depth_cutoff: f64,
    dampening: f64,
    strategy: ConnectionStrategy,
) -> Vec<Connection> {
    if !(max_distance > 0.0) {
        return Vec::new();
    }
    let visible: Vec<usize> = projected
        .iter()
        .enumerate()
        .filter(|(_, p)| p.z >= depth_cutoff)
        .map(|(i, _)| i)
        .collect();

    let link = |a: usize, b: usize| connect(projected, a, b, max_distance, dampening);

    match strategy {
        ConnectionStrategy::BruteForce => brute_force(&visible, link),
        ConnectionStrategy::Grid => grid(projected, &visible, max_distance, link),
    }
}

fn connect(
    projected: &[ProjectedPoint],
    a: usize,
    b: usize,
    max_distance: f64,
    dampening: f64,
) -> Option<Connection> {
    let (pa, pb) = (&projected[a], &projected[b]);
    let distance = pa.screen_distance(pb);
    if distance >= max_distance {
        return None;
    }
    let brightness = (pa.brightness() + pb.brightness()) / 2.0;
    let alpha = (1.0 - distance / max_distance) * brightness * dampening;
    Some(Connection {
        a,
        b,
        distance,
        alpha: alpha.clamp(0.0, 1.0),
    })
}

fn brute_force(
    visible: &[usize],
    link: impl Fn(usize, usize) -> Option<Connection>,
) -> Vec<Connection> {
    let mut out = Vec::new();
    for (k, &a) in visible.iter().enumerate() {
        for &b in &visible[k + 1..] {
            if let Some(c) = link(a, b) {
                out.push(c);
            }
        }
    }
    out
}

type Cell = (i64, i64);

fn cell_of(p: &ProjectedPoint, cell_size: f64) -> Cell {
    (
        (p.sx / cell_size).floor() as i64,
        (p.sy / cell_size).floor() as i64,
    )
}

/// Uniform grid with cells one `max_distance` wide: any pair closer than
/// that lies in the same or an adjacent cell.
fn grid(
    projected: &[ProjectedPoint],
    visible: &[usize],
    max_distance: f64,
    link: impl Fn(usize, usize) -> Option<Connection>,
) -> Vec<Connection> {
    let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
    for &i in visible {
        cells
            .entry(cell_of(&projected[i], max_distance))
            .or_default()
            .push(i);
    }

    let mut out = Vec::new();
    for &a in visible {
        let (cx, cy) = cell_of(&projected[a], max_distance);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &b in bucket.iter().filter(|&&b| b > a) {
                    if let Some(c) = link(a, b) {
                        out.push(c);
                    }
                }
            }
        }
    }
    out.sort_by_key(|c| (c.a, c.b));
    out
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::{fibonacci_sphere, project, RotationState, Viewport};

    fn pt(sx: f64, sy: f64, z: f64) -> ProjectedPoint {
        ProjectedPoint { sx, sy, z }
    }

    fn frame(size: f64, rotation: RotationState) -> Vec<ProjectedPoint> {
        project(&fibonacci_sphere(220), &rotation, Viewport::new(size), 0.37)
    }

    #[test]
    fn close_pair_connects_with_faded_alpha() {
        let pts = [pt(0.0, 0.0, 1.0), pt(50.0, 0.0, 1.0)];
        let c = find_connections(&pts, 100.0, -0.05, 0.65, ConnectionStrategy::BruteForce);
        assert_eq!(c.len(), 1);
        assert_eq!((c[0].a, c[0].b), (0, 1));
        assert!((c[0].distance - 50.0).abs() < 1e-12);
        // (1 - 0.5) * 1.0 * 0.65
        assert!((c[0].alpha - 0.325).abs() < 1e-12);
    }

    #[test]
    fn distance_at_threshold_does_not_connect() {
        let pts = [pt(0.0, 0.0, 1.0), pt(100.0, 0.0, 1.0)];
        assert!(find_connections(&pts, 100.0, -0.05, 0.65, ConnectionStrategy::BruteForce).is_empty());
    }

    #[test]
    fn occluded_points_never_connect() {
        let pts = [pt(0.0, 0.0, 1.0), pt(1.0, 0.0, -0.06), pt(2.0, 0.0, 0.0)];
        for strategy in [ConnectionStrategy::BruteForce, ConnectionStrategy::Grid] {
            let c = find_connections(&pts, 100.0, -0.05, 0.65, strategy);
            assert!(c.iter().all(|c| c.a != 1 && c.b != 1));
            assert_eq!(c.len(), 1);
        }
    }

    #[test]
    fn cutoff_is_inclusive() {
        let pts = [pt(0.0, 0.0, -0.05), pt(1.0, 0.0, -0.05)];
        let c = find_connections(&pts, 100.0, -0.05, 0.65, ConnectionStrategy::BruteForce);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn every_pair_evaluated_once() {
        let pts = frame(520.0, RotationState::default());
        let c = find_connections(&pts, 0.55 * 0.37 * 520.0, -0.05, 0.65, ConnectionStrategy::BruteForce);
        assert!(!c.is_empty());
        assert!(c.iter().all(|c| c.a < c.b));
        assert!(c.windows(2).all(|w| (w[0].a, w[0].b) < (w[1].a, w[1].b)));
    }

    #[test]
    fn decision_is_symmetric() {
        let pts = frame(400.0, RotationState { idle_yaw: 0.8, ..Default::default() });
        let max = 0.55 * 0.37 * 400.0;
        let forward = find_connections(&pts, max, -0.05, 0.65, ConnectionStrategy::BruteForce);

        let n = pts.len();
        let reversed: Vec<_> = pts.iter().rev().copied().collect();
        let backward = find_connections(&reversed, max, -0.05, 0.65, ConnectionStrategy::BruteForce);

        let mut mapped: Vec<(usize, usize)> = backward
            .iter()
            .map(|c| {
                let (a, b) = (n - 1 - c.a, n - 1 - c.b);
                (a.min(b), a.max(b))
            })
            .collect();
        mapped.sort();
        let original: Vec<(usize, usize)> = forward.iter().map(|c| (c.a, c.b)).collect();
        assert_eq!(original, mapped);
    }

    #[test]
    fn grid_matches_brute_force() {
        for (size, yaw) in [(520.0, 0.0), (300.0, 1.7), (1000.0, 4.2)] {
            let pts = frame(size, RotationState { idle_yaw: yaw, pitch_offset: 0.2, ..Default::default() });
            let max = 0.55 * 0.37 * size;
            let brute = find_connections(&pts, max, -0.05, 0.65, ConnectionStrategy::BruteForce);
            let grid = find_connections(&pts, max, -0.05, 0.65, ConnectionStrategy::Grid);
            assert_eq!(brute, grid, "size {size}, yaw {yaw}");
        }
    }

    #[test]
    fn zero_distance_yields_nothing() {
        let pts = frame(520.0, RotationState::default());
        assert!(find_connections(&pts, 0.0, -0.05, 0.65, ConnectionStrategy::Grid).is_empty());
    }
}
