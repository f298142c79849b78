//! Greedy obstacle avoidance for orthogonal paths
//!
//! The resolver works on a growable point list. Each pass looks for the
//! first segment that touches an obstacle, splices a two-point detour around
//! it and starts the next pass from the beginning of the path.
//!
//! Resolution is best effort. When [`MAX_RESOLVE_PASSES`] or
//! [`MAX_PATH_POINTS`] runs out, the path is returned as it stands, possibly
//! still overlapping an obstacle.

use tracing::{debug, trace};

use super::simplify::{remove_zigzags, settle};
use super::types::{segment_intersects_box, BoundingBox, Orientation, Point};

/// Upper bound on detour insertion passes
pub const MAX_RESOLVE_PASSES: usize = 12;

/// No detours are inserted once a path has this many points
pub const MAX_PATH_POINTS: usize = 60;

/// Stand-off used when the caller passes no usable clearance
pub const DEFAULT_CLEARANCE: f64 = 1.0;

/// Route `path` around `obstacles`, keeping `clearance` units of stand-off.
///
/// Diagonal segments are first split into a horizontal and a vertical leg.
/// The result is cleaned of duplicates, collinear points and zigzags until
/// none are left. Its first and last points are the first and last points
/// of `path`, unless every point lies within
/// [`DEDUPE_EPSILON`](super::types::DEDUPE_EPSILON) of the first.
pub fn resolve_collisions(path: &[Point], obstacles: &[BoundingBox], clearance: f64) -> Vec<Point> {
    if path.is_empty() {
        return Vec::new();
    }

    let clearance = effective_clearance(clearance);
    let mut points = decompose_diagonals(path);

    for pass in 0..MAX_RESOLVE_PASSES {
        if points.len() >= MAX_PATH_POINTS {
            break;
        }
        let Some(hit) = find_collision(&points, obstacles) else {
            break;
        };
        trace!(
            pass,
            segment = hit.segment,
            obstacle_x = hit.obstacle.x,
            obstacle_y = hit.obstacle.y,
            "inserting detour"
        );
        insert_detour(&mut points, &hit, clearance);
    }

    if find_collision(&points, obstacles).is_some() {
        debug!(
            points = points.len(),
            obstacles = obstacles.len(),
            "collision budget exhausted, returning partial route"
        );
    }

    settle(&points, remove_zigzags)
}

/// Zero, negative and NaN clearances fall back to [`DEFAULT_CLEARANCE`]
fn effective_clearance(clearance: f64) -> f64 {
    if clearance > 0.0 {
        clearance
    } else {
        DEFAULT_CLEARANCE
    }
}

/// Split every diagonal segment at `(next.x, prev.y)`
fn decompose_diagonals(path: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity(path.len() * 2);
    for &cur in path {
        if let Some(&prev) = out.last() {
            if Orientation::of_segment(prev, cur).is_none() {
                out.push(Point::new(cur.x, prev.y));
            }
        }
        out.push(cur);
    }
    out
}

struct Collision {
    segment: usize,
    orientation: Orientation,
    obstacle: BoundingBox,
}

/// First segment, in path order, touching any obstacle
fn find_collision(points: &[Point], obstacles: &[BoundingBox]) -> Option<Collision> {
    points.windows(2).enumerate().find_map(|(segment, w)| {
        let (a, b) = (w[0], w[1]);
        let orientation = Orientation::of_segment(a, b)?;
        obstacles
            .iter()
            .find(|o| segment_intersects_box(a.x, a.y, b.x, b.y, o))
            .map(|&obstacle| Collision {
                segment,
                orientation,
                obstacle,
            })
    })
}

/// Replace segment `a`-`b` by `a`, two points beside the obstacle, `b`.
///
/// The detour runs on whichever face of the obstacle is closer to the
/// segment, ties going to the top or left face.
fn insert_detour(points: &mut Vec<Point>, hit: &Collision, clearance: f64) {
    let a = points[hit.segment];
    let b = points[hit.segment + 1];
    let o = &hit.obstacle;

    let detour = match hit.orientation {
        Orientation::Horizontal => {
            let y = nearer(a.y, o.y - clearance, o.bottom() + clearance);
            [Point::new(a.x, y), Point::new(b.x, y)]
        }
        Orientation::Vertical => {
            let x = nearer(a.x, o.x - clearance, o.right() + clearance);
            [Point::new(x, a.y), Point::new(x, b.y)]
        }
    };

    let at = hit.segment + 1;
    points.splice(at..at, detour);
}

fn nearer(from: f64, low: f64, high: f64) -> f64 {
    if (from - low).abs() <= (from - high).abs() {
        low
    } else {
        high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn is_orthogonal(path: &[Point]) -> bool {
        path.windows(2)
            .all(|w| Orientation::of_segment(w[0], w[1]).is_some())
    }

    #[test]
    fn test_no_obstacles_returns_simplified_path() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(200.0, 0.0)];
        assert_eq!(resolve_collisions(&path, &[], 1.0), vec![p(0.0, 0.0), p(200.0, 0.0)]);
    }

    #[test]
    fn test_horizontal_segment_detours_around_obstacle() {
        let path = vec![p(0.0, 100.0), p(200.0, 100.0)];
        let obstacle = BoundingBox::new(80.0, 80.0, 40.0, 40.0);
        let out = resolve_collisions(&path, &[obstacle], 1.0);

        assert!(out.len() > 2);
        for w in out.windows(2) {
            assert!(!segment_intersects_box(w[0].x, w[0].y, w[1].x, w[1].y, &obstacle));
        }
        assert_eq!(out.first(), Some(&p(0.0, 100.0)));
        assert_eq!(out.last(), Some(&p(200.0, 100.0)));
    }

    #[test]
    fn test_detour_keeps_clearance() {
        let path = vec![p(0.0, 100.0), p(200.0, 100.0)];
        let obstacle = BoundingBox::new(80.0, 80.0, 40.0, 40.0);
        let out = resolve_collisions(&path, &[obstacle], 20.0);

        // Equidistant faces resolve to the top one
        assert_eq!(
            out,
            vec![p(0.0, 100.0), p(0.0, 60.0), p(200.0, 60.0), p(200.0, 100.0)]
        );
    }

    #[test]
    fn test_vertical_segment_takes_nearer_face() {
        let path = vec![p(90.0, 0.0), p(90.0, 200.0)];
        let obstacle = BoundingBox::new(80.0, 80.0, 40.0, 40.0);
        let out = resolve_collisions(&path, &[obstacle], 10.0);
        assert!(out.iter().any(|pt| pt.x == 70.0));
        assert!(is_orthogonal(&out));
    }

    #[test]
    fn test_diagonal_is_decomposed() {
        let path = vec![p(0.0, 0.0), p(100.0, 100.0)];
        let obstacle = BoundingBox::new(40.0, 40.0, 20.0, 20.0);
        let out = resolve_collisions(&path, &[obstacle], 20.0);
        assert!(is_orthogonal(&out));
        assert_eq!(out, vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)]);
    }

    #[test]
    fn test_zigzag_removed() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(80.0, 0.0), p(200.0, 0.0)];
        assert!(resolve_collisions(&path, &[], 1.0).len() <= 2);
    }

    #[test]
    fn test_non_positive_clearance_uses_default() {
        let path = vec![p(0.0, 100.0), p(200.0, 100.0)];
        let obstacle = BoundingBox::new(80.0, 80.0, 40.0, 40.0);
        assert_eq!(
            resolve_collisions(&path, &[obstacle], 0.0),
            resolve_collisions(&path, &[obstacle], DEFAULT_CLEARANCE)
        );
    }

    #[test]
    fn test_unavoidable_obstacle_terminates() {
        // The anchors sit inside the obstacle, so no detour can clear it
        let path = vec![p(10.0, 10.0), p(90.0, 10.0)];
        let obstacle = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let out = resolve_collisions(&path, &[obstacle], 5.0);
        assert_eq!(out.first(), Some(&p(10.0, 10.0)));
        assert_eq!(out.last(), Some(&p(90.0, 10.0)));
        assert!(is_orthogonal(&out));
    }

    #[test]
    fn test_near_duplicate_anchor_stays_orthogonal() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.9), p(100.0, 1.3)];
        let out = resolve_collisions(&path, &[], 1.0);
        assert_eq!(out, vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 1.3)]);
        assert!(is_orthogonal(&out));
    }

    #[test]
    fn test_empty_path() {
        assert!(resolve_collisions(&[], &[], 1.0).is_empty());
    }
}
