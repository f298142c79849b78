//! Path cleanup and quality metrics
//!
//! These passes never move the first point of a path. The last point is
//! kept as well, unless the whole path collapses onto its start. None of
//! them turns a horizontal or vertical segment into a diagonal one.

use super::types::{Orientation, Point, DEDUPE_EPSILON};

/// Drop every point within [`DEDUPE_EPSILON`] of the previously kept point.
///
/// Dropping a point never leaves a diagonal behind. When the segment from
/// the last kept point to the next one would be diagonal although the
/// original segment into it was not, a corner is inserted so that the next
/// point is still reached along its original direction.
///
/// When the final point is a near-duplicate, the kept point it collided with
/// is dropped instead so the path still ends on the caller's anchor, with a
/// corner continuing the dropped segment's direction if needed.
pub fn dedupe(path: &[Point]) -> Vec<Point> {
    let Some((&first, rest)) = path.split_first() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(path.len());
    out.push(first);
    for (i, &point) in rest.iter().enumerate() {
        let last = out[out.len() - 1];
        if is_near(last, point) {
            continue;
        }
        let original = Orientation::of_segment(path[i], point);
        if original.is_some() && Orientation::of_segment(last, point).is_none() {
            out.push(match original {
                Some(Orientation::Vertical) => Point::new(point.x, last.y),
                _ => Point::new(last.x, point.y),
            });
        }
        out.push(point);
    }

    let Some(&end) = rest.last() else {
        return out;
    };
    if out.len() < 2 || out[out.len() - 1] == end {
        return out;
    }

    let mut collided = out.pop().unwrap_or(end);
    while out.len() > 1 && is_near(out[out.len() - 1], end) {
        collided = out.pop().unwrap_or(end);
    }
    let prev = out[out.len() - 1];
    if is_near(prev, end) {
        // Everything collapsed onto the start
        return out;
    }
    if Orientation::of_segment(prev, end).is_none() {
        out.push(match Orientation::of_segment(prev, collided) {
            Some(Orientation::Vertical) => Point::new(prev.x, end.y),
            _ => Point::new(end.x, prev.y),
        });
    }
    out.push(end);
    out
}

/// Within [`DEDUPE_EPSILON`] on both axes
fn is_near(a: Point, b: Point) -> bool {
    !((a.x - b.x).abs() > DEDUPE_EPSILON || (a.y - b.y).abs() > DEDUPE_EPSILON)
}

/// Apply `pass` followed by [`dedupe`] until the path stops changing.
///
/// Every round either shortens the path or settles it, with at most one
/// same-length corner fix in between, so the round bound is never the
/// limiting factor for finite input.
pub(crate) fn settle(path: &[Point], pass: fn(&[Point]) -> Vec<Point>) -> Vec<Point> {
    let mut out = dedupe(path);
    for _ in 0..=2 * path.len() {
        let next = dedupe(&pass(&out));
        if next == out {
            break;
        }
        out = next;
    }
    out
}

/// Drop interior points that sit on a straight run with both neighbours.
///
/// The previous neighbour is the last point kept, so a chain of redundant
/// waypoints collapses in a single pass.
pub fn remove_collinear(path: &[Point]) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for i in 1..path.len() - 1 {
        let prev = out[out.len() - 1];
        let cur = path[i];
        let next = path[i + 1];
        if !is_redundant(prev, cur, next) {
            out.push(cur);
        }
    }
    out.push(path[path.len() - 1]);
    out
}

/// `cur` adds nothing when all three points share an x or all share a y
fn is_redundant(prev: Point, cur: Point, next: Point) -> bool {
    let same_x = (prev.x - cur.x).abs() < DEDUPE_EPSILON && (cur.x - next.x).abs() < DEDUPE_EPSILON;
    let same_y = (prev.y - cur.y).abs() < DEDUPE_EPSILON && (cur.y - next.y).abs() < DEDUPE_EPSILON;
    same_x || same_y
}

/// Repeat [`remove_collinear`] until the point count stops shrinking.
///
/// This removes backtracking waypoints (a run that overshoots and comes
/// back along the same line) exposed by earlier removals.
pub fn remove_zigzags(path: &[Point]) -> Vec<Point> {
    let mut out = remove_collinear(path);
    loop {
        let before = out.len();
        out = remove_collinear(&out);
        if out.len() >= before {
            return out;
        }
    }
}

/// Remove near-duplicate and collinear points.
///
/// Runs collinear removal and dedupe until neither changes the path, which
/// makes `simplify(simplify(p)) == simplify(p)` hold for every input.
pub fn simplify(path: &[Point]) -> Vec<Point> {
    settle(path, remove_collinear)
}

/// Collapse interior points closer than `min_length` to the last kept point.
///
/// A short point survives when dropping it would leave a diagonal between
/// the last kept point and the next one. The endpoints are always kept.
pub fn merge_short_segments(path: &[Point], min_length: f64) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for i in 1..path.len() - 1 {
        let prev = out[out.len() - 1];
        let cur = path[i];
        let next = path[i + 1];

        if prev.distance(cur) >= min_length {
            out.push(cur);
            continue;
        }

        let would_diagonal =
            (prev.x - next.x).abs() > DEDUPE_EPSILON && (prev.y - next.y).abs() > DEDUPE_EPSILON;
        if would_diagonal {
            out.push(cur);
        }
    }
    out.push(path[path.len() - 1]);
    out
}

/// Count interior points where travel switches between horizontal and vertical
pub fn count_bends(path: &[Point]) -> usize {
    path.windows(3)
        .filter(|w| {
            let was_horizontal = Orientation::of_segment(w[0], w[1]) == Some(Orientation::Horizontal);
            let now_horizontal = Orientation::of_segment(w[1], w[2]) == Some(Orientation::Horizontal);
            was_horizontal != now_horizontal
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_simplify_removes_duplicates() {
        let path = vec![p(0.0, 0.0), p(0.0, 0.0), p(100.0, 0.0)];
        assert_eq!(simplify(&path), vec![p(0.0, 0.0), p(100.0, 0.0)]);
    }

    #[test]
    fn test_simplify_collinear_to_two_points() {
        let path = vec![p(0.0, 0.0), p(50.0, 0.0), p(100.0, 0.0)];
        assert_eq!(simplify(&path).len(), 2);
    }

    #[test]
    fn test_simplify_keeps_right_angle() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)];
        assert_eq!(simplify(&path), path);
    }

    #[test]
    fn test_simplify_empty_and_single() {
        assert!(simplify(&[]).is_empty());
        assert_eq!(simplify(&[p(3.0, 4.0)]), vec![p(3.0, 4.0)]);
    }

    #[test]
    fn test_simplify_is_idempotent_on_backtrack() {
        let path = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(10.0, 0.2), p(30.0, 0.2)];
        let once = simplify(&path);
        assert_eq!(simplify(&once), once);
    }

    #[test]
    fn test_dedupe_keeps_final_anchor() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 0.3)];
        let out = dedupe(&path);
        assert_eq!(out, vec![p(0.0, 0.0), p(100.0, 0.3)]);
    }

    #[test]
    fn test_dedupe_final_anchor_never_leaves_diagonal() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.9), p(100.0, 1.3)];
        let expected = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 1.3)];
        assert_eq!(dedupe(&path), expected);
        assert_eq!(simplify(&path), expected);
    }

    #[test]
    fn test_dedupe_corner_follows_vertical_run() {
        let path = vec![p(0.0, 0.0), p(0.8, 100.0), p(1.2, 100.0)];
        assert_eq!(
            dedupe(&path),
            vec![p(0.0, 0.0), p(0.0, 100.0), p(1.2, 100.0)]
        );
    }

    #[test]
    fn test_dedupe_interior_drop_keeps_segments_orthogonal() {
        // (0.5, 0.5) is a near-duplicate of the start, but the run after it
        // is vertical only relative to the dropped point
        let path = vec![p(0.0, 0.0), p(0.5, 0.5), p(1.4, 100.0)];
        assert_eq!(
            dedupe(&path),
            vec![p(0.0, 0.0), p(1.4, 0.0), p(1.4, 100.0)]
        );
    }

    #[test]
    fn test_dedupe_collapses_onto_start() {
        assert_eq!(dedupe(&[p(0.0, 0.0), p(0.2, 0.4)]), vec![p(0.0, 0.0)]);
    }

    #[test]
    fn test_zigzag_overshoot_removed() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(80.0, 0.0), p(200.0, 0.0)];
        assert_eq!(remove_zigzags(&path), vec![p(0.0, 0.0), p(200.0, 0.0)]);
    }

    #[test]
    fn test_merge_drops_short_collinear_point() {
        let path = vec![p(0.0, 0.0), p(5.0, 0.0), p(100.0, 0.0)];
        assert_eq!(merge_short_segments(&path, 10.0), vec![p(0.0, 0.0), p(100.0, 0.0)]);
    }

    #[test]
    fn test_merge_keeps_point_that_prevents_diagonal() {
        let path = vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 3.0), p(200.0, 3.0)];
        assert_eq!(merge_short_segments(&path, 10.0), path);
    }

    #[test]
    fn test_merge_never_drops_endpoints() {
        let path = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
        let out = merge_short_segments(&path, 1000.0);
        assert_eq!(out.first(), Some(&p(0.0, 0.0)));
        assert_eq!(out.last(), Some(&p(2.0, 0.0)));
    }

    #[test]
    fn test_count_bends() {
        assert_eq!(count_bends(&[p(0.0, 0.0), p(100.0, 0.0)]), 0);
        assert_eq!(count_bends(&[p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)]), 1);
        assert_eq!(
            count_bends(&[p(0.0, 0.0), p(50.0, 0.0), p(50.0, 100.0), p(100.0, 100.0)]),
            2
        );
    }
}
