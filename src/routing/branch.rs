//! Hub-to-spoke routing through a container's lane grid

use tracing::trace;

use super::channels::{row_index, ChannelGrid};
use super::simplify::simplify;
use super::types::{segment_intersects_box, BoundingBox, Point, AXIS_EPSILON};

/// Route from a container-level `hub` to `target` through `grid`.
///
/// Targets in the first row (or without a grid) get a single L bend. Deeper
/// targets drop down a vertical run to the lane above their row, then run
/// across. The vertical run goes straight down at `target.x` unless that
/// crosses one of `obstacles`, in which case the nearest clear vertical lane
/// of the grid is used.
pub fn branch_route(
    hub: Point,
    target: Point,
    grid: Option<&ChannelGrid>,
    target_box: Option<&BoundingBox>,
    container: Option<&BoundingBox>,
    obstacles: &[BoundingBox],
) -> Vec<Point> {
    if hub.approx_eq(target, AXIS_EPSILON) {
        return vec![hub, target];
    }

    let (Some(grid), Some(container)) = (grid, container) else {
        return l_route(hub, target);
    };

    let row = target_box.map_or(0, |b| row_index(b, container));
    if row <= 0 {
        return l_route(hub, target);
    }

    let lanes = grid.horizontal();
    let lane_y = lanes[(row as usize).min(lanes.len() - 1)];

    let (y_top, y_bottom) = (hub.y.min(lane_y), hub.y.max(lane_y));
    let blocked = |x: f64| {
        obstacles
            .iter()
            .any(|o| segment_intersects_box(x, y_top, x, y_bottom, o))
    };

    let lane_x = if blocked(target.x) {
        let mut candidates = grid.vertical();
        candidates.sort_by(|a, b| (a - target.x).abs().total_cmp(&(b - target.x).abs()));
        let chosen = candidates
            .iter()
            .copied()
            .find(|&x| !blocked(x))
            .unwrap_or(candidates[0]);
        trace!(row, lane_x = chosen, "direct drop blocked, using lane");
        chosen
    } else {
        target.x
    };

    simplify(&[
        hub,
        Point::new(lane_x, hub.y),
        Point::new(lane_x, lane_y),
        Point::new(target.x, lane_y),
        target,
    ])
}

fn l_route(hub: Point, target: Point) -> Vec<Point> {
    simplify(&[hub, Point::new(target.x, hub.y), target])
}
