//! Box-to-box routing: the full pipeline for one peer edge

use super::collision::resolve_collisions;
use super::config::RoutingConfig;
use super::direct::direct_route;
use super::simplify::merge_short_segments;
use super::types::{anchor_point, stub_point, BoundingBox, Point, Side};

/// Route a peer edge from one box side to another around `obstacles`.
///
/// Builds anchors and stubs, then runs the direct router, the collision
/// resolver and the short-segment merge.
pub fn route_peer(
    from: &BoundingBox,
    from_side: Side,
    to: &BoundingBox,
    to_side: Side,
    obstacles: &[BoundingBox],
    config: &RoutingConfig,
) -> Vec<Point> {
    let src = anchor_point(from, from_side);
    let dst = anchor_point(to, to_side);
    let src_stub = stub_point(src, from_side, config.stub_length);
    let dst_stub = stub_point(dst, to_side, config.stub_length);

    let raw = direct_route(src, src_stub, from_side, dst, dst_stub, to_side);
    let resolved = resolve_collisions(&raw, obstacles, config.clearance);
    merge_short_segments(&resolved, config.merge_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::types::Orientation;

    fn is_orthogonal(path: &[Point]) -> bool {
        path.windows(2)
            .all(|w| Orientation::of_segment(w[0], w[1]).is_some())
    }

    #[test]
    fn test_route_peer_straight_across() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(200.0, 0.0, 50.0, 50.0);
        let path = route_peer(&a, Side::Right, &b, Side::Left, &[], &RoutingConfig::default());
        assert_eq!(path, vec![Point::new(50.0, 25.0), Point::new(200.0, 25.0)]);
    }

    #[test]
    fn test_route_peer_around_obstacle() {
        let a = BoundingBox::new(0.0, 0.0, 50.0, 50.0);
        let b = BoundingBox::new(300.0, 0.0, 50.0, 50.0);
        let wall = BoundingBox::new(150.0, -20.0, 40.0, 90.0);
        let config = RoutingConfig::default();
        let path = route_peer(&a, Side::Right, &b, Side::Left, &[wall], &config);

        assert_eq!(path.first(), Some(&Point::new(50.0, 25.0)));
        assert_eq!(path.last(), Some(&Point::new(300.0, 25.0)));
        assert!(is_orthogonal(&path));
        assert!(path.iter().any(|p| p.y == -40.0));
    }
}
