//! Obstacle-unaware orthogonal routing between two stubbed endpoints

use super::types::{is_horizontal_side, Point, Side, AXIS_EPSILON};

/// Build the initial orthogonal candidate path between two endpoints.
///
/// Each stub is a point just outside its owning box in the direction its
/// side faces. The result starts at `src` and ends at `dst` and has 4, 5 or 6
/// points depending on the side axes:
///
/// - horizontal/horizontal or vertical/vertical with aligned stubs: direct
/// - horizontal/horizontal otherwise: Z through the x midpoint of the stubs
/// - vertical/vertical otherwise: Z through the y midpoint of the stubs
/// - mixed: L bending once between the stubs
pub fn direct_route(
    src: Point,
    src_stub: Point,
    src_side: Side,
    dst: Point,
    dst_stub: Point,
    dst_side: Side,
) -> Vec<Point> {
    let src_h = is_horizontal_side(src_side);
    let dst_h = is_horizontal_side(dst_side);

    match (src_h, dst_h) {
        (true, true) => {
            if (src_stub.y - dst_stub.y).abs() < AXIS_EPSILON {
                return vec![src, src_stub, dst_stub, dst];
            }
            let mid_x = (src_stub.x + dst_stub.x) / 2.0;
            vec![
                src,
                src_stub,
                Point::new(mid_x, src_stub.y),
                Point::new(mid_x, dst_stub.y),
                dst_stub,
                dst,
            ]
        }
        (false, false) => {
            if (src_stub.x - dst_stub.x).abs() < AXIS_EPSILON {
                return vec![src, src_stub, dst_stub, dst];
            }
            let mid_y = (src_stub.y + dst_stub.y) / 2.0;
            vec![
                src,
                src_stub,
                Point::new(src_stub.x, mid_y),
                Point::new(dst_stub.x, mid_y),
                dst_stub,
                dst,
            ]
        }
        (true, false) => vec![
            src,
            src_stub,
            Point::new(dst_stub.x, src_stub.y),
            dst_stub,
            dst,
        ],
        (false, true) => vec![
            src,
            src_stub,
            Point::new(src_stub.x, dst_stub.y),
            dst_stub,
            dst,
        ],
    }
}
