//! Core geometry types for the routing engine

use serde::{Deserialize, Serialize};

/// Two points closer than this on both axes are treated as the same point.
pub const DEDUPE_EPSILON: f64 = 0.5;

/// Tolerance for classifying a segment as horizontal or vertical.
pub const AXIS_EPSILON: f64 = 1.0;

/// A 2D point in the caller's coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Both coordinates lie within `epsilon` of `other`
    pub fn approx_eq(&self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// An axis-aligned rectangle: a node, a container or an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Edge of a box an anchor is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// Left and right sides leave the box along the x axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Direction of travel along an orthogonal segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Classify the segment `a`-`b`, or `None` if it is diagonal.
    ///
    /// A segment short enough to qualify as both is reported as horizontal.
    pub fn of_segment(a: Point, b: Point) -> Option<Orientation> {
        if (a.y - b.y).abs() < AXIS_EPSILON {
            Some(Orientation::Horizontal)
        } else if (a.x - b.x).abs() < AXIS_EPSILON {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }
}

/// Grow a box by `margin` on all four sides
pub fn pad(bounds: &BoundingBox, margin: f64) -> BoundingBox {
    BoundingBox::new(
        bounds.x - margin,
        bounds.y - margin,
        bounds.width + 2.0 * margin,
        bounds.height + 2.0 * margin,
    )
}

/// Check whether the bounding box of segment (x1,y1)-(x2,y2) overlaps `bounds`.
///
/// Exact for axis-aligned segments. Touching edges count as a hit.
pub fn segment_intersects_box(x1: f64, y1: f64, x2: f64, y2: f64, bounds: &BoundingBox) -> bool {
    !(x1.max(x2) < bounds.x
        || x1.min(x2) > bounds.right()
        || y1.max(y2) < bounds.y
        || y1.min(y2) > bounds.bottom())
}

/// True for `Left`/`Right` attachments
pub fn is_horizontal_side(side: Side) -> bool {
    side.is_horizontal()
}

/// Midpoint of the given edge of a box
pub fn anchor_point(bounds: &BoundingBox, side: Side) -> Point {
    match side {
        Side::Top => Point::new(bounds.x + bounds.width / 2.0, bounds.y),
        Side::Bottom => Point::new(bounds.x + bounds.width / 2.0, bounds.bottom()),
        Side::Left => Point::new(bounds.x, bounds.y + bounds.height / 2.0),
        Side::Right => Point::new(bounds.right(), bounds.y + bounds.height / 2.0),
    }
}

/// Point `length` units outside the box, in the direction `side` faces
pub fn stub_point(anchor: Point, side: Side, length: f64) -> Point {
    match side {
        Side::Top => Point::new(anchor.x, anchor.y - length),
        Side::Bottom => Point::new(anchor.x, anchor.y + length),
        Side::Left => Point::new(anchor.x - length, anchor.y),
        Side::Right => Point::new(anchor.x + length, anchor.y),
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_expands_all_sides() {
        let b = BoundingBox::new(100.0, 200.0, 50.0, 30.0);
        assert_eq!(pad(&b, 10.0), BoundingBox::new(90.0, 190.0, 70.0, 50.0));
    }

    #[test]
    fn test_segment_through_box_hits() {
        let b = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        assert!(segment_intersects_box(0.0, 100.0, 200.0, 100.0, &b));
        assert!(segment_intersects_box(100.0, 0.0, 100.0, 200.0, &b));
    }

    #[test]
    fn test_segment_outside_box_misses() {
        let b = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        assert!(!segment_intersects_box(0.0, 10.0, 200.0, 10.0, &b));
        assert!(!segment_intersects_box(200.0, 0.0, 200.0, 200.0, &b));
    }

    #[test]
    fn test_segment_touching_edge_hits() {
        let b = BoundingBox::new(50.0, 50.0, 100.0, 100.0);
        assert!(segment_intersects_box(0.0, 50.0, 200.0, 50.0, &b));
    }

    #[test]
    fn test_horizontal_sides() {
        assert!(is_horizontal_side(Side::Left));
        assert!(is_horizontal_side(Side::Right));
        assert!(!is_horizontal_side(Side::Top));
        assert!(!is_horizontal_side(Side::Bottom));
    }

    #[test]
    fn test_anchor_points() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(anchor_point(&b, Side::Top), Point::new(50.0, 0.0));
        assert_eq!(anchor_point(&b, Side::Bottom), Point::new(50.0, 50.0));
        assert_eq!(anchor_point(&b, Side::Left), Point::new(0.0, 25.0));
        assert_eq!(anchor_point(&b, Side::Right), Point::new(100.0, 25.0));
    }

    #[test]
    fn test_stub_leaves_box() {
        let b = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let right = anchor_point(&b, Side::Right);
        assert_eq!(stub_point(right, Side::Right, 20.0), Point::new(120.0, 25.0));
        let top = anchor_point(&b, Side::Top);
        assert_eq!(stub_point(top, Side::Top, 20.0), Point::new(50.0, -20.0));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(0.4), 0.0);
    }

    #[test]
    fn test_side_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            side: Side,
        }
        let w: Wrapper = toml::from_str(r#"side = "bottom""#).unwrap();
        assert_eq!(w.side, Side::Bottom);
    }
}
