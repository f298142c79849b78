//! Rounded-corner path descriptors for routed edges
//!
//! A routed point list becomes a sequence of [`PathSegment`]s: a move to the
//! first point, a straight run into each corner stopping short of it, a
//! quadratic curve through the corner, and a final straight run to the last
//! point.

use crate::routing::Point;

/// A segment of a rendered edge path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Quadratic Bezier curve through `control` to `end`
    QuadraticTo { control: Point, end: Point },
}

/// A path ready for the drawing surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutedPath {
    pub segments: Vec<PathSegment>,
}

impl RoutedPath {
    /// Smooth the corners of `points` with arcs of at most `corner_radius`.
    ///
    /// Each corner's radius is also capped at half of either adjacent
    /// segment, so neighbouring curves never overlap. A corner next to a
    /// zero-length segment is passed straight through. Fewer than two points
    /// produce an empty path.
    pub fn smoothed(points: &[Point], corner_radius: f64) -> Self {
        if points.len() < 2 {
            return Self::default();
        }

        let radius = corner_radius.max(0.0);
        let mut segments = Vec::with_capacity(points.len() * 2);
        segments.push(PathSegment::MoveTo(points[0]));

        for w in points.windows(3) {
            let (prev, corner, next) = (w[0], w[1], w[2]);
            let d1 = prev.distance(corner);
            let d2 = corner.distance(next);
            if d1 == 0.0 || d2 == 0.0 {
                segments.push(PathSegment::LineTo(corner));
                continue;
            }

            let r = radius.min(d1 / 2.0).min(d2 / 2.0);
            let entry = Point::new(
                corner.x - (corner.x - prev.x) / d1 * r,
                corner.y - (corner.y - prev.y) / d1 * r,
            );
            let exit = Point::new(
                corner.x + (next.x - corner.x) / d2 * r,
                corner.y + (next.y - corner.y) / d2 * r,
            );
            segments.push(PathSegment::LineTo(entry));
            segments.push(PathSegment::QuadraticTo {
                control: corner,
                end: exit,
            });
        }

        segments.push(PathSegment::LineTo(points[points.len() - 1]));
        Self { segments }
    }

    /// Convert to a descriptor string such as `M0,0 L92,0 Q100,0 100,8`
    pub fn to_descriptor(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => d.push_str(&format!("M{},{}", p.x, p.y)),
                PathSegment::LineTo(p) => d.push_str(&format!("L{},{}", p.x, p.y)),
                PathSegment::QuadraticTo { control, end } => d.push_str(&format!(
                    "Q{},{} {},{}",
                    control.x, control.y, end.x, end.y
                )),
            }
        }
        d
    }
}

/// Render `points` as a rounded-corner path descriptor
pub fn to_path(points: &[Point], corner_radius: f64) -> String {
    RoutedPath::smoothed(points, corner_radius).to_descriptor()
}
