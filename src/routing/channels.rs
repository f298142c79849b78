//! Routing lanes derived from a container and its rows of children
//!
//! Child placement upstream lays rows out at a fixed top padding and gap, so
//! a child's row can be recovered from its y coordinate alone.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{round_half_up, BoundingBox};

/// Offset of the top lane below the container's top edge (clears the header)
pub const HEADER_LANE_OFFSET: f64 = 38.0;

/// Space between the container's top edge and its first row of children
pub const ROW_TOP_PADDING: f64 = 70.0;

/// Vertical gap between consecutive rows of children
pub const ROW_GAP: f64 = 40.0;

/// Inset of the left and right vertical lanes from the container's sides
pub const LANE_MARGIN: f64 = 20.0;

/// Shared lanes inside one container
///
/// Only [`build_channels`] creates a grid, so there is always a top lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelGrid {
    horizontal: Vec<f64>,
    pub left: f64,
    pub center: f64,
    pub right: f64,
}

impl ChannelGrid {
    /// Ascending lane y coordinates; the first is the top lane
    pub fn horizontal(&self) -> &[f64] {
        &self.horizontal
    }

    /// The lane just under the container header
    pub fn top_lane(&self) -> f64 {
        self.horizontal[0]
    }

    /// Vertical lanes in left, center, right order
    pub fn vertical(&self) -> [f64; 3] {
        [self.left, self.center, self.right]
    }
}

/// Row index of `child` inside `container`
pub fn row_index(child: &BoundingBox, container: &BoundingBox) -> i64 {
    round_half_up((child.y - container.y - ROW_TOP_PADDING) / (child.height + ROW_GAP)) as i64
}

/// Derive the lane grid for `container` from its direct `children`.
///
/// One horizontal lane sits under the header, plus one halfway across each
/// gap between adjacent occupied rows. All lane coordinates are rounded.
pub fn build_channels(container: &BoundingBox, children: &[BoundingBox]) -> ChannelGrid {
    let mut horizontal = vec![round_half_up(container.y + HEADER_LANE_OFFSET)];

    let mut rows: BTreeMap<i64, Vec<&BoundingBox>> = BTreeMap::new();
    for child in children {
        rows.entry(row_index(child, container)).or_default().push(child);
    }

    let rows: Vec<_> = rows.values().collect();
    for pair in rows.windows(2) {
        let row_bottom = pair[0]
            .iter()
            .map(|c| c.bottom())
            .fold(f64::NEG_INFINITY, f64::max);
        let next_row_top = pair[1].iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        horizontal.push(round_half_up((row_bottom + next_row_top) / 2.0));
    }

    ChannelGrid {
        horizontal,
        left: round_half_up(container.x + LANE_MARGIN),
        center: round_half_up(container.x + container.width / 2.0),
        right: round_half_up(container.right() - LANE_MARGIN),
    }
}
