//! Configuration for the routing engine

use serde::{Deserialize, Serialize};

/// Tunable distances used when routing a scene
///
/// Any subset of the fields can be given in a scene's `[routing]` table;
/// the rest keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Minimum stand-off between a detour and the obstacle it avoids
    pub clearance: f64,

    /// Length of the perpendicular exit segment at each endpoint
    pub stub_length: f64,

    /// Radius of the rounded corners in the rendered descriptor
    pub corner_radius: f64,

    /// Interior segments shorter than this are merged away when possible
    pub merge_threshold: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            clearance: 20.0,
            stub_length: 20.0,
            corner_radius: 8.0,
            merge_threshold: 6.0,
        }
    }
}

impl RoutingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the obstacle clearance
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    /// Set the endpoint stub length
    pub fn with_stub_length(mut self, length: f64) -> Self {
        self.stub_length = length;
        self
    }

    /// Set the corner radius
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the short-segment merge threshold
    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }
}
