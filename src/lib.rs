//! Topology Router - orthogonal edge routing for network topology diagrams
//!
//! This library routes edges between positioned boxes: peer edges around
//! obstacles with clearance, hub-and-spoke branches through a container's
//! channel lanes, and rounded-corner path descriptors for the result.
//!
//! # Example
//!
//! ```rust
//! use topology_router::render;
//!
//! let svg = render(r#"
//!     [[nodes]]
//!     id = "a"
//!     x = 0
//!     y = 0
//!     width = 50
//!     height = 50
//!
//!     [[nodes]]
//!     id = "b"
//!     x = 200
//!     y = 0
//!     width = 50
//!     height = 50
//!
//!     [[edges]]
//!     from = "a"
//!     from_side = "right"
//!     to = "b"
//!     to_side = "left"
//! "#).unwrap();
//! assert!(svg.contains("M50,25 L200,25"));
//! ```

pub mod error;
pub mod renderer;
pub mod routing;
pub mod scene;

pub use error::SceneError;
pub use renderer::{render_svg, to_path, SvgConfig};
pub use routing::{
    branch_route, build_channels, direct_route, resolve_collisions, route_peer, BoundingBox,
    ChannelGrid, Point, RoutingConfig, Side,
};
pub use scene::{route_scene, RoutedEdge, RoutedScene, Scene};

use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),
}

impl RenderError {
    /// Format the error against the scene source
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RenderError::Scene(err) => err.format(source, filename),
        }
    }
}

/// Configuration for the complete render pipeline
///
/// `clearance` and `corner_radius` override whatever the scene's own
/// `[routing]` table says.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub svg: SvgConfig,
    pub clearance: Option<f64>,
    pub corner_radius: Option<f64>,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = Some(clearance);
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    fn apply(&self, scene: &mut Scene) {
        if let Some(clearance) = self.clearance {
            scene.routing.clearance = clearance;
        }
        if let Some(radius) = self.corner_radius {
            scene.routing.corner_radius = radius;
        }
    }
}

/// Parse, validate and route a scene with default configuration
pub fn route(source: &str) -> Result<RoutedScene, RenderError> {
    route_with_config(source, &RenderConfig::default())
}

/// Parse, validate and route a scene, applying the overrides in `config`
pub fn route_with_config(source: &str, config: &RenderConfig) -> Result<RoutedScene, RenderError> {
    let mut scene: Scene = source.parse()?;
    config.apply(&mut scene);
    Ok(route_scene(&scene))
}

/// Route a scene and render it as an SVG preview
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Route a scene and render it with custom configuration
///
/// # Example
///
/// ```rust
/// use topology_router::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_corner_radius(4.0)
///     .with_svg(SvgConfig::default().with_viewbox_padding(50.0));
///
/// let svg = render_with_config("", config).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let routed = route_with_config(source, &config)?;
    Ok(render_svg(&routed, &config.svg))
}
