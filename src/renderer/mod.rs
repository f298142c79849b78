//! Output for routed scenes
//!
//! `path` turns routed points into rounded-corner descriptors; `svg` draws a
//! whole routed scene as a standalone preview document.

pub mod config;
pub mod path;
pub mod svg;

pub use config::SvgConfig;
pub use path::{to_path, PathSegment, RoutedPath};
pub use svg::render_svg;
