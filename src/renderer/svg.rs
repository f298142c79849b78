//! SVG preview of a routed scene

use crate::routing::BoundingBox;
use crate::scene::{EdgeKind, NodeLayout, RoutedEdge, RoutedScene};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    nodes: Vec<String>,
    edges: Vec<String>,
    labels: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            nodes: vec![],
            edges: vec![],
            labels: vec![],
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the arrowhead marker used by peer edges
    pub fn add_arrow_marker(&mut self) {
        let prefix = self.prefix();
        self.defs.push(format!(
            r#"<marker id="{prefix}arrow" viewBox="0 0 10 10" refX="8" refY="5" markerWidth="4" markerHeight="4" markerUnits="strokeWidth" orient="auto"><path d="M0,0 L10,5 L0,10 Z" fill="context-stroke"/></marker>"#
        ));
    }

    /// Add a box for a container or leaf node
    pub fn add_node(&mut self, id: &str, bounds: &BoundingBox, is_container: bool) {
        let prefix = self.prefix();
        let kind = if is_container { "container" } else { "node" };
        self.nodes.push(format!(
            r#"{}<rect id="{}" class="{}{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            escape_xml(id),
            prefix,
            kind,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        ));
    }

    /// Add a routed edge from its path descriptor
    pub fn add_edge(&mut self, d: &str, kind: EdgeKind, marker_end: bool) {
        let prefix = self.prefix();
        let kind = match kind {
            EdgeKind::Peer => "peer",
            EdgeKind::Branch => "branch",
        };
        let marker = if marker_end {
            format!(r#" marker-end="url(#{prefix}arrow)""#)
        } else {
            String::new()
        };

        self.edges.push(format!(
            r#"{}<path class="{}edge {}{}" d="{}" fill="none"{}/>"#,
            self.indent_str(),
            prefix,
            prefix,
            kind,
            d,
            marker
        ));
    }

    /// Add a text label anchored at (x, y)
    pub fn add_label(&mut self, text: &str, x: f64, y: f64) {
        let prefix = self.prefix();
        self.labels.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            escape_xml(text)
        ));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            viewbox.x - padding,
            viewbox.y - padding,
            viewbox.width + 2.0 * padding,
            viewbox.height + 2.0 * padding
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(self.indent_str());
            svg.push_str("<defs>");
            for def in &self.defs {
                svg.push_str(def);
            }
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        // Boxes first, edges on top of them, labels on top of everything
        for line in self.nodes.iter().chain(&self.edges).chain(&self.labels) {
            svg.push_str(line);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a routed scene to an SVG string
pub fn render_svg(scene: &RoutedScene, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    let arrows = config.arrow_markers && scene.edges.iter().any(|e| e.kind == EdgeKind::Peer);
    if arrows {
        builder.add_arrow_marker();
    }

    for node in &scene.nodes {
        render_node(node, config, &mut builder);
    }
    for edge in &scene.edges {
        render_edge(edge, config, &mut builder);
    }

    builder.build(scene.bounds)
}

fn render_node(node: &NodeLayout, config: &SvgConfig, builder: &mut SvgBuilder) {
    builder.add_node(&node.id, &node.bounds, node.is_container);
    if !config.show_labels {
        return;
    }
    if let Some(label) = &node.label {
        // Containers carry their title in the header strip, leaves centered
        let (x, y) = if node.is_container {
            (node.bounds.x + 10.0, node.bounds.y + 20.0)
        } else {
            let c = node.bounds.center();
            (c.x, c.y)
        };
        builder.add_label(label, x, y);
    }
}

fn render_edge(edge: &RoutedEdge, config: &SvgConfig, builder: &mut SvgBuilder) {
    if edge.d.is_empty() {
        return;
    }
    let marker = config.arrow_markers && edge.kind == EdgeKind::Peer;
    builder.add_edge(&edge.d, edge.kind, marker);

    if !config.show_labels {
        return;
    }
    if let (Some(label), Some(mid)) = (&edge.label, edge.points.get(edge.points.len() / 2)) {
        builder.add_label(label, mid.x + 6.0, mid.y - 6.0);
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
