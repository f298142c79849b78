//! Options for the SVG preview of a routed scene

/// How [`render_svg`](super::render_svg) draws a routed scene
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Margin added around the scene bounds so edge detours outside every
    /// box stay visible
    pub viewbox_padding: f64,

    /// Emit an XML declaration so the output can be saved as a `.svg` file
    pub standalone: bool,

    /// One element per line
    pub pretty_print: bool,

    /// Prepended to every class name (`topo-edge`, `topo-peer`, ...)
    pub class_prefix: Option<String>,

    /// Arrowheads on peer edges. Branches never get one.
    pub arrow_markers: bool,

    /// Node titles and edge labels
    pub show_labels: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("topo-".to_string()),
            arrow_markers: true,
            show_labels: true,
        }
    }
}

impl SvgConfig {
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Drop the XML declaration, for embedding the preview in HTML
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    pub fn with_arrow_markers(mut self, arrows: bool) -> Self {
        self.arrow_markers = arrows;
        self
    }

    pub fn with_labels(mut self, labels: bool) -> Self {
        self.show_labels = labels;
        self
    }
}
