//! Configuration for SVG preview rendering

/// How a laid-out scene is written as SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Margin kept around the canvas in the viewBox
    pub padding: i32,

    /// Emit a complete document with an XML declaration rather than a
    /// fragment meant for embedding
    pub standalone: bool,

    /// One element per line, indented by nesting
    pub pretty_print: bool,

    /// Prefix for CSS class names ("sl-" gives "sl-drawable")
    pub class_prefix: Option<String>,

    /// Print each drawable's noun over it
    pub show_labels: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: 20,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("sl-".to_string()),
            show_labels: true,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding.max(0);
        self
    }

    /// Single-line fragment without the XML declaration
    pub fn fragment(mut self) -> Self {
        self.standalone = false;
        self.pretty_print = false;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }
}
