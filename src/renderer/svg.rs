//! SVG generation from a laid-out sentence graph

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::layout::types::{BoundingBox, Canvas};
use crate::scene::drawable::Image;
use crate::scene::graph::{DrawableRef, SentenceGraph};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add default styling for placeholder boxes and labels
    pub fn add_default_styles(&mut self) {
        let prefix = self.prefix();
        self.styles.push(format!(
            ".{prefix}placeholder {{ fill: #f4f4f4; stroke: #999; stroke-dasharray: 4 2; }} \
             .{prefix}fixed > .{prefix}placeholder {{ stroke: #c33; }} \
             .{prefix}label {{ font: 12px sans-serif; fill: #333; }}"
        ));
    }

    /// Add a dashed box standing in for a drawable without image data
    pub fn add_placeholder(&mut self, bounds: &BoundingBox) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}placeholder" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            prefix,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        ));
    }

    /// Add an image element with its data inlined as a base64 data URI
    pub fn add_image(&mut self, image: &Image, bounds: &BoundingBox) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<image class="{}image" x="{}" y="{}" width="{}" height="{}" href="{}"/>"#,
            self.indent_str(),
            prefix,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            data_uri(image)
        ));
    }

    /// Add a centered label
    pub fn add_label(&mut self, text: &str, bounds: &BoundingBox) {
        let prefix = self.prefix();
        let center = bounds.center();
        self.elements.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            center.x,
            center.y,
            escape_xml(text)
        ));
    }

    /// Open a group element for one drawable
    pub fn start_group(&mut self, id: &str, classes: &[String], z_index: i32) {
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };
        self.elements.push(format!(
            r#"{}<g id="{}"{} data-z="{}">"#,
            self.indent_str(),
            escape_xml(id),
            class_attr,
            z_index
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Finish the document around `viewbox`, widened by the configured padding
    pub fn build(self, viewbox: BoundingBox) -> String {
        let pad = self.config.padding;
        let nl = self.newline();
        let indent = if self.config.pretty_print { "  " } else { "" };

        let mut svg = String::new();
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">{nl}"#,
            viewbox.x - pad,
            viewbox.y - pad,
            viewbox.width + 2 * pad,
            viewbox.height + 2 * pad,
        ));

        if !self.styles.is_empty() {
            svg.push_str(&format!("{indent}<style>{nl}"));
            for style in &self.styles {
                svg.push_str(&format!("{indent}{indent}{style}{nl}"));
            }
            svg.push_str(&format!("{indent}</style>{nl}"));
        }

        for element in &self.elements {
            svg.push_str(element);
            svg.push_str(nl);
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Render the top-level drawables of a laid-out graph.
///
/// Drawables are painted in ascending z-index, ties in top-level order, so
/// later elements cover earlier ones. Unpositioned drawables are skipped.
pub fn render_svg(graph: &SentenceGraph, canvas: Canvas, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_default_styles();

    for r in paint_order(graph) {
        render_drawable(graph, r, config, &mut builder);
    }

    builder.build(canvas.bounds())
}

/// Positioned top-level drawables sorted back to front
pub fn paint_order(graph: &SentenceGraph) -> Vec<DrawableRef> {
    let mut order: Vec<DrawableRef> = graph
        .top_level()
        .iter()
        .copied()
        .filter(|r| graph.frame(*r).is_positioned())
        .collect();
    order.sort_by_key(|r| graph.frame(*r).z_index);
    order
}

fn render_drawable(
    graph: &SentenceGraph,
    r: DrawableRef,
    config: &SvgConfig,
    builder: &mut SvgBuilder,
) {
    let frame = graph.frame(r);
    let Some(bounds) = frame.bounds() else {
        return;
    };
    let label = graph.label(r);

    let prefix = builder.prefix();
    let mut classes = vec![format!("{}drawable", prefix)];
    match r {
        DrawableRef::Vertex(_) => classes.push(format!("{}vertex", prefix)),
        DrawableRef::Group(_) => classes.push(format!("{}group", prefix)),
    }
    if frame.fixed {
        classes.push(format!("{}fixed", prefix));
    }

    builder.start_group(&label, &classes, frame.z_index);
    match graph.drawable(r).image().filter(|image| !image.is_empty()) {
        Some(image) => builder.add_image(image, &bounds),
        None => builder.add_placeholder(&bounds),
    }
    if config.show_labels {
        builder.add_label(&label, &bounds);
    }
    builder.end_group();
}

fn data_uri(image: &Image) -> String {
    format!("data:{};base64,{}", image.mime, STANDARD.encode(&image.data))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Point;
    use crate::scene::drawable::Vertex;
    use crate::scene::graph::VertexId;

    fn place(graph: &mut SentenceGraph, v: VertexId, x: i32, y: i32, z: i32) {
        let r = DrawableRef::Vertex(v);
        let mut frame = graph.frame(r);
        frame.position = Some(Point::new(x, y));
        frame.z_index = z;
        graph.set_frame(r, frame);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_data_uri() {
        let image = Image::new("dot", "image/png", vec![1u8, 2, 3]);
        assert_eq!(data_uri(&image), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_paint_order_follows_z_index() {
        let mut graph = SentenceGraph::new();
        let top = graph.add_vertex(Vertex::new("ball"));
        let bottom = graph.add_vertex(Vertex::new("table"));
        let hidden = graph.add_vertex(Vertex::new("ghost"));
        place(&mut graph, top, 0, 0, 1);
        place(&mut graph, bottom, 0, 100, 0);
        graph.materialize_groups();

        let order = paint_order(&graph);
        assert_eq!(
            order,
            vec![DrawableRef::Vertex(bottom), DrawableRef::Vertex(top)]
        );
        assert!(!order.contains(&DrawableRef::Vertex(hidden)));
    }

    #[test]
    fn test_render_placeholder_and_image() {
        let mut graph = SentenceGraph::new();
        let cat = graph.add_vertex(Vertex::new("cat"));
        let dot = graph.add_vertex(
            Vertex::new("dot").with_image(Image::new("dot", "image/png", vec![1u8, 2, 3])),
        );
        place(&mut graph, cat, 0, 0, 0);
        place(&mut graph, dot, 200, 0, 0);
        graph.materialize_groups();

        let svg = render_svg(&graph, Canvas::new(400, 300), &SvgConfig::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="-20 -20 440 340""#));
        assert!(svg.contains(r#"<g id="cat" class="sl-drawable sl-vertex" data-z="0">"#));
        assert!(svg.contains(r#"class="sl-placeholder" x="0" y="0" width="100" height="100""#));
        assert!(svg.contains(r#"href="data:image/png;base64,AQID""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_compact_fragment() {
        let mut graph = SentenceGraph::new();
        let sun = graph.add_vertex(Vertex::new("sun").with_size(40, 40));
        place(&mut graph, sun, 10, 0, 0);
        graph.materialize_groups();

        let config = SvgConfig {
            class_prefix: None,
            ..SvgConfig::new().fragment().with_labels(false).with_padding(0)
        };
        let svg = render_svg(&graph, Canvas::new(60, 40), &config);
        let body = svg.split("</style>").nth(1).unwrap_or_default();
        insta::assert_snapshot!(body, @r#"<g id="sun" class="drawable vertex" data-z="0"><rect class="placeholder" x="10" y="0" width="40" height="40"/></g></svg>"#);
    }
}
