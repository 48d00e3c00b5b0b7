//! Scene Layout - spatial layout for sentence graphs
//!
//! This library places the nouns of a sentence on a 2D canvas. Nouns are
//! vertices of a [`SentenceGraph`]; adposition phrases ("on top of", "in the
//! upper left corner") become positioning edges. [`layout::positionate`]
//! resolves the edges into a non-overlapping arrangement.
//!
//! # Example
//!
//! ```rust
//! use scene_layout::{arrange, LayoutConfig, SentenceGraph, Vertex};
//!
//! let mut graph = SentenceGraph::new();
//! let table = graph.add_vertex(Vertex::new("table").with_size(200, 100));
//! let ball = graph.add_vertex(Vertex::new("ball"));
//! graph
//!     .relate(table, ball, &mut vec![], &mut vec!["on".into()], false)
//!     .unwrap();
//!
//! let report = arrange(&mut graph, 800, 600, &LayoutConfig::new().with_seed(1)).unwrap();
//! assert!(report.converged);
//! ```

pub mod edge;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod scene;
pub mod scene_file;

pub use edge::{Anchor, Edge, PlaceType, RelativeKind};
pub use error::Error;
pub use layout::{positionate, Canvas, LayoutConfig, LayoutError, LayoutReport, LintWarning};
pub use renderer::{render_svg, render_text, SvgConfig};
pub use scene::{Drawable, DrawableRef, GraphError, Image, SentenceGraph, Vertex, VertexId};
pub use scene_file::{SceneFile, SceneFileError};

use log::warn;

/// Lay out `graph` and run the lint checks on the result.
///
/// Lint findings are logged as warnings; the report still comes back so the
/// caller can decide whether a best-effort layout is good enough.
pub fn arrange(
    graph: &mut SentenceGraph,
    width: i32,
    height: i32,
    config: &LayoutConfig,
) -> Result<LayoutReport, LayoutError> {
    let report = positionate(graph, width, height, config)?;
    for warning in layout::lint::check(graph, Canvas::new(width, height)) {
        warn!("{}", warning);
    }
    Ok(report)
}

/// Load a scene file, lay it out and render it as SVG
pub fn render_scene(scene: &SceneFile, config: &LayoutConfig) -> Result<String, Error> {
    let mut graph = scene.build()?;
    let canvas = scene.canvas();
    arrange(&mut graph, canvas.width, canvas.height, config)?;
    Ok(render_svg(&graph, canvas, &SvgConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scene() {
        let scene = SceneFile::from_toml_str(
            r#"
            [[vertex]]
            name = "sun"
            [[anchor]]
            vertex = "sun"
            phrase = "in the upper right corner"
            "#,
        )
        .unwrap();
        let svg = render_scene(&scene, &LayoutConfig::new().with_seed(3)).unwrap();
        assert!(svg.contains(r#"<g id="sun" class="sl-drawable sl-vertex sl-fixed""#));
        assert!(svg.contains(r#"x="700" y="0""#));
    }

    #[test]
    fn test_render_scene_invalid_canvas() {
        let scene = SceneFile::from_toml_str("[canvas]\nwidth = 0\nheight = 10\n").unwrap();
        let err = render_scene(&scene, &LayoutConfig::new()).unwrap_err();
        assert!(matches!(err, Error::Layout(LayoutError::InvalidCanvas { .. })));
    }
}
