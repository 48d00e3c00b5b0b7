//! Plain-text dump of a layout, one drawable per line

use std::fmt::Write;

use crate::scene::graph::SentenceGraph;

use super::svg::paint_order;

/// List positioned top-level drawables back to front as
/// `label x y width height z [fixed]`.
pub fn render_text(graph: &SentenceGraph) -> String {
    let mut out = String::new();
    for r in paint_order(graph) {
        let frame = graph.frame(r);
        let Some(b) = frame.bounds() else {
            continue;
        };
        let _ = write!(
            out,
            "{} {} {} {} {} z={}",
            graph.label(r),
            b.x,
            b.y,
            b.width,
            b.height,
            frame.z_index
        );
        if frame.fixed {
            out.push_str(" fixed");
        }
        out.push('\n');
    }
    out
}
