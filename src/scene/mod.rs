//! The sentence graph and the drawables it holds
//!
//! An upstream builder adds one [`Vertex`] per noun, resolves adpositions into
//! edges with [`SentenceGraph::relate`] and [`SentenceGraph::anchor`], and may
//! [`combine`](SentenceGraph::combine) vertices into groups. The layout engine
//! then positions the graph in place.

pub mod drawable;
pub mod graph;

pub use drawable::{Drawable, Frame, Group, Image, ImageSlot, Vertex, NOMINAL_SIZE};
pub use graph::{DrawableRef, EdgeId, GraphError, GroupId, SentenceGraph, VertexId};
