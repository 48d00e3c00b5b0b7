//! Positioning edges between the nouns of a sentence
//!
//! An edge is either *relative* (a two-body rule such as "Right sits on top of
//! Left") or *absolute* (Left is bound to an anchor on the canvas). Edges are
//! plain data; [`Edge::positionate`] applies the rule to the top-level
//! drawables of its endpoints inside a [`SentenceGraph`].

pub mod absolute;
pub mod factory;
pub mod relative;

use crate::layout::types::Canvas;
use crate::scene::graph::{DrawableRef, SentenceGraph, VertexId};

pub use absolute::{resolve_conflict, AnchorClaim, Resolution, Side};
pub use factory::{absolute_edge, canonicalize, relative_edge, relative_kind};

/// Horizontal half of a corner anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalPlace {
    Left,
    Right,
}

/// Vertical half of a corner anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalPlace {
    Top,
    Bottom,
}

/// Precedence tag used when two canvas-anchored drawables collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceType {
    Vertical,
    Horizontal,
    Corner,
    Middle,
}

impl PlaceType {
    /// Corner > Vertical = Horizontal > Middle
    pub fn precedence(self) -> u8 {
        match self {
            PlaceType::Corner => 2,
            PlaceType::Vertical | PlaceType::Horizontal => 1,
            PlaceType::Middle => 0,
        }
    }
}

/// A canvas-relative placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Top,
    Bottom,
    /// A corner, or one side of the canvas when only one axis is given
    Corner {
        horizontal: Option<HorizontalPlace>,
        vertical: Option<VerticalPlace>,
    },
    Middle,
}

impl Anchor {
    pub fn corner(horizontal: HorizontalPlace, vertical: VerticalPlace) -> Self {
        Anchor::Corner {
            horizontal: Some(horizontal),
            vertical: Some(vertical),
        }
    }

    pub fn place_type(&self) -> PlaceType {
        match self {
            Anchor::Top | Anchor::Bottom => PlaceType::Vertical,
            Anchor::Corner {
                horizontal: Some(_),
                vertical: Some(_),
            } => PlaceType::Corner,
            Anchor::Corner {
                horizontal: Some(_),
                vertical: None,
            } => PlaceType::Horizontal,
            Anchor::Corner {
                horizontal: None,
                vertical: Some(_),
            } => PlaceType::Vertical,
            Anchor::Corner {
                horizontal: None,
                vertical: None,
            }
            | Anchor::Middle => PlaceType::Middle,
        }
    }

    /// Horizontal side this anchor binds to, if any
    pub fn horizontal(&self) -> Option<HorizontalPlace> {
        match self {
            Anchor::Corner { horizontal, .. } => *horizontal,
            Anchor::Top | Anchor::Bottom | Anchor::Middle => None,
        }
    }

    /// Vertical side this anchor binds to, if any
    pub fn vertical(&self) -> Option<VerticalPlace> {
        match self {
            Anchor::Top => Some(VerticalPlace::Top),
            Anchor::Bottom => Some(VerticalPlace::Bottom),
            Anchor::Corner { vertical, .. } => *vertical,
            Anchor::Middle => None,
        }
    }
}

/// Two-body placement rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeKind {
    /// Right rests above Left and is painted over it
    OnTopOf,
    /// Right hangs below Left. Mirrors [`RelativeKind::OnTopOf`] in geometry
    /// only: the two share a z-index, since neither hides the other
    Under,
    In,
    /// Behind, with an offset silhouette
    Behind,
    /// Behind, exactly covered
    FullyBehind,
    ToLeftOf,
    ToRightOf,
    InMiddleOf,
}

impl RelativeKind {
    /// Kinds whose placement makes the two drawables overlap on purpose
    pub fn overlaps_by_design(self) -> bool {
        matches!(
            self,
            RelativeKind::In
                | RelativeKind::Behind
                | RelativeKind::FullyBehind
                | RelativeKind::InMiddleOf
        )
    }
}

/// A relation between two vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeEdge {
    pub left: VertexId,
    pub right: VertexId,
    pub kind: RelativeKind,
    /// Second reference for "between"/"among" relations
    pub reference: Option<VertexId>,
}

/// A vertex bound to the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteEdge {
    pub left: VertexId,
    pub anchor: Anchor,
}

/// A positioning edge of the sentence graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edge {
    Relative(RelativeEdge),
    Absolute(AbsoluteEdge),
}

impl Edge {
    pub fn relative(left: VertexId, right: VertexId, kind: RelativeKind) -> Self {
        Edge::Relative(RelativeEdge {
            left,
            right,
            kind,
            reference: None,
        })
    }

    pub fn absolute(left: VertexId, anchor: Anchor) -> Self {
        Edge::Absolute(AbsoluteEdge { left, anchor })
    }

    /// Attach the second reference of an in-the-middle-of relation.
    ///
    /// Has no effect on other edges.
    pub fn with_reference(mut self, reference: VertexId) -> Self {
        if let Edge::Relative(RelativeEdge {
            kind: RelativeKind::InMiddleOf,
            reference: slot,
            ..
        }) = &mut self
        {
            *slot = Some(reference);
        }
        self
    }

    pub fn left(&self) -> VertexId {
        match self {
            Edge::Relative(e) => e.left,
            Edge::Absolute(e) => e.left,
        }
    }

    /// `None` iff the edge is absolute
    pub fn right(&self) -> Option<VertexId> {
        match self {
            Edge::Relative(e) => Some(e.right),
            Edge::Absolute(_) => None,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Edge::Absolute(_))
    }

    pub fn place_type(&self) -> Option<PlaceType> {
        match self {
            Edge::Absolute(e) => Some(e.anchor.place_type()),
            Edge::Relative(_) => None,
        }
    }

    /// Vertices that must be placed before this edge can place its Left
    pub fn dependencies(&self) -> Vec<VertexId> {
        match self {
            Edge::Relative(e) => std::iter::once(e.right).chain(e.reference).collect(),
            Edge::Absolute(_) => Vec::new(),
        }
    }

    /// Every vertex the edge mentions
    pub fn endpoints(&self) -> Vec<VertexId> {
        std::iter::once(self.left()).chain(self.dependencies()).collect()
    }

    /// Apply this edge's rule, writing the unpositioned side(s).
    ///
    /// Rules act on the top-level drawable of each endpoint, so a grouped
    /// vertex moves its group. Returns whether anything was placed.
    pub fn positionate(&self, graph: &mut SentenceGraph, canvas: Canvas) -> bool {
        match self {
            Edge::Absolute(edge) => {
                let target = graph.top_level_of(edge.left);
                let mut frame = graph.frame(target);
                if frame.is_positioned() {
                    return false;
                }
                frame.position = Some(edge.anchor.place(&frame, canvas));
                frame.fixed = true;
                graph.set_frame(target, frame);
                true
            }
            Edge::Relative(edge) => {
                let left = graph.top_level_of(edge.left);
                let right = graph.top_level_of(edge.right);
                if left == right {
                    return false;
                }
                let reference = edge
                    .reference
                    .map(|v| graph.top_level_of(v))
                    .filter(|r: &DrawableRef| *r != left && *r != right)
                    .and_then(|r| graph.frame(r).bounds());

                let mut left_frame = graph.frame(left);
                let mut right_frame = graph.frame(right);
                let placed = edge
                    .kind
                    .apply(&mut left_frame, &mut right_frame, reference);
                if placed {
                    graph.set_frame(left, left_frame);
                    graph.set_frame(right, right_frame);
                }
                placed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Point;
    use crate::scene::drawable::Vertex;

    #[test]
    fn test_place_type_precedence() {
        assert!(PlaceType::Corner.precedence() > PlaceType::Vertical.precedence());
        assert_eq!(
            PlaceType::Vertical.precedence(),
            PlaceType::Horizontal.precedence()
        );
        assert!(PlaceType::Horizontal.precedence() > PlaceType::Middle.precedence());
    }

    #[test]
    fn test_partial_corner_place_types() {
        let left_side = Anchor::Corner {
            horizontal: Some(HorizontalPlace::Left),
            vertical: None,
        };
        let top_side = Anchor::Corner {
            horizontal: None,
            vertical: Some(VerticalPlace::Top),
        };
        assert_eq!(left_side.place_type(), PlaceType::Horizontal);
        assert_eq!(top_side.place_type(), PlaceType::Vertical);
        assert_eq!(
            Anchor::corner(HorizontalPlace::Right, VerticalPlace::Bottom).place_type(),
            PlaceType::Corner
        );
    }

    #[test]
    fn test_right_is_none_only_for_absolute() {
        let a = VertexId(0);
        let b = VertexId(1);
        let rel = Edge::relative(a, b, RelativeKind::OnTopOf);
        let abs = Edge::absolute(a, Anchor::Top);
        assert_eq!(rel.right(), Some(b));
        assert!(!rel.is_absolute());
        assert_eq!(abs.right(), None);
        assert!(abs.is_absolute());
        assert_eq!(abs.place_type(), Some(PlaceType::Vertical));
    }

    #[test]
    fn test_with_reference_only_for_in_middle_of() {
        let (a, b, c) = (VertexId(0), VertexId(1), VertexId(2));
        let between = Edge::relative(a, b, RelativeKind::InMiddleOf).with_reference(c);
        assert_eq!(between.dependencies(), vec![b, c]);

        let on = Edge::relative(a, b, RelativeKind::OnTopOf).with_reference(c);
        assert_eq!(on.dependencies(), vec![b]);
    }

    #[test]
    fn test_absolute_positionate_marks_fixed() {
        let mut graph = SentenceGraph::new();
        let sun = graph.add_vertex(Vertex::new("sun").with_size(100, 50));
        let edge = Edge::absolute(sun, Anchor::Top);

        assert!(edge.positionate(&mut graph, Canvas::new(800, 600)));
        let frame = graph.frame(DrawableRef::Vertex(sun));
        assert_eq!(frame.position, Some(Point::new(350, 0)));
        assert!(frame.fixed);

        // already positioned: no-op
        assert!(!edge.positionate(&mut graph, Canvas::new(800, 600)));
    }

    #[test]
    fn test_relative_positionate_within_same_group_is_noop() {
        let mut graph = SentenceGraph::new();
        let a = graph.add_vertex(Vertex::new("cup"));
        let b = graph.add_vertex(Vertex::new("saucer"));
        graph.combine(&[a, b], 100, 120, None).unwrap();

        let edge = Edge::relative(b, a, RelativeKind::OnTopOf);
        assert!(!edge.positionate(&mut graph, Canvas::new(800, 600)));
    }
}
