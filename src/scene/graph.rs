//! The sentence graph: vertices, groups, edges and adjacency

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::edge::{self, Edge};

use super::drawable::{Drawable, Frame, Group, Image, Vertex};

/// Index of a vertex in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of a group in its graph's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Index of an edge in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// A top-level drawable: an ungrouped vertex or a valid group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DrawableRef {
    Vertex(VertexId),
    Group(GroupId),
}

/// Errors raised while building a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} is not a member of the graph")]
    UnknownVertex(usize),

    #[error("group {0} is not a member of the graph")]
    UnknownGroup(usize),

    #[error("cannot combine an empty set of vertices")]
    EmptyGroup,
}

/// Adjacency structure over the nouns of one sentence
///
/// Ids are plain indices. The drawable accessors ([`top_level_of`],
/// [`drawable`], [`frame`], [`label`] and their setters) index directly and
/// panic on an id this graph did not hand out; [`vertex`] and [`group`] are
/// the checked lookups.
///
/// [`top_level_of`]: SentenceGraph::top_level_of
/// [`drawable`]: SentenceGraph::drawable
/// [`frame`]: SentenceGraph::frame
/// [`label`]: SentenceGraph::label
/// [`vertex`]: SentenceGraph::vertex
/// [`group`]: SentenceGraph::group
#[derive(Debug, Clone, Default)]
pub struct SentenceGraph {
    vertices: Vec<Vertex>,
    groups: Vec<Group>,
    edges: Vec<Edge>,
    /// Per vertex, edges where it is Left, in insertion order
    adjacency: Vec<Vec<EdgeId>>,
    top_level: Vec<DrawableRef>,
}

impl SentenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        id
    }

    pub fn contains(&self, id: VertexId) -> bool {
        id.0 < self.vertices.len()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.0)
    }

    /// Look a vertex up by its noun (first match)
    pub fn find(&self, noun: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.noun == noun)
            .map(VertexId)
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate().map(|(i, v)| (VertexId(i), v))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Edges where `vertex` is Left, in insertion order
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.adjacency
            .get(vertex.0)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&id| (id, &self.edges[id.0]))
    }

    /// Add an edge whose endpoints are already members
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        if let Some(missing) = edge.endpoints().into_iter().find(|v| !self.contains(*v)) {
            return Err(GraphError::UnknownVertex(missing.0));
        }
        let id = EdgeId(self.edges.len());
        self.adjacency[edge.left().0].push(id);
        self.edges.push(edge);
        Ok(id)
    }

    /// Resolve a relative edge through the edge factory and add it if found.
    ///
    /// See [`edge::relative_edge`] for how the adposition lists are consumed.
    pub fn relate(
        &mut self,
        left: VertexId,
        right: VertexId,
        left_adpositions: &mut Vec<String>,
        right_adpositions: &mut Vec<String>,
        right_is_subject: bool,
    ) -> Result<Option<EdgeId>, GraphError> {
        match edge::relative_edge(
            left,
            right,
            left_adpositions,
            right_adpositions,
            right_is_subject,
        ) {
            Some(edge) => self.add_edge(edge).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve an absolute edge through the edge factory and add it if found
    pub fn anchor(&mut self, left: VertexId, phrase: &str) -> Result<Option<EdgeId>, GraphError> {
        match edge::absolute_edge(left, phrase) {
            Some(edge) => self.add_edge(edge).map(Some),
            None => Ok(None),
        }
    }

    /// Combine vertices into a new group owning the composed image.
    ///
    /// Any valid group already holding one of the members is invalidated and
    /// its members join the new group, so re-grouping at a larger scale never
    /// strands a vertex. Members' own images are superseded.
    pub fn combine(
        &mut self,
        members: &[VertexId],
        width: i32,
        height: i32,
        image: Option<Image>,
    ) -> Result<GroupId, GraphError> {
        if members.is_empty() {
            return Err(GraphError::EmptyGroup);
        }
        if let Some(missing) = members.iter().find(|v| !self.contains(**v)) {
            return Err(GraphError::UnknownVertex(missing.0));
        }

        let mut all_members: Vec<VertexId> = Vec::new();
        let mut superseded: Vec<GroupId> = Vec::new();
        for &member in members {
            if let Some(previous) = self.valid_group_of(member) {
                if !superseded.contains(&previous) {
                    superseded.push(previous);
                    all_members.extend(self.groups[previous.0].members.iter().copied());
                }
            }
            all_members.push(member);
        }
        let mut seen = HashSet::new();
        all_members.retain(|v| seen.insert(*v));

        for previous in &superseded {
            debug!("group {} superseded", previous.0);
            self.groups[previous.0].invalidate();
        }

        let id = GroupId(self.groups.len());
        for member in &all_members {
            let vertex = &mut self.vertices[member.0];
            vertex.group = Some(id);
            vertex.supersede_image();
        }
        self.groups
            .push(Group::new(all_members, width, height, image));
        Ok(id)
    }

    /// Mark a group invalid without replacing it.
    ///
    /// Its members are dropped from the top-level set on the next layout.
    pub fn invalidate_group(&mut self, id: GroupId) -> Result<(), GraphError> {
        self.groups
            .get_mut(id.0)
            .ok_or(GraphError::UnknownGroup(id.0))?
            .invalidate();
        Ok(())
    }

    fn valid_group_of(&self, vertex: VertexId) -> Option<GroupId> {
        self.vertices[vertex.0]
            .group
            .filter(|g| self.groups[g.0].is_valid())
    }

    /// The drawable that moves when `vertex` is positioned
    ///
    /// # Panics
    ///
    /// If `vertex` does not belong to this graph.
    pub fn top_level_of(&self, vertex: VertexId) -> DrawableRef {
        match self.valid_group_of(vertex) {
            Some(group) => DrawableRef::Group(group),
            None => DrawableRef::Vertex(vertex),
        }
    }

    /// # Panics
    ///
    /// If `r` does not belong to this graph.
    pub fn drawable(&self, r: DrawableRef) -> &dyn Drawable {
        match r {
            DrawableRef::Vertex(v) => &self.vertices[v.0],
            DrawableRef::Group(g) => &self.groups[g.0],
        }
    }

    pub fn drawable_mut(&mut self, r: DrawableRef) -> &mut dyn Drawable {
        match r {
            DrawableRef::Vertex(v) => &mut self.vertices[v.0],
            DrawableRef::Group(g) => &mut self.groups[g.0],
        }
    }

    /// Copy of a drawable's geometric state
    pub fn frame(&self, r: DrawableRef) -> Frame {
        *self.drawable(r).frame()
    }

    pub fn set_frame(&mut self, r: DrawableRef, frame: Frame) {
        *self.drawable_mut(r).frame_mut() = frame;
    }

    /// Display name: the noun, or the members' nouns joined with `+`
    pub fn label(&self, r: DrawableRef) -> String {
        match r {
            DrawableRef::Vertex(v) => self.vertices[v.0].noun.clone(),
            DrawableRef::Group(g) => self.groups[g.0]
                .members
                .iter()
                .map(|m| self.vertices[m.0].noun.as_str())
                .collect::<Vec<_>>()
                .join("+"),
        }
    }

    /// Recompute the top-level set: each ungrouped vertex, plus each distinct
    /// valid group. Vertices whose group was invalidated are dropped.
    pub fn materialize_groups(&mut self) {
        let mut seen = HashSet::new();
        let mut top_level = Vec::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            match vertex.group {
                None => top_level.push(DrawableRef::Vertex(VertexId(i))),
                Some(g) if self.groups[g.0].is_valid() => {
                    if seen.insert(g) {
                        top_level.push(DrawableRef::Group(g));
                    }
                }
                Some(g) => debug!("dropping '{}': group {} is invalid", vertex.noun, g.0),
            }
        }
        self.top_level = top_level;
    }

    /// Top-level drawables computed by the last layout
    pub fn top_level(&self) -> &[DrawableRef] {
        &self.top_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Anchor, RelativeKind};
    use crate::scene::drawable::ImageSlot;
    use pretty_assertions::assert_eq;

    #[test]
    #[should_panic]
    fn test_foreign_vertex_id_panics() {
        let mut graph = SentenceGraph::new();
        graph.add_vertex(Vertex::new("cat"));
        graph.frame(DrawableRef::Vertex(VertexId(3)));
    }

    fn three() -> (SentenceGraph, VertexId, VertexId, VertexId) {
        let mut graph = SentenceGraph::new();
        let a = graph.add_vertex(Vertex::new("cat"));
        let b = graph.add_vertex(Vertex::new("mat"));
        let c = graph.add_vertex(Vertex::new("hat"));
        (graph, a, b, c)
    }

    #[test]
    fn test_adjacency_preserves_insertion_order() {
        let (mut graph, a, b, c) = three();
        let e1 = graph
            .add_edge(Edge::relative(a, b, RelativeKind::OnTopOf))
            .unwrap();
        let e2 = graph.add_edge(Edge::absolute(b, Anchor::Top)).unwrap();
        let e3 = graph
            .add_edge(Edge::relative(a, c, RelativeKind::Under))
            .unwrap();

        let from_a: Vec<EdgeId> = graph.edges_from(a).map(|(id, _)| id).collect();
        assert_eq!(from_a, vec![e1, e3]);
        let from_b: Vec<EdgeId> = graph.edges_from(b).map(|(id, _)| id).collect();
        assert_eq!(from_b, vec![e2]);
        assert_eq!(graph.edges_from(c).count(), 0);
    }

    #[test]
    fn test_add_edge_rejects_foreign_vertex() {
        let (mut graph, a, _, _) = three();
        let err = graph
            .add_edge(Edge::relative(a, VertexId(9), RelativeKind::In))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex(9));
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_relate_with_unrecognized_phrase_adds_nothing() {
        let (mut graph, a, b, _) = three();
        let mut left = vec!["upside-down-of".to_string()];
        let mut right = Vec::new();
        let added = graph.relate(a, b, &mut left, &mut right, true).unwrap();
        assert_eq!(added, None);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_anchor_adds_absolute_edge() {
        let (mut graph, a, _, _) = three();
        let id = graph.anchor(a, "in the bottom left corner").unwrap();
        assert!(id.is_some());
        assert!(graph.edges()[0].is_absolute());
    }

    #[test]
    fn test_combine_supersedes_images() {
        let mut graph = SentenceGraph::new();
        let a = graph.add_vertex(Vertex::new("cup").with_image(Image::placeholder("cup")));
        let b = graph.add_vertex(Vertex::new("saucer"));

        let g = graph
            .combine(&[a, b], 120, 120, Some(Image::placeholder("cup+saucer")))
            .unwrap();
        assert_eq!(graph.top_level_of(a), DrawableRef::Group(g));
        assert_eq!(graph.vertex(a).unwrap().image_slot(), &ImageSlot::Superseded);
        assert_eq!(graph.label(DrawableRef::Group(g)), "cup+saucer");
    }

    #[test]
    fn test_regrouping_invalidates_previous_group() {
        let (mut graph, a, b, c) = three();
        let small = graph.combine(&[a, b], 100, 100, None).unwrap();
        let large = graph.combine(&[b, c], 200, 200, None).unwrap();

        assert!(!graph.group(small).unwrap().is_valid());
        assert_eq!(graph.group(large).unwrap().members(), &[a, b, c]);

        graph.materialize_groups();
        assert_eq!(graph.top_level(), &[DrawableRef::Group(large)]);
    }

    #[test]
    fn test_materialize_drops_invalidated_members() {
        let (mut graph, a, b, c) = three();
        let g = graph.combine(&[a, b], 100, 100, None).unwrap();
        graph.invalidate_group(g).unwrap();

        graph.materialize_groups();
        assert_eq!(graph.top_level(), &[DrawableRef::Vertex(c)]);
    }

    #[test]
    fn test_combine_errors() {
        let (mut graph, _, _, _) = three();
        assert_eq!(graph.combine(&[], 1, 1, None), Err(GraphError::EmptyGroup));
        assert_eq!(
            graph.combine(&[VertexId(7)], 1, 1, None),
            Err(GraphError::UnknownVertex(7))
        );
        assert_eq!(
            graph.invalidate_group(GroupId(3)),
            Err(GraphError::UnknownGroup(3))
        );
    }
}
