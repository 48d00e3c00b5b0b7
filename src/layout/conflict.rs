//! Overlap detection and resolution between top-level drawables

use std::collections::HashMap;

use log::trace;

use crate::edge::{resolve_conflict, Anchor, AnchorClaim, Edge, Side};
use crate::scene::graph::{DrawableRef, SentenceGraph};

use super::types::{BoundingBox, Canvas, Point};

/// Sets of top-level drawables joined by relations that overlap on purpose
/// ("in", "behind", ...). Members of one cluster never conflict with each
/// other and move together when the loop shifts one of them.
#[derive(Debug, Clone, Default)]
pub struct Attachments {
    parent: HashMap<DrawableRef, DrawableRef>,
}

impl Attachments {
    pub fn from_graph(graph: &SentenceGraph) -> Self {
        let mut attachments = Self::default();
        for edge in graph.edges() {
            if let Edge::Relative(rel) = edge {
                if rel.kind.overlaps_by_design() {
                    let left = graph.top_level_of(rel.left);
                    attachments.join(left, graph.top_level_of(rel.right));
                    // the midpoint only holds while both references move together
                    if let Some(reference) = rel.reference {
                        attachments.join(left, graph.top_level_of(reference));
                    }
                }
            }
        }
        attachments
    }

    fn root(&self, mut r: DrawableRef) -> DrawableRef {
        while let Some(&parent) = self.parent.get(&r) {
            if parent == r {
                break;
            }
            r = parent;
        }
        r
    }

    fn join(&mut self, a: DrawableRef, b: DrawableRef) {
        let (ra, rb) = (self.root(a), self.root(b));
        if ra != rb {
            // smaller ref becomes the root so clusters don't depend on edge order
            let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent.insert(child, root);
            self.parent.entry(root).or_insert(root);
        }
    }

    pub fn attached(&self, a: DrawableRef, b: DrawableRef) -> bool {
        self.root(a) == self.root(b)
    }

    /// `r` and every drawable attached to it, among `candidates`
    pub fn cluster(&self, r: DrawableRef, candidates: &[DrawableRef]) -> Vec<DrawableRef> {
        let root = self.root(r);
        candidates
            .iter()
            .copied()
            .filter(|c| *c == r || self.root(*c) == root)
            .collect()
    }
}

/// Tallies for one pass over all pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub conflicts: usize,
    /// Free drawables pushed right
    pub shifts: usize,
    /// Drawables moved by anchor precedence
    pub relocations: usize,
}

/// Resolves overlaps between the top-level drawables of a graph
#[derive(Debug, Clone)]
pub struct ConflictResolver {
    canvas: Canvas,
    spacing: i32,
    anchors: HashMap<DrawableRef, (Anchor, usize)>,
    attachments: Attachments,
}

impl ConflictResolver {
    /// `anchors` maps each canvas-anchored drawable to its anchor and the
    /// order in which it was anchored.
    pub fn new(
        canvas: Canvas,
        spacing: i32,
        anchors: HashMap<DrawableRef, (Anchor, usize)>,
        attachments: Attachments,
    ) -> Self {
        Self {
            canvas,
            spacing,
            anchors,
            attachments,
        }
    }

    fn claim(&self, r: DrawableRef, bounds: BoundingBox) -> AnchorClaim {
        let recorded = self.anchors.get(&r);
        AnchorClaim {
            bounds,
            anchor: recorded.map(|(anchor, _)| *anchor),
            order: recorded.map(|(_, order)| *order).unwrap_or(usize::MAX),
        }
    }

    /// Check every positioned top-level drawable against every other and
    /// resolve each overlap found.
    ///
    /// A fixed drawable under test defers to anchor precedence. A free one
    /// pushes the other drawable's cluster right just past its own right edge,
    /// but never moves a fixed drawable: that pair is settled when the fixed
    /// one is under test.
    pub fn pass(&self, graph: &mut SentenceGraph) -> PassStats {
        let groups = graph.top_level().to_vec();
        let mut stats = PassStats::default();

        for &under_test in &groups {
            for &other in &groups {
                if under_test == other || self.attachments.attached(under_test, other) {
                    continue;
                }
                let test_frame = graph.frame(under_test);
                let other_frame = graph.frame(other);
                let (Some(test_bounds), Some(other_bounds)) =
                    (test_frame.bounds(), other_frame.bounds())
                else {
                    continue;
                };
                if !test_bounds.intersects(&other_bounds) {
                    continue;
                }

                if test_frame.fixed {
                    let first = self.claim(under_test, test_bounds);
                    let second = self.claim(other, other_bounds);
                    let Some(resolution) = resolve_conflict(&first, &second, self.canvas) else {
                        continue;
                    };
                    let (moved, from) = match resolution.relocate {
                        Side::First => (under_test, test_bounds),
                        Side::Second => (other, other_bounds),
                    };
                    trace!(
                        "relocating {} to ({}, {})",
                        graph.label(moved),
                        resolution.position.x,
                        resolution.position.y
                    );
                    self.move_cluster(
                        graph,
                        moved,
                        &groups,
                        resolution.position.x - from.x,
                        resolution.position.y - from.y,
                    );
                    stats.conflicts += 1;
                    stats.relocations += 1;
                } else if !other_frame.fixed {
                    let dx = shift_vector(&test_bounds, &other_bounds, self.spacing);
                    trace!("shifting {} right by {}", graph.label(other), dx.x);
                    self.move_cluster(graph, other, &groups, dx.x, dx.y);
                    stats.conflicts += 1;
                    stats.shifts += 1;
                }
            }
        }

        stats
    }

    /// Move `r` by a vector, carrying along the free drawables attached to it
    fn move_cluster(
        &self,
        graph: &mut SentenceGraph,
        r: DrawableRef,
        groups: &[DrawableRef],
        dx: i32,
        dy: i32,
    ) {
        for member in self.attachments.cluster(r, groups) {
            let mut frame = graph.frame(member);
            if member != r && frame.fixed {
                continue;
            }
            frame.translate(dx, dy);
            graph.set_frame(member, frame);
        }
    }
}

/// Rightward vector that clears `other` off `anchor` with `spacing` to spare
pub fn shift_vector(anchor: &BoundingBox, other: &BoundingBox, spacing: i32) -> Point {
    Point::new((anchor.right() - other.x + spacing).max(1), 0)
}

/// Every pair of positioned top-level drawables whose boxes intersect,
/// excluding pairs attached by design.
pub fn overlapping_pairs(
    graph: &SentenceGraph,
    attachments: &Attachments,
) -> Vec<(DrawableRef, DrawableRef)> {
    let groups = graph.top_level();
    let mut pairs = Vec::new();
    for (i, &a) in groups.iter().enumerate() {
        for &b in &groups[i + 1..] {
            if attachments.attached(a, b) {
                continue;
            }
            if let (Some(ab), Some(bb)) = (graph.frame(a).bounds(), graph.frame(b).bounds()) {
                if ab.intersects(&bb) {
                    pairs.push((a, b));
                }
            }
        }
    }
    pairs
}
