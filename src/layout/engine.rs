//! Layout orchestration
//!
//! [`positionate`] runs once per graph and mutates it in place:
//!
//! 1. **Absolute pre-pass**: every absolute edge binds its vertex to the canvas
//! 2. **Relative pass**: a depth-first walk applies each vertex's relations
//!    after visiting the vertices they depend on; anything still unpositioned
//!    afterwards gets a random free spot
//! 3. **Group materialization**: the top-level set is computed
//! 4. **Conflict loop**: full passes over all pairs until one finds no
//!    overlap, bounded by [`LayoutConfig::max_conflict_passes`]
//! 5. **Final centering**: fixed drawables are clamped to the canvas and the
//!    block of remaining free drawables is centered
//!
//! Every vertex moves `Unpositioned -> Positioned -> (shifted) -> Centered`
//! and never becomes unpositioned again.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::edge::{Anchor, Edge};
use crate::scene::graph::{DrawableRef, SentenceGraph, VertexId};

use super::config::LayoutConfig;
use super::conflict::{Attachments, ConflictResolver};
use super::error::LayoutError;
use super::placement::FreePlacer;
use super::types::{BoundingBox, Canvas};

/// Summary of one layout run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Conflict passes run, including the final clean one
    pub passes: usize,
    /// Overlaps resolved across all passes
    pub conflicts: usize,
    /// Free drawables pushed right
    pub shifts: usize,
    /// Drawables moved by anchor precedence
    pub relocations: usize,
    /// Drawables given a random free spot
    pub random_placements: usize,
    /// Vertices visited by the relative pass
    pub visited: usize,
    /// False if the pass ceiling was hit with overlaps left; the layout is
    /// then best-effort
    pub converged: bool,
}

/// Lay out `graph` on a `width` x `height` canvas.
///
/// Fails only on precondition violations: non-positive canvas dimensions or
/// an unusable configuration.
pub fn positionate(
    graph: &mut SentenceGraph,
    width: i32,
    height: i32,
    config: &LayoutConfig,
) -> Result<LayoutReport, LayoutError> {
    if width <= 0 || height <= 0 {
        return Err(LayoutError::invalid_canvas(width, height));
    }
    if config.spacing < 0 {
        return Err(LayoutError::invalid_config("spacing", "must not be negative"));
    }
    if config.max_conflict_passes == 0 {
        return Err(LayoutError::invalid_config(
            "max_conflict_passes",
            "must be at least 1",
        ));
    }

    let canvas = Canvas::new(width, height);
    let mut report = LayoutReport::default();
    let mut placer = FreePlacer::new(config);

    let anchors = anchor_absolute(graph, canvas);
    debug!("{} drawables anchored to the canvas", anchors.len());

    let mut pass = RelativePass::new(graph, canvas, &mut placer);
    for vertex in pass.graph.vertex_ids().collect::<Vec<_>>() {
        if pass.is_unvisited(vertex) {
            pass.visit(vertex);
        }
        if !pass.is_positioned(vertex) {
            pass.place_free(vertex);
        }
    }
    report.visited = pass.visited;
    report.random_placements = pass.random_placements;

    graph.materialize_groups();
    debug!("{} top-level drawables", graph.top_level().len());

    let resolver = ConflictResolver::new(
        canvas,
        config.spacing,
        anchors,
        Attachments::from_graph(graph),
    );
    while report.passes < config.max_conflict_passes {
        report.passes += 1;
        let stats = resolver.pass(graph);
        report.conflicts += stats.conflicts;
        report.shifts += stats.shifts;
        report.relocations += stats.relocations;
        if stats.conflicts == 0 {
            report.converged = true;
            break;
        }
    }
    if !report.converged {
        warn!(
            "conflict resolution did not converge after {} passes; keeping best-effort layout",
            report.passes
        );
    }

    center(graph, canvas);
    Ok(report)
}

/// Apply every absolute edge whose vertex is still unpositioned, recording
/// the anchor and anchoring order of each drawable it binds.
fn anchor_absolute(
    graph: &mut SentenceGraph,
    canvas: Canvas,
) -> HashMap<DrawableRef, (Anchor, usize)> {
    let absolute: Vec<Edge> = graph
        .edges()
        .iter()
        .filter(|e| e.is_absolute())
        .cloned()
        .collect();

    let mut anchors = HashMap::new();
    for edge in absolute {
        let Edge::Absolute(abs) = &edge else {
            continue;
        };
        let target = graph.top_level_of(abs.left);
        if edge.positionate(graph, canvas) {
            let order = anchors.len();
            anchors.insert(target, (abs.anchor, order));
        } else {
            debug!(
                "'{}' already anchored; ignoring {:?}",
                graph.label(target),
                abs.anchor
            );
        }
    }
    anchors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    Visiting,
    Done,
}

/// Depth-first placement over relative edges
struct RelativePass<'a> {
    graph: &'a mut SentenceGraph,
    canvas: Canvas,
    placer: &'a mut FreePlacer,
    state: Vec<Visit>,
    visited: usize,
    random_placements: usize,
}

impl<'a> RelativePass<'a> {
    fn new(graph: &'a mut SentenceGraph, canvas: Canvas, placer: &'a mut FreePlacer) -> Self {
        let state = vec![Visit::Unvisited; graph.vertex_count()];
        Self {
            graph,
            canvas,
            placer,
            state,
            visited: 0,
            random_placements: 0,
        }
    }

    fn is_unvisited(&self, vertex: VertexId) -> bool {
        self.state[vertex.0] == Visit::Unvisited
    }

    fn is_positioned(&self, vertex: VertexId) -> bool {
        let r = self.graph.top_level_of(vertex);
        self.graph.frame(r).is_positioned()
    }

    /// Apply the relative edges of `vertex` after visiting their
    /// dependencies (post-order).
    ///
    /// A Right left unpositioned by its own visit is placed by the edge that
    /// needs it: relative to `vertex` if that is positioned, otherwise at a
    /// random free spot first. A second reference is never placed by the
    /// edge, so it always gets a free spot when still unpositioned. A
    /// dependency that is already being visited closes a cycle and is
    /// skipped rather than revisited.
    fn visit(&mut self, vertex: VertexId) {
        self.state[vertex.0] = Visit::Visiting;
        self.visited += 1;

        let relative: Vec<Edge> = self
            .graph
            .edges_from(vertex)
            .map(|(_, e)| e)
            .filter(|e| !e.is_absolute())
            .cloned()
            .collect();

        for edge in relative {
            for dependency in edge.dependencies() {
                match self.state[dependency.0] {
                    Visit::Unvisited => self.visit(dependency),
                    Visit::Visiting => debug!(
                        "cycle: '{}' depends on '{}' which is still being placed",
                        self.noun(vertex),
                        self.noun(dependency)
                    ),
                    Visit::Done => {}
                }
            }

            if let Edge::Relative(rel) = &edge {
                if let Some(reference) = rel.reference {
                    if !self.is_positioned(reference) {
                        self.place_free(reference);
                    }
                }
                if !self.is_positioned(vertex) && !self.is_positioned(rel.right) {
                    self.place_free(rel.right);
                }
            }
            edge.positionate(self.graph, self.canvas);
        }

        self.state[vertex.0] = Visit::Done;
    }

    fn place_free(&mut self, vertex: VertexId) {
        let target = self.graph.top_level_of(vertex);
        let mut frame = self.graph.frame(target);
        let occupied = occupied(self.graph);
        frame.position = Some(self.placer.place(&frame, &occupied, self.canvas));
        self.graph.set_frame(target, frame);
        self.random_placements += 1;
    }

    fn noun(&self, vertex: VertexId) -> &str {
        self.graph
            .vertex(vertex)
            .map(|v| v.noun.as_str())
            .unwrap_or("?")
    }
}

/// Bounds of every positioned top-level drawable
fn occupied(graph: &SentenceGraph) -> Vec<BoundingBox> {
    let mut seen = HashSet::new();
    graph
        .vertex_ids()
        .map(|v| graph.top_level_of(v))
        .filter(|r| seen.insert(*r))
        .filter_map(|r| graph.frame(r).bounds())
        .collect()
}

/// Clamp fixed drawables into the canvas, then center the free block.
///
/// Free drawables attached to a fixed one follow its clamp and stay out of
/// the block. Centering falls back to a horizontal-only, vertical-only or no
/// translation if the full one would push the block onto a fixed drawable.
fn center(graph: &mut SentenceGraph, canvas: Canvas) {
    let groups = graph.top_level().to_vec();
    let attachments = Attachments::from_graph(graph);

    let mut fixed = Vec::new();
    let mut clamps = Vec::new();
    for &r in &groups {
        let mut frame = graph.frame(r);
        let Some(bounds) = frame.bounds() else {
            continue;
        };
        if frame.fixed {
            let clamped = canvas.clamp(&bounds);
            frame.position = Some(clamped);
            graph.set_frame(r, frame);
            fixed.push(frame.bounds_at(clamped));
            clamps.push((r, clamped.x - bounds.x, clamped.y - bounds.y));
        }
    }

    let mut free = Vec::new();
    for &r in &groups {
        let mut frame = graph.frame(r);
        let Some(bounds) = frame.bounds() else {
            continue;
        };
        if frame.fixed {
            continue;
        }
        match clamps.iter().find(|(f, _, _)| attachments.attached(*f, r)) {
            Some(&(_, dx, dy)) => {
                frame.translate(dx, dy);
                graph.set_frame(r, frame);
                fixed.push(bounds.translated(dx, dy));
            }
            None => free.push((r, bounds)),
        }
    }

    let Some(block) = free
        .iter()
        .map(|(_, b)| *b)
        .reduce(|acc, b| acc.union(&b))
    else {
        return;
    };

    let dx = (canvas.width - block.width) / 2 - block.x;
    let dy = (canvas.height - block.height) / 2 - block.y;

    let collisions = |dx: i32, dy: i32| {
        free.iter()
            .map(|(_, b)| b.translated(dx, dy))
            .map(|b| fixed.iter().filter(|f| f.intersects(&b)).count())
            .sum::<usize>()
    };
    let baseline = collisions(0, 0);
    let (dx, dy) = [(dx, dy), (dx, 0), (0, dy)]
        .into_iter()
        .find(|&(x, y)| collisions(x, y) <= baseline)
        .unwrap_or((0, 0));
    debug!("centering free block by ({dx}, {dy})");

    for (r, _) in free {
        let mut frame = graph.frame(r);
        frame.translate(dx, dy);
        graph.set_frame(r, frame);
    }
}
