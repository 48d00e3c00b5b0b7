//! Lint checks for detecting defects in a finished layout.
//!
//! Runs after [`positionate`](super::positionate) and reports what the
//! conflict loop could not fix: overlapping drawables, drawables spilling
//! off the canvas, and drawables that never got a position.

use std::fmt;

use crate::scene::graph::SentenceGraph;

use super::conflict::{overlapping_pairs, Attachments};
use super::types::Canvas;

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Bounds,
    Unpositioned,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Bounds => write!(f, "bounds"),
            LintCategory::Unpositioned => write!(f, "unpositioned"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a laid-out graph.
pub fn check(graph: &SentenceGraph, canvas: Canvas) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_positioned(graph, &mut warnings);
    check_overlaps(graph, &mut warnings);
    check_bounds(graph, canvas, &mut warnings);
    warnings
}

fn check_positioned(graph: &SentenceGraph, warnings: &mut Vec<LintWarning>) {
    for &r in graph.top_level() {
        if !graph.frame(r).is_positioned() {
            warnings.push(LintWarning {
                category: LintCategory::Unpositioned,
                message: format!("\"{}\" has no position", graph.label(r)),
            });
        }
    }
}

// Pairs joined by "in", "behind" and the like overlap on purpose
fn check_overlaps(graph: &SentenceGraph, warnings: &mut Vec<LintWarning>) {
    let attachments = Attachments::from_graph(graph);
    for (a, b) in overlapping_pairs(graph, &attachments) {
        warnings.push(LintWarning {
            category: LintCategory::Overlap,
            message: format!(
                "\"{}\" and \"{}\" overlap",
                graph.label(a),
                graph.label(b)
            ),
        });
    }
}

fn check_bounds(graph: &SentenceGraph, canvas: Canvas, warnings: &mut Vec<LintWarning>) {
    let area = canvas.bounds();
    for &r in graph.top_level() {
        let Some(b) = graph.frame(r).bounds() else {
            continue;
        };
        if b.x < area.x || b.y < area.y || b.right() > area.right() || b.bottom() > area.bottom() {
            warnings.push(LintWarning {
                category: LintCategory::Bounds,
                message: format!(
                    "\"{}\" at ({}, {}) size {}x{} extends past the {}x{} canvas",
                    graph.label(r),
                    b.x,
                    b.y,
                    b.width,
                    b.height,
                    canvas.width,
                    canvas.height
                ),
            });
        }
    }
}
