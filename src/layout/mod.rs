//! Layout engine for placing sentence-graph drawables on a canvas
//!
//! This module takes a [`SentenceGraph`](crate::scene::SentenceGraph) and
//! assigns every top-level drawable a position, resolving overlaps and
//! centering the result.

pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod lint;
pub mod placement;
pub mod types;

pub use config::{ConfigError, LayoutConfig};
pub use conflict::{overlapping_pairs, Attachments};
pub use engine::{positionate, LayoutReport};
pub use error::LayoutError;
pub use lint::{LintCategory, LintWarning};
pub use placement::FreePlacer;
pub use types::*;
