//! Preview renderers for laid-out sentence graphs
//!
//! This module takes a graph after [`positionate`](crate::layout::positionate)
//! and produces either an SVG preview or a plain-text position dump.

pub mod config;
pub mod svg;
pub mod text;

pub use config::SvgConfig;
pub use svg::{paint_order, render_svg};
pub use text::render_text;
