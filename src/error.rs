//! Crate-level error type

use thiserror::Error;

use crate::layout::{ConfigError, LayoutError};
use crate::scene::GraphError;
use crate::scene_file::SceneFileError;

/// Errors that can occur anywhere between loading a scene and laying it out
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid graph construction
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Layout precondition violated
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Scene description could not be loaded
    #[error("scene error: {0}")]
    SceneFile(#[from] SceneFileError),

    /// Layout configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
