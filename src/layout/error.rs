//! Error types for the layout engine

use thiserror::Error;

/// Precondition violations reported by [`positionate`](super::positionate).
///
/// Well-formed input never fails: unresolvable phrases, unreachable vertices
/// and anchor collisions all degrade gracefully, and non-convergence is
/// reported through [`LayoutReport`](super::LayoutReport) instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Canvas dimensions must be positive
    #[error("invalid canvas {width}x{height}: dimensions must be positive")]
    InvalidCanvas { width: i32, height: i32 },

    /// Configuration value outside its valid range
    #[error("invalid layout config '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl LayoutError {
    /// Create an invalid canvas error
    pub fn invalid_canvas(width: i32, height: i32) -> Self {
        Self::InvalidCanvas { width, height }
    }

    /// Create an invalid config error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_canvas_display() {
        let err = LayoutError::invalid_canvas(0, 600);
        assert!(err.to_string().contains("0x600"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = LayoutError::invalid_config("spacing", "must not be negative");
        assert!(err.to_string().contains("'spacing'"));
    }
}
