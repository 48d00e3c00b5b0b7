//! Configuration for the layout engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a layout configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Clearance left between two drawables pushed apart by the conflict loop
    pub spacing: i32,

    /// Upper bound on full conflict-resolution passes
    pub max_conflict_passes: usize,

    /// Random candidates tried before a free placement falls back to the
    /// first spot right of everything already placed
    pub placement_attempts: usize,

    /// Seed for free placement; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 10,
            max_conflict_passes: 100,
            placement_attempts: 64,
            seed: None,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the conflict clearance
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the conflict pass ceiling
    pub fn with_max_conflict_passes(mut self, passes: usize) -> Self {
        self.max_conflict_passes = passes;
        self
    }

    /// Set the number of random placement candidates
    pub fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Make free placement deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.spacing, 10);
        assert_eq!(config.max_conflict_passes, 100);
        assert_eq!(config.placement_attempts, 64);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_spacing(0)
            .with_max_conflict_passes(5)
            .with_seed(42);

        assert_eq!(config.spacing, 0);
        assert_eq!(config.max_conflict_passes, 5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = LayoutConfig::from_toml_str("spacing = 4\nseed = 7\n").unwrap();
        assert_eq!(config.spacing, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_conflict_passes, 100);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = LayoutConfig::from_toml_str("spaceing = 4").unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
