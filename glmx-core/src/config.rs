//! Stack capacity configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mode::MatrixMode;

/// Capacity of each matrix stack, in matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    pub modelview_depth: usize,
    pub projection_depth: usize,
    pub texture_depth: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            modelview_depth: 32,
            projection_depth: 2,
            texture_depth: 2,
        }
    }
}

impl StackConfig {
    pub fn depth(&self, mode: MatrixMode) -> usize {
        match mode {
            MatrixMode::ModelView => self.modelview_depth,
            MatrixMode::Projection => self.projection_depth,
            MatrixMode::Texture => self.texture_depth,
        }
    }

    /// Every stack needs room for at least its root matrix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (stack, depth) in [
            ("modelview", self.modelview_depth),
            ("projection", self.projection_depth),
            ("texture", self.texture_depth),
        ] {
            if depth == 0 {
                return Err(ConfigError::InvalidDepth { stack, depth });
            }
        }
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
