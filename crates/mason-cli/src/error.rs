//! Error type for the Mason CLI.

use std::{io, ops::Range};

use thiserror::Error;

use mason::LayoutError;

use crate::config::ConfigError;

/// Everything that can make a CLI run fail.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scene file is not valid TOML or does not match the scene schema.
    #[error("Invalid scene: {message}")]
    Scene {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

impl CliError {
    /// Create a scene error from a TOML deserialization failure in `src`.
    pub fn from_scene_error(err: &toml::de::Error, src: &str) -> Self {
        Self::Scene {
            message: err.message().to_string(),
            span: err.span(),
            src: src.to_string(),
        }
    }
}
