//! Error types for slidekit-core.
//!
//! Gesture handling and index mapping never fail; only loading a
//! configuration document can.

use thiserror::Error;

/// Errors raised while loading a [`SliderConfig`](crate::SliderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML document could not be parsed.
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON document could not be parsed.
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
}
