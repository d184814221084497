//! Core error types for lovecard-core.
//!
//! Nothing in the card flow itself is fatal: re-entrant actions are ignored
//! by guards and audio rejections are swallowed. These types cover the
//! ambient layers around it (configuration loading, validation, audio sinks).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lovecard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// An instant string that none of the accepted formats could parse
    #[error("Invalid instant for '{field}': '{value}'")]
    InvalidInstant { field: String, value: String },

    /// A fixed-size list with the wrong number of entries
    #[error("'{field}' must have exactly {expected} entries, got {actual}")]
    WrongLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),
}

/// Playback rejections reported by an [`AudioSink`](crate::audio::AudioSink).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The environment refused playback (autoplay policy, muted output).
    #[error("playback of '{0}' was blocked")]
    Blocked(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
