//! Error types for cadence-core.
//!
//! The timer engine itself has no fallible operations; errors only arise at
//! the storage and catalog boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error for cadence-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("preset store error: {0}")]
    Store(#[from] StoreError),

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preset repository errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("preset name must not be empty")]
    EmptyName,

    #[error("preset '{0}' has no steps")]
    EmptySequence(String),

    #[error("preset '{0}' not found")]
    NotFound(String),

    #[error("failed to read preset store at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preset store at {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preset store at {path} is not valid JSON: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode preset store: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

/// Theme catalog errors.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read theme catalog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("theme catalog at {path} is not valid JSON: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("theme '{0}' not found")]
    UnknownTheme(String),

    #[error("preset '{preset}' not found in theme '{theme}'")]
    UnknownPreset { theme: String, preset: String },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
