use bevy::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to create config directory: {0}")]
    ConfigDirCreationFailed(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config file not found at path: {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Navigation query results. These are recoverable values, not faults:
    // callers treat them as "no move available this frame" and retry later.
    #[error("No usable nodes available to resolve position {position:?}")]
    NoUsableNodes { position: Vec3 },

    #[error("No path could be found from {start:?} to {end:?}")]
    NoPath { start: Vec3, end: Vec3 },

    // Programming defect: a reconstruction walk hit a node without a
    // predecessor before reaching the start node.
    #[error("Path reconstruction reached a node with no predecessor")]
    BrokenPath,
}

/// Result type alias for all operations
pub type NavResult<T> = Result<T, NavError>;
