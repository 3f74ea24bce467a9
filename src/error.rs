//! Error Types
//!
//! One enum per layer; `AppError` gathers them for the bootstrap path.

use thiserror::Error;

use crate::models::TaskId;

/// Persistence substrate failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read key `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// Task store failures (only surfaced by the `try_*` operations)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored collection under `{key}` is not valid: {source}")]
    Load {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("task {0} not found")]
    NotFound(TaskId),
    #[error("no task ids left to assign")]
    IdsExhausted,
}

/// Rendering substrate failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("failed to create <{tag}>: {reason}")]
    CreateElement { tag: String, reason: String },
    #[error("no element matches `{0}`")]
    MissingRoot(String),
    #[error("{0} unavailable")]
    Unavailable(String),
}

/// Configuration parsing failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config object: {0}")]
    Js(String),
}

/// Anything that can stop the app from mounting
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Dom(#[from] DomError),
}
