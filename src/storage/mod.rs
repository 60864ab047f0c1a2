//! Host-side persistence for the `league` binary.
//!
//! The engines never touch storage. The CLI keeps the roster and fixture list
//! in a single JSON snapshot file between invocations.

mod snapshot;

pub use snapshot::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No league found at {0}")]
    NotFound(PathBuf),
}
