//! Error types for wgmesh

use thiserror::Error;

/// Result type alias using wgmesh Error
pub type Result<T> = std::result::Result<T, Error>;

/// wgmesh error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{path} cannot be accessed. Check read permissions.")]
    PermissionDenied { path: String },

    #[error("Invalid report: {0}")]
    InvalidReport(String),
}
