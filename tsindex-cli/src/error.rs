use thiserror::Error;
use tsindex_container::ContainerError;
use tsindex_db::{OperationError, SchemaError};
use tsindex_sync::SyncError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Index could not be opened
    #[error("Index error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Database error: {0}")]
    Database(#[from] OperationError),

    #[error("{0}")]
    Sync(#[from] SyncError),

    #[error("{0}")]
    Container(#[from] ContainerError),

    /// Settings file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Bad command-line value
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
