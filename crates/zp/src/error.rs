//! CLI error types.

use zp_config::ConfigError;
use zp_storage_fs::StorageError;
use zp_tabs::{ConvertError, UnknownTabError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    UnknownTab(#[from] UnknownTabError),

    #[error("{0}")]
    Validation(String),
}

/// Error converting a single document.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DocumentError {
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Convert(#[from] ConvertError),
}
