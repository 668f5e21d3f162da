//! CLI error type.

use std::path::PathBuf;

use casetable::error::{ConfigError, LoadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid table config: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read config '{}': {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid column '{spec}': {reason}")]
    Column { spec: String, reason: String },

    #[error("Failed to initialize logger: {0}")]
    Logger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
