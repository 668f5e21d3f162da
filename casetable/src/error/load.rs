//! Row loading errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning data-source output into rows.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input was not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value was not an array.
    #[error("Expected a JSON array of row objects")]
    NotAnArray,

    /// An array element was not a JSON object.
    #[error("Row {index} is not a JSON object")]
    NotAnObject { index: usize },

    /// The input file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
