//! Cell renderer errors

use super::FieldError;

/// Error returned by a custom cell renderer.
///
/// A renderer error never reaches the host: the cell falls back to a plain
/// field lookup and the fault is logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A field the renderer depends on could not be read.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A field held a value the renderer could not interpret.
    #[error("Cannot render field '{field}': {reason}")]
    Invalid { field: String, reason: String },

    /// Any other renderer failure.
    #[error("{0}")]
    Other(String),
}

impl RenderError {
    /// Creates an invalid-value error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a free-form error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}
