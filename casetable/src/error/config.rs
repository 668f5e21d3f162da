//! Configuration errors

use thiserror::Error;

/// Errors raised when a table configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Pages must hold at least one row.
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}
