//! Table configuration

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::search::DEFAULT_DEBOUNCE;

/// Presentation settings for one table.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use casetable::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(10)
///     .with_search("Search cases...")
///     .with_debounce(Duration::from_millis(150));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 5
    pub page_size: usize,

    /// Quiet interval before typed text is committed as the search query.
    ///
    /// Default: 300ms
    #[serde(rename = "debounce_ms", with = "millis")]
    pub debounce: Duration,

    /// Placeholder for the search box. The box is only shown when set.
    pub search_placeholder: Option<String>,

    /// Caption shown with the table.
    pub caption: Option<String>,

    /// Text shown for missing or null cells.
    ///
    /// Default: "N/A"
    pub placeholder: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            debounce: DEFAULT_DEBOUNCE,
            search_placeholder: None,
            caption: None,
            placeholder: "N/A".to_string(),
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of rows per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the debounce interval.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Shows a search box with the given placeholder.
    pub fn with_search(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = Some(placeholder.into());
        self
    }

    /// Sets the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Sets the text for missing values.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Checks the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
