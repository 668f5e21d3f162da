//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::cell::{Cell, CellContext};
use crate::error::RenderError;

/// A custom cell renderer.
///
/// Receives the row context and returns the display value for one cell. An
/// `Err` (or a panic) makes the table fall back to the raw field lookup for
/// that cell only.
pub type Renderer = Arc<dyn Fn(&CellContext<'_>) -> Result<Cell, RenderError> + Send + Sync>;

/// Describes how one field (or derived value) is labelled and displayed.
///
/// Columns are given to the table as an ordered `Vec`; that order is the
/// left-to-right display order and the table never changes it.
///
/// # Examples
///
/// ```
/// use casetable::{Cell, Column};
///
/// let columns = vec![
///     Column::new("case_title", "Title"),
///     Column::new("status", "Status").render(|cx| {
///         Ok(Cell::text(cx.display("status").unwrap_or_default().to_uppercase()))
///     }),
/// ];
/// assert_eq!(columns[1].label, "Status");
/// ```
#[derive(Clone)]
pub struct Column {
    /// Field read by default lookup.
    pub key: String,
    /// Header text.
    pub label: String,
    render: Option<Renderer>,
}

impl Column {
    /// Create a column that displays the field at `key`.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            render: None,
        }
    }

    /// Attach a custom renderer.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellContext<'_>) -> Result<Cell, RenderError> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Attach an already shared renderer, such as one from [`crate::render`].
    pub fn with_renderer(mut self, render: Renderer) -> Self {
        self.render = Some(render);
        self
    }

    /// The custom renderer, if one is attached.
    pub fn renderer(&self) -> Option<&Renderer> {
        self.render.as_ref()
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("render", &self.render.is_some())
            .finish()
    }
}
