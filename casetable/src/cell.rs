//! Cell display values and their resolution.
//!
//! Every visible cell is resolved on its own: a column's custom renderer runs
//! inside a recovery wrapper, and any failure degrades to the plain field
//! lookup for that one cell.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::warn;

use crate::column::Column;
use crate::model::{Row, Value};

/// Callback invoked when the user triggers a cell action.
pub type ActionHandler = Arc<dyn Fn(&Row) + Send + Sync>;

/// Visual emphasis of a badge. Interpreted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

/// An interactive trigger embedded in a cell (edit, delete, open...).
///
/// The table only forwards user interaction to the handler; what the handler
/// does is up to the page that built the column.
#[derive(Clone)]
pub struct Action {
    /// Identifier used by the host to report which action fired.
    pub id: String,
    /// Text shown on the control.
    pub label: String,
    handler: ActionHandler,
}

impl Action {
    /// Create an action.
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Row) + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            handler: Arc::new(handler),
        }
    }

    /// Run the handler for `row`.
    pub fn invoke(&self, row: &Row) {
        (self.handler)(row);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.label == other.label
    }
}

/// The resolved display value of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// Short highlighted text (counts, statuses).
    Badge { text: String, tone: Tone },
    /// Interactive triggers.
    Actions(Vec<Action>),
    /// Several values shown together.
    Group(Vec<Cell>),
    /// The field is missing or null.
    NotAvailable,
}

impl Cell {
    /// Plain text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text(text.into())
    }

    /// Badge cell.
    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            text: text.into(),
            tone,
        }
    }

    /// Display a raw field value. Missing and null become [`Cell::NotAvailable`].
    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::display)
            .map(Cell::Text)
            .unwrap_or(Cell::NotAvailable)
    }

    /// Returns `false` for [`Cell::NotAvailable`].
    pub fn is_available(&self) -> bool {
        !matches!(self, Cell::NotAvailable)
    }

    /// Find an action by id, looking inside groups.
    pub fn find_action(&self, id: &str) -> Option<&Action> {
        match self {
            Cell::Actions(actions) => actions.iter().find(|a| a.id == id),
            Cell::Group(cells) => cells.iter().find_map(|c| c.find_action(id)),
            _ => None,
        }
    }

    /// Flatten to plain text, using `placeholder` for unavailable values.
    pub fn to_text(&self, placeholder: &str) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Badge { text, .. } => format!("[{text}]"),
            Cell::Actions(actions) => actions
                .iter()
                .map(|a| format!("<{}>", a.label))
                .collect::<Vec<_>>()
                .join(" "),
            Cell::Group(cells) => cells
                .iter()
                .map(|c| c.to_text(placeholder))
                .collect::<Vec<_>>()
                .join(" "),
            Cell::NotAvailable => placeholder.to_string(),
        }
    }
}

/// What a custom renderer sees for one cell.
///
/// Gives read access to any field of the row by key, plus the row itself.
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    row: &'a Row,
    key: &'a str,
}

impl<'a> CellContext<'a> {
    /// Create a context for the cell of column `key` in `row`.
    pub fn new(row: &'a Row, key: &'a str) -> Self {
        Self { row, key }
    }

    /// The full row.
    pub fn row(&self) -> &'a Row {
        self.row
    }

    /// The key of the column being rendered.
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Read any field of the row.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.row.get(key)
    }

    /// The value of this column's own field.
    pub fn value(&self) -> Option<&'a Value> {
        self.row.get(self.key)
    }

    /// Display string of any field; `None` when missing or null.
    pub fn display(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::display)
    }
}

/// Resolve the display value of `column` for `row`.
///
/// Columns without a renderer show the raw field. A renderer that returns an
/// error or panics falls back to the raw field for this cell only.
pub fn resolve_cell(column: &Column, row: &Row) -> Cell {
    let Some(render) = column.renderer() else {
        return lookup(column, row);
    };

    let cx = CellContext::new(row, &column.key);
    match panic::catch_unwind(AssertUnwindSafe(|| render(&cx))) {
        Ok(Ok(cell)) => cell,
        Ok(Err(err)) => {
            warn!(
                "Renderer for column '{}' failed on row {:?}: {}",
                column.key,
                row.id(),
                err
            );
            lookup(column, row)
        }
        Err(payload) => {
            warn!(
                "Renderer for column '{}' panicked on row {:?}: {}",
                column.key,
                row.id(),
                panic_message(payload.as_ref())
            );
            lookup(column, row)
        }
    }
}

fn lookup(column: &Column, row: &Row) -> Cell {
    Cell::from_value(row.get(&column.key))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::RenderError;

    fn case_row() -> Row {
        Row::with_id("7")
            .set("case_title", "State v. Khan")
            .set("fee", 5000i64)
            .set("paid", 1500i64)
            .set("address", Value::Null)
    }

    #[test]
    fn test_lookup_without_renderer() {
        let row = case_row();
        assert_eq!(
            resolve_cell(&Column::new("case_title", "Title"), &row),
            Cell::text("State v. Khan")
        );
        assert_eq!(resolve_cell(&Column::new("fee", "Fee"), &row), Cell::text("5000"));
    }

    #[test]
    fn test_missing_and_null_are_not_available() {
        let row = case_row();
        assert_eq!(
            resolve_cell(&Column::new("address", "Address"), &row),
            Cell::NotAvailable
        );
        assert_eq!(
            resolve_cell(&Column::new("court_name", "Court"), &row),
            Cell::NotAvailable
        );
    }

    #[test]
    fn test_renderer_reads_other_fields() {
        let column = Column::new("balance", "Pending").render(|cx| {
            let fee = cx.row().get_decimal("fee")?.unwrap_or_default();
            let paid = cx.row().get_decimal("paid")?.unwrap_or_default();
            Ok(Cell::text((fee - paid).to_string()))
        });
        assert_eq!(resolve_cell(&column, &case_row()), Cell::text("3500"));
    }

    #[test]
    fn test_renderer_error_falls_back_to_field() {
        let column = Column::new("case_title", "Title")
            .render(|_| Err(RenderError::other("boom")));
        assert_eq!(
            resolve_cell(&column, &case_row()),
            Cell::text("State v. Khan")
        );
    }

    #[test]
    fn test_renderer_panic_falls_back_to_field() {
        let column = Column::new("fee", "Fee").render(|_| panic!("renderer exploded"));
        assert_eq!(resolve_cell(&column, &case_row()), Cell::text("5000"));
    }

    #[test]
    fn test_find_action_in_group() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let cell = Cell::Group(vec![
            Cell::text("x"),
            Cell::Actions(vec![Action::new("delete", "Delete", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })]),
        ]);

        let action = cell.find_action("delete").unwrap();
        action.invoke(&case_row());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(cell.find_action("edit").is_none());
    }

    #[test]
    fn test_to_text() {
        let cell = Cell::Group(vec![
            Cell::badge("3", Tone::Info),
            Cell::Actions(vec![Action::new("edit", "Edit", |_| {})]),
            Cell::NotAvailable,
        ]);
        assert_eq!(cell.to_text("N/A"), "[3] <Edit> N/A");
    }
}
