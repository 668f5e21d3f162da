//! Structured output handed to the host for presentation.

use std::fmt;

use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, resolve_cell};
use crate::column::Column;
use crate::config::TableConfig;
use crate::model::Row;
use crate::pagination::PageSlice;

/// Rendering identity of a body row.
///
/// Rows with a stable id keep that identity across page and filter changes.
/// Rows without one get a key from their page and position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The row's own identifier.
    Id(String),
    /// Position-derived key for rows without an identifier.
    Synthetic { page: usize, position: usize },
}

impl RowKey {
    /// Key for the row at `position` on `page`.
    pub fn for_row(row: &Row, page: usize, position: usize) -> Self {
        match row.id() {
            Some(id) => RowKey::Id(id.to_string()),
            None => RowKey::Synthetic { page, position },
        }
    }

    /// Parse a key typed by a user.
    ///
    /// `pos:P-N` is a synthetic key, `id:X` is the id `X`, and anything else
    /// is taken as an id as-is.
    pub fn parse(text: &str) -> Self {
        if let Some(id) = text.strip_prefix("id:") {
            return RowKey::Id(id.to_string());
        }
        let synthetic = text.strip_prefix("pos:").and_then(|pos| {
            let (page, position) = pos.split_once('-')?;
            Some(RowKey::Synthetic {
                page: page.parse().ok()?,
                position: position.parse().ok()?,
            })
        });
        synthetic.unwrap_or_else(|| RowKey::Id(text.to_string()))
    }
}

/// `id:X` or `pos:P-N`. The prefixes keep ids and positions apart.
impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "id:{id}"),
            RowKey::Synthetic { page, position } => write!(f, "pos:{page}-{position}"),
        }
    }
}

/// Search input bound to the raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub placeholder: String,
    pub value: String,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    /// Unique within the table: row key and column key.
    pub key: String,
    /// Column the cell belongs to.
    pub column: String,
    pub content: Cell,
}

/// One body row.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub key: RowKey,
    pub cells: Vec<BodyCell>,
}

/// Back/forward controls and the page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    /// Current page, 1-indexed for display.
    pub page: usize,
    pub page_count: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    /// "Page X of Y".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }
}

/// Everything needed to present the table, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub search: Option<SearchBox>,
    pub caption: Option<String>,
    pub header: Vec<HeaderCell>,
    pub body: Vec<BodyRow>,
    pub pagination: PaginationControls,
    /// Text for [`Cell::NotAvailable`].
    pub placeholder: String,
}

impl Layout {
    /// Assemble the layout for one page of rows.
    pub fn assemble(
        columns: &[Column],
        page: &PageSlice<'_, &Row>,
        raw_query: &str,
        config: &TableConfig,
    ) -> Self {
        let search = config.search_placeholder.as_ref().map(|placeholder| SearchBox {
            placeholder: placeholder.clone(),
            value: raw_query.to_string(),
        });

        let header = columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
            })
            .collect();

        let body = page
            .visible
            .iter()
            .enumerate()
            .map(|(position, row)| {
                let key = RowKey::for_row(row, page.page, position);
                let cells = columns
                    .iter()
                    .map(|column| BodyCell {
                        key: format!("{}-{}", key, column.key),
                        column: column.key.clone(),
                        content: resolve_cell(column, row),
                    })
                    .collect();
                BodyRow { key, cells }
            })
            .collect();

        Self {
            search,
            caption: config.caption.clone(),
            header,
            body,
            pagination: PaginationControls {
                page: page.page + 1,
                page_count: page.page_count,
                prev_enabled: page.has_prev(),
                next_enabled: page.has_next(),
            },
            placeholder: config.placeholder.clone(),
        }
    }

    /// Find a body row by key.
    pub fn row(&self, key: &RowKey) -> Option<&BodyRow> {
        self.body.iter().find(|row| &row.key == key)
    }

    /// Plain-text rendering with padded columns.
    pub fn to_text(&self) -> String {
        let header: Vec<String> = self.header.iter().map(|h| h.label.clone()).collect();
        let body: Vec<Vec<String>> = self
            .body
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| cell.content.to_text(&self.placeholder))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
        for cells in &body {
            for (width, text) in widths.iter_mut().zip(cells) {
                *width = (*width).max(text.width());
            }
        }

        let mut out = String::new();
        if let Some(search) = &self.search {
            let shown = if search.value.is_empty() {
                &search.placeholder
            } else {
                &search.value
            };
            out.push_str(&format!("Search: [{shown}]\n"));
        }
        if let Some(caption) = &self.caption {
            out.push_str(caption);
            out.push('\n');
        }

        out.push_str(&text_line(&header, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
        for cells in &body {
            out.push_str(&text_line(cells, &widths));
        }

        let controls = &self.pagination;
        out.push_str(&format!(
            "{} {} {}\n",
            if controls.prev_enabled { "<" } else { " " },
            controls.label(),
            if controls.next_enabled { ">" } else { " " },
        ));
        out
    }
}

fn text_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| {
            let pad = width.saturating_sub(text.width());
            format!("{}{}", text, " ".repeat(pad))
        })
        .collect();
    let mut line = padded.join(" | ").trim_end().to_string();
    line.push('\n');
    line
}
