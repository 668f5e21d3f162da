//! The table view: owns view state for one dataset and derives its layout.

use std::sync::Arc;

use log::{debug, trace};

use crate::cell::resolve_cell;
use crate::column::Column;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::layout::{Layout, RowKey};
use crate::model::Row;
use crate::pagination::{self, PageSlice};
use crate::search::{Clock, Debouncer, SystemClock, filter_indices};
use crate::state::{Extent, ViewEvent, ViewState};

/// A searchable, paginated view over caller-supplied rows.
///
/// `DataTable` owns its [`ViewState`] and debounce slot; the rows and columns
/// are read-only. Every state change goes through [`ViewState::apply`].
///
/// Time comes from a [`Clock`]: [`SystemClock`] by default, a
/// [`ManualClock`](crate::search::ManualClock) in tests. Hosts call
/// [`tick`](DataTable::tick) from their event loop (or when the debounce
/// deadline from [`next_deadline`](DataTable::next_deadline) arrives) to commit
/// typed queries.
///
/// # Example
///
/// ```
/// use casetable::{Column, DataTable, Row, TableConfig};
///
/// let rows: Vec<Row> = (1..=12)
///     .map(|n| Row::with_id(n.to_string()).set("case_title", format!("Case {n}")))
///     .collect();
/// let mut table = DataTable::new(
///     vec![Column::new("case_title", "Title")],
///     rows,
///     TableConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(table.page_count(), 3);
/// table.next_page();
/// table.next_page();
/// assert_eq!(table.visible().len(), 2);
/// assert!(!table.has_next());
/// ```
#[derive(Debug)]
pub struct DataTable<C: Clock = SystemClock> {
    columns: Vec<Column>,
    rows: Arc<[Row]>,
    config: TableConfig,
    state: ViewState,
    debouncer: Debouncer<String>,
    clock: C,
    /// Positions in `rows` that match the committed query.
    matched: Vec<usize>,
}

impl DataTable<SystemClock> {
    /// Create a view over `rows` using wall-clock time.
    pub fn new(
        columns: Vec<Column>,
        rows: impl Into<Arc<[Row]>>,
        config: TableConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(columns, rows, config, SystemClock)
    }
}

impl<C: Clock> DataTable<C> {
    /// Create a view over `rows` using the given clock.
    pub fn with_clock(
        columns: Vec<Column>,
        rows: impl Into<Arc<[Row]>>,
        config: TableConfig,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rows = rows.into();
        let matched = (0..rows.len()).collect();
        debug!(
            "DataTable created: {} columns, {} rows, page size {}",
            columns.len(),
            rows.len(),
            config.page_size
        );

        Ok(Self {
            columns,
            rows,
            debouncer: Debouncer::new(config.debounce),
            config,
            state: ViewState::new(),
            clock,
            matched,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Column descriptors, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The full dataset.
    pub fn rows(&self) -> &Arc<[Row]> {
        &self.rows
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Zero-based current page.
    pub fn page(&self) -> usize {
        self.state.page
    }

    /// Search text as typed.
    pub fn raw_query(&self) -> &str {
        &self.state.raw_query
    }

    /// Search text the rows are filtered by.
    pub fn committed_query(&self) -> &str {
        &self.state.committed_query
    }

    /// Rows matching the committed query, in dataset order.
    pub fn filtered(&self) -> Vec<&Row> {
        self.matched.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Number of rows matching the committed query.
    pub fn filtered_len(&self) -> usize {
        self.matched.len()
    }

    /// Rows on the current page.
    pub fn visible(&self) -> Vec<&Row> {
        let filtered = self.filtered();
        pagination::paginate(&filtered, self.state.page, self.config.page_size)
            .visible
            .to_vec()
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.matched.len(), self.config.page_size)
    }

    /// Whether the forward control is enabled.
    pub fn has_next(&self) -> bool {
        pagination::has_next(self.state.page, self.matched.len(), self.config.page_size)
    }

    /// Whether the back control is enabled.
    pub fn has_prev(&self) -> bool {
        pagination::has_prev(self.state.page)
    }

    /// When the pending query will be committed. `None` when nothing is
    /// pending or the interval is too long to ever come due.
    pub fn next_deadline(&self) -> Option<std::time::Instant> {
        self.debouncer.deadline()
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Record a change of the search input.
    ///
    /// The rows are not refiltered until the quiet interval passes and
    /// [`tick`](Self::tick) commits the query.
    pub fn input(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.debouncer.schedule(query.clone(), self.clock.now());
        self.dispatch(ViewEvent::Keystroke(query));
    }

    /// Commit the pending query if its quiet interval has passed.
    ///
    /// Returns `true` if the committed query changed.
    pub fn tick(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now()) {
            Some(query) => self.commit(query),
            None => false,
        }
    }

    /// Commit the pending query now, without waiting.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(query) => self.commit(query),
            None => false,
        }
    }

    fn commit(&mut self, query: String) -> bool {
        if query == self.state.committed_query {
            return false;
        }
        self.matched = filter_indices(&self.rows, &query);
        debug!("Search committed: {:?} ({} matches)", query, self.matched.len());
        self.dispatch(ViewEvent::Commit(query));
        true
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Go forward one page. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        self.navigate(ViewEvent::NextPage)
    }

    /// Go back one page. No-op on the first page.
    pub fn prev_page(&mut self) -> bool {
        self.navigate(ViewEvent::PrevPage)
    }

    /// Jump to `page`, clamped to the last page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigate(ViewEvent::GoToPage(page))
    }

    fn navigate(&mut self, event: ViewEvent) -> bool {
        let before = self.state.page;
        self.dispatch(event);
        before != self.state.page
    }

    // -------------------------------------------------------------------------
    // Inputs from the host
    // -------------------------------------------------------------------------

    /// Replace the dataset.
    ///
    /// Passing the same `Arc` again is not a replacement and keeps the page.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[Row]>>) {
        let rows = rows.into();
        if Arc::ptr_eq(&rows, &self.rows) {
            return;
        }
        self.rows = rows;
        self.matched = filter_indices(&self.rows, &self.state.committed_query);
        debug!("Rows replaced: {} rows, {} matches", self.rows.len(), self.matched.len());
        self.dispatch(ViewEvent::DataReplaced);
    }

    /// Change the number of rows per page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if page_size != self.config.page_size {
            self.config.page_size = page_size;
            self.dispatch(ViewEvent::PageSizeChanged);
        }
        Ok(())
    }

    fn dispatch(&mut self, event: ViewEvent) {
        let extent = Extent::new(self.matched.len(), self.config.page_size);
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(&event, extent);
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Current page of the filtered rows.
    pub fn page_slice<'a>(&self, filtered: &'a [&'a Row]) -> PageSlice<'a, &'a Row> {
        pagination::paginate(filtered, self.state.page, self.config.page_size)
    }

    /// Assemble the layout for the current page.
    pub fn layout(&self) -> Layout {
        let filtered = self.filtered();
        let page = self.page_slice(&filtered);
        Layout::assemble(&self.columns, &page, &self.state.raw_query, &self.config)
    }

    /// Invoke action `action_id` in column `column_key` of the visible row `row_key`.
    ///
    /// Returns `false` if no such row, column or action is on the current page.
    pub fn trigger(&self, row_key: &RowKey, column_key: &str, action_id: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key == column_key) else {
            return false;
        };

        let visible = self.visible();
        let row = visible
            .iter()
            .enumerate()
            .find(|(position, row)| RowKey::for_row(row, self.state.page, *position) == *row_key)
            .map(|(_, row)| *row);
        let Some(row) = row else {
            return false;
        };

        let cell = resolve_cell(column, row);
        match cell.find_action(action_id) {
            Some(action) => {
                trace!("Action '{}' triggered on row {}", action_id, row_key);
                action.invoke(row);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Cancel any pending debounce so nothing commits after the view is gone.
    pub fn teardown(&mut self) {
        if self.debouncer.cancel() {
            debug!("DataTable teardown: pending search cancelled");
        }
    }
}

impl<C: Clock> Drop for DataTable<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
