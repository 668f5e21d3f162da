//! View state and its transitions.
//!
//! [`ViewState::apply`] is a pure function of the old state and one event, so
//! paging and query behaviour can be tested without a table or a clock.

use log::trace;

use crate::pagination;

/// Page and query state owned by one table view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Zero-based current page.
    pub page: usize,
    /// Search input as typed, updated on every keystroke.
    pub raw_query: String,
    /// Debounced query the rows are actually filtered by.
    pub committed_query: String,
}

/// Something that happened to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The search input changed.
    Keystroke(String),
    /// The debounce released a query.
    Commit(String),
    /// Forward control pressed.
    NextPage,
    /// Back control pressed.
    PrevPage,
    /// Jump to a page.
    GoToPage(usize),
    /// The dataset was replaced.
    DataReplaced,
    /// The page size changed.
    PageSizeChanged,
}

/// Size of the filtered result the event applies to.
///
/// For [`ViewEvent::Commit`] and [`ViewEvent::DataReplaced`] this is the size
/// after the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Number of filtered rows.
    pub len: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Extent {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self { len, page_size }
    }
}

impl ViewState {
    /// Fresh state: first page, empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event.
    ///
    /// The page returns to 0 whenever the committed query actually changes,
    /// the dataset is replaced or the page size changes. Navigation past
    /// either end is a no-op.
    pub fn apply(self, event: &ViewEvent, extent: Extent) -> Self {
        trace!("ViewState::apply {:?} ({:?})", event, extent);
        let Extent { len, page_size } = extent;

        match event {
            ViewEvent::Keystroke(raw) => Self {
                raw_query: raw.clone(),
                ..self
            },
            ViewEvent::Commit(query) if *query == self.committed_query => self,
            ViewEvent::Commit(query) => Self {
                page: 0,
                committed_query: query.clone(),
                ..self
            },
            ViewEvent::NextPage => Self {
                page: pagination::next_page(self.page, len, page_size),
                ..self
            },
            ViewEvent::PrevPage => Self {
                page: pagination::prev_page(self.page),
                ..self
            },
            ViewEvent::GoToPage(page) => Self {
                page: pagination::clamp_page(*page, len, page_size),
                ..self
            },
            ViewEvent::DataReplaced | ViewEvent::PageSizeChanged => Self { page: 0, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(page: usize) -> ViewState {
        ViewState {
            page,
            ..ViewState::new()
        }
    }

    #[test]
    fn test_keystroke_only_touches_raw_query() {
        let state = on_page(2).apply(&ViewEvent::Keystroke("kh".into()), Extent::new(30, 5));
        assert_eq!(state.page, 2);
        assert_eq!(state.raw_query, "kh");
        assert_eq!(state.committed_query, "");
    }

    #[test]
    fn test_commit_resets_page() {
        let state = on_page(3).apply(&ViewEvent::Commit("khan".into()), Extent::new(2, 5));
        assert_eq!(state.page, 0);
        assert_eq!(state.committed_query, "khan");
    }

    #[test]
    fn test_commit_of_same_query_keeps_page() {
        let state = ViewState {
            page: 1,
            committed_query: "khan".into(),
            ..ViewState::new()
        };
        let state = state.apply(&ViewEvent::Commit("khan".into()), Extent::new(12, 5));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_data_replaced_and_page_size_reset_page() {
        let extent = Extent::new(40, 5);
        assert_eq!(on_page(4).apply(&ViewEvent::DataReplaced, extent).page, 0);
        assert_eq!(on_page(4).apply(&ViewEvent::PageSizeChanged, extent).page, 0);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let extent = Extent::new(12, 5);
        let state = on_page(2).apply(&ViewEvent::NextPage, extent);
        assert_eq!(state.page, 2);
        let state = on_page(0).apply(&ViewEvent::PrevPage, extent);
        assert_eq!(state.page, 0);
        let state = on_page(0).apply(&ViewEvent::GoToPage(99), extent);
        assert_eq!(state.page, 2);
    }
}
