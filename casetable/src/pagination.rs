//! Page arithmetic over an already filtered result set.
//!
//! Pages are zero-based. Every function is total: a page size of zero is
//! treated as one and out-of-range pages are clamped.

/// Number of pages for `len` rows, never less than one.
///
/// An empty result still has one (empty) page, so "Page 1 of 1" is always a
/// valid label.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp `page` into `0..page_count(len, page_size)`.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.min(page_count(len, page_size) - 1)
}

/// Returns `true` if a page follows `page`.
pub fn has_next(page: usize, len: usize, page_size: usize) -> bool {
    page.saturating_add(1).saturating_mul(page_size.max(1)) < len
}

/// Returns `true` if a page precedes `page`.
pub fn has_prev(page: usize) -> bool {
    page > 0
}

/// The page after `page`, or `page` itself on the last page.
pub fn next_page(page: usize, len: usize, page_size: usize) -> usize {
    if has_next(page, len, page_size) {
        page + 1
    } else {
        page
    }
}

/// The page before `page`, or `0` on the first page.
pub fn prev_page(page: usize) -> usize {
    page.saturating_sub(1)
}

/// One page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    /// Items on this page.
    pub visible: &'a [T],
    /// Zero-based page index, after clamping.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Number of items across all pages.
    pub total: usize,
}

impl<T> PageSlice<'_, T> {
    /// Returns `true` if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    /// Returns `true` if a page precedes this one.
    pub fn has_prev(&self) -> bool {
        has_prev(self.page)
    }
}

/// Slice out page `page` of `items`.
///
/// # Example
///
/// ```
/// use casetable::pagination::paginate;
///
/// let cases: Vec<u32> = (0..12).collect();
/// let page = paginate(&cases, 2, 5);
/// assert_eq!(page.visible, &[10, 11]);
/// assert_eq!(page.page_count, 3);
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let page = clamp_page(page, items.len(), page_size);
    let start = (page * page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    PageSlice {
        visible: &items[start..end],
        page,
        page_count: page_count(items.len(), page_size),
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_has_one_page() {
        assert_eq!(page_count(0, 5), 1);
        let page = paginate::<u8>(&[], 0, 5);
        assert!(page.visible.is_empty());
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_twelve_rows_by_five() {
        let rows: Vec<u32> = (0..12).collect();
        assert_eq!(page_count(rows.len(), 5), 3);

        let mut page = 0;
        page = next_page(page, rows.len(), 5);
        page = next_page(page, rows.len(), 5);
        assert_eq!(page, 2);
        assert_eq!(paginate(&rows, page, 5).visible, &[10, 11]);

        assert_eq!(next_page(page, rows.len(), 5), 2);
        assert!(!has_next(page, rows.len(), 5));
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_page() {
        assert_eq!(page_count(10, 5), 2);
        assert!(!has_next(1, 10, 5));
        assert!(has_next(0, 10, 5));
    }

    #[test]
    fn test_prev_at_zero_is_noop() {
        assert_eq!(prev_page(0), 0);
        assert_eq!(prev_page(3), 2);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let rows: Vec<u32> = (0..7).collect();
        let page = paginate(&rows, 40, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.visible, &[5, 6]);
    }

    #[test]
    fn test_zero_page_size_acts_as_one() {
        let rows = [1, 2, 3];
        assert_eq!(page_count(rows.len(), 0), 3);
        assert_eq!(paginate(&rows, 1, 0).visible, &[2]);
    }

    proptest! {
        #[test]
        fn prop_page_count_formula(len in 0usize..500, size in 1usize..50) {
            let expected = std::cmp::max(1, len.div_ceil(size));
            prop_assert_eq!(page_count(len, size), expected);
        }

        #[test]
        fn prop_pages_cover_items_exactly(len in 0usize..200, size in 1usize..20) {
            let items: Vec<usize> = (0..len).collect();
            let mut seen = Vec::new();
            for page in 0..page_count(len, size) {
                seen.extend_from_slice(paginate(&items, page, size).visible);
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn prop_next_on_last_page_is_idempotent(len in 0usize..200, size in 1usize..20) {
            let last = page_count(len, size) - 1;
            prop_assert_eq!(next_page(last, len, size), last);
        }
    }
}
