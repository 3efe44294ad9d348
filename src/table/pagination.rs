//! Pagination state machine.
//!
//! [`Pagination`] tracks the current page against a total item count and a page
//! size. Slice bounds and navigation availability are derived on every read, so
//! they can never go stale after the item count changes.
//!
//! # Invariants
//!
//! - `items_per_page >= 1` (zero is clamped to one)
//! - `1 <= current_page <= max(total_pages, 1)` after any change of
//!   `total_items` or `items_per_page`
//! - navigation requests outside the valid range are silently ignored
//!
//! # Example
//!
//! ```
//! use planboard::Pagination;
//!
//! let mut pages = Pagination::new(25, 10, 1);
//! assert_eq!(pages.total_pages(), 3);
//!
//! pages.go_to_last_page();
//! let info = pages.info();
//! assert_eq!((info.start_index, info.end_index), (20, 30));
//! assert_eq!(info.last_item, 25);
//! assert!(!info.has_next_page);
//! ```

use serde::Serialize;

/// Snapshot of the derived pagination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    /// Inclusive start of the page slice.
    pub start_index: usize,
    /// Exclusive end of the page slice; may exceed `total_items`.
    pub end_index: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub total_items: usize,
    /// One-based position of the first visible item, 0 when nothing is visible.
    pub first_item: usize,
    /// One-based position of the last visible item, 0 when nothing is visible.
    pub last_item: usize,
}

/// Current page, page size and item count of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl Pagination {
    /// Creates pagination state starting at `initial_page`.
    ///
    /// A zero `items_per_page` is treated as one. The initial page is clamped to
    /// the valid range.
    #[must_use]
    pub fn new(total_items: usize, items_per_page: usize, initial_page: usize) -> Self {
        let mut pagination = Self {
            current_page: initial_page,
            items_per_page: sanitize_page_size(items_per_page),
            total_items,
        };
        pagination.clamp_current_page();
        pagination
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages needed for `total_items`; zero when there are no items.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.items_per_page)
    }

    #[must_use]
    pub const fn start_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page
    }

    #[must_use]
    pub const fn end_index(&self) -> usize {
        self.start_index() + self.items_per_page
    }

    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Returns all derived values at once.
    #[must_use]
    pub fn info(&self) -> PageInfo {
        let start_index = self.start_index();
        let last_item = (self.current_page * self.items_per_page).min(self.total_items);
        let first_item = if last_item > start_index { start_index + 1 } else { 0 };

        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            start_index,
            end_index: self.end_index(),
            has_next_page: self.has_next_page(),
            has_previous_page: self.has_previous_page(),
            total_items: self.total_items,
            first_item,
            last_item: if first_item == 0 { 0 } else { last_item },
        }
    }

    /// Returns the current page's slice of `items`.
    ///
    /// Tolerates `end_index` running past the end of `items` (fewer rows are
    /// returned) and a start beyond the end (no rows).
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index().min(items.len());
        let end = self.end_index().min(items.len());
        &items[start..end]
    }

    /// Jumps to `page` if `1 <= page <= total_pages`; otherwise does nothing.
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        } else {
            tracing::trace!(page, total_pages = self.total_pages(), "ignoring out-of-range page");
        }
    }

    pub fn go_to_next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    pub fn go_to_previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        }
    }

    pub fn go_to_first_page(&mut self) {
        self.current_page = 1;
    }

    /// Jumps to the last page, or page 1 when there are no items.
    pub fn go_to_last_page(&mut self) {
        self.current_page = self.total_pages().max(1);
    }

    /// Updates the item count and re-clamps the current page.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp_current_page();
    }

    /// Updates the page size and re-clamps the current page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = sanitize_page_size(items_per_page);
        self.clamp_current_page();
    }

    fn clamp_current_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, crate::DEFAULT_PAGE_SIZE, 1)
    }
}

fn sanitize_page_size(items_per_page: usize) -> usize {
    if items_per_page == 0 {
        tracing::warn!("page size of zero requested, using 1");
        1
    } else {
        items_per_page
    }
}
