//! Page windows and page-number controls.
//!
//! Pages are 1-based. The current page is always clamped to
//! `[1, total_pages]` (or to 1 while the collection is empty), and changing the
//! page size starts over from page 1.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which side slices the collection into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationMode {
    /// The source receives `offset`/`limit` and reports the total count.
    Server,
    /// One bounded window is fetched and sliced locally.
    Client,
}

/// The `{current_page, page_size}` pair a list is viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    pub current_page: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Both values are raised to at least 1.
    #[must_use]
    pub fn new(current_page: u64, page_size: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// `(current_page - 1) * page_size`
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.current_page.saturating_sub(1).saturating_mul(self.page_size)
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Index range of the visible page within the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Inclusive
    pub start_index: usize,
    /// Exclusive
    pub end_index: usize,
    pub total_pages: u64,
}

/// One entry of a page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    Page(u64),
    Ellipsis,
}

/// Current page position over a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    window: PageWindow,
    total_items: u64,
}

fn to_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl Paginator {
    #[must_use]
    pub fn new(page_size: u64) -> Self {
        Self {
            window: PageWindow::first(page_size),
            total_items: 0,
        }
    }

    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }

    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.window.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.window.page_size
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// `ceil(total_items / page_size)`; zero for an empty collection.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(self.window.page_size)
    }

    /// Records a new collection size and re-clamps the current page, e.g. after
    /// deleting the last row of the last page.
    pub fn set_total(&mut self, total_items: u64) {
        self.total_items = total_items;
        let clamped = self.clamp(self.window.current_page);
        if clamped != self.window.current_page {
            trace!(
                from = self.window.current_page,
                to = clamped,
                "Current page clamped after total changed"
            );
            self.window.current_page = clamped;
        }
    }

    fn clamp(&self, page: u64) -> u64 {
        page.clamp(1, self.total_pages().max(1))
    }

    /// Moves to `page`, clamped into range. Returns the page actually selected.
    pub fn go_to(&mut self, page: u64) -> u64 {
        self.window.current_page = self.clamp(page);
        self.window.current_page
    }

    pub fn next(&mut self) -> u64 {
        self.go_to(self.window.current_page.saturating_add(1))
    }

    pub fn previous(&mut self) -> u64 {
        self.go_to(self.window.current_page.saturating_sub(1))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.window.current_page < self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.window.current_page > 1
    }

    /// Changes rows per page and returns to page 1.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.window = PageWindow::first(page_size);
    }

    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        let total = to_index(self.total_items);
        let start_index = to_index(self.window.offset()).min(total);
        let end_index = start_index
            .saturating_add(to_index(self.window.page_size))
            .min(total);

        PageBounds {
            start_index,
            end_index,
            total_pages: self.total_pages(),
        }
    }

    /// The visible part of a locally held collection.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let bounds = self.bounds();
        let end = bounds.end_index.min(items.len());
        let start = bounds.start_index.min(end);
        &items[start..end]
    }

    /// Page buttons: first, last and current +/- 1, with ellipses over gaps.
    #[must_use]
    pub fn page_buttons(&self) -> Vec<PageButton> {
        let total_pages = self.total_pages();
        let current = self.window.current_page;

        let mut pages = vec![
            1,
            current.saturating_sub(1),
            current,
            current.saturating_add(1),
            total_pages,
        ];
        pages.retain(|page| (1..=total_pages).contains(page));
        pages.sort_unstable();
        pages.dedup();

        let mut buttons = Vec::with_capacity(pages.len() * 2);
        let mut last_shown = 0;
        for page in pages {
            if last_shown != 0 && page > last_shown + 1 {
                buttons.push(PageButton::Ellipsis);
            }
            buttons.push(PageButton::Page(page));
            last_shown = page;
        }

        buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageButton::{Ellipsis, Page};

    fn paginator(total: u64, page_size: u64) -> Paginator {
        let mut paginator = Paginator::new(page_size);
        paginator.set_total(total);
        paginator
    }

    #[test]
    fn test_window_offset() {
        assert_eq!(PageWindow::new(1, 10).offset(), 0);
        assert_eq!(PageWindow::new(3, 10).offset(), 20);
        assert_eq!(PageWindow::new(0, 0), PageWindow::new(1, 1));
    }

    #[test]
    fn test_last_partial_page_bounds() {
        let mut paginator = paginator(23, 10);
        assert_eq!(paginator.total_pages(), 3);

        paginator.go_to(3);
        let bounds = paginator.bounds();
        assert_eq!(bounds.start_index, 20);
        assert_eq!(bounds.end_index, 23);

        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(paginator.slice(&items), &[21, 22, 23]);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut paginator = paginator(23, 10);
        assert_eq!(paginator.go_to(0), 1);
        assert_eq!(paginator.go_to(99), 3);
        assert_eq!(paginator.next(), 3);
        assert!(!paginator.has_next());
        assert_eq!(paginator.previous(), 2);
        assert!(paginator.has_previous());
    }

    #[test]
    fn test_empty_collection_stays_on_page_one() {
        let mut paginator = paginator(0, 10);
        assert_eq!(paginator.total_pages(), 0);
        assert_eq!(paginator.go_to(5), 1);
        let bounds = paginator.bounds();
        assert_eq!((bounds.start_index, bounds.end_index), (0, 0));
        assert!(paginator.page_buttons().is_empty());
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let mut paginator = paginator(95, 10);
        paginator.go_to(7);
        paginator.set_page_size(25);
        assert_eq!(paginator.current_page(), 1);
        assert_eq!(paginator.total_pages(), 4);
    }

    #[test]
    fn test_shrinking_total_reclamps_current_page() {
        let mut paginator = paginator(21, 10);
        paginator.go_to(3);
        paginator.set_total(20);
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_page_buttons_collapse_long_ranges() {
        let mut paginator = paginator(100, 10);
        paginator.go_to(5);
        assert_eq!(
            paginator.page_buttons(),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );

        paginator.go_to(1);
        assert_eq!(
            paginator.page_buttons(),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );

        paginator.go_to(10);
        assert_eq!(
            paginator.page_buttons(),
            vec![Page(1), Ellipsis, Page(9), Page(10)]
        );
    }

    #[test]
    fn test_page_buttons_short_range_has_no_ellipsis() {
        let mut paginator = paginator(30, 10);
        paginator.go_to(2);
        assert_eq!(paginator.page_buttons(), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_page_buttons_on_huge_totals() {
        let mut paginator = paginator(u64::MAX, 1);
        let middle = u64::MAX / 2;
        paginator.go_to(middle);
        assert_eq!(
            paginator.page_buttons(),
            vec![
                Page(1),
                Ellipsis,
                Page(middle - 1),
                Page(middle),
                Page(middle + 1),
                Ellipsis,
                Page(u64::MAX)
            ]
        );
    }
}
