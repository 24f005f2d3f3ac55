//! Pagination.

use serde::{Deserialize, Serialize};

/// Products shown per listing page.
pub const PAGE_SIZE: usize = 12;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages. Never less than 1.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// The slice of `items` belonging to this page. Empty past the last page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        if self.page == 0 {
            return &[];
        }
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.page == 0 || self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number, 0 when the page is empty.
    pub fn end_item(&self) -> usize {
        if self.start_item() == 0 {
            0
        } else {
            self.page.saturating_mul(self.per_page).min(self.total)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, PAGE_SIZE, 0)
    }
}
