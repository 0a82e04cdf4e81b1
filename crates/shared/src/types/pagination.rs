//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Clamps the request into `1..=max_per_page` items on a page `>= 1`.
    #[must_use]
    pub fn clamped(self, max_per_page: u32) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, max_per_page.max(1)),
        }
    }

    /// Number of items to skip.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) as usize * self.per_page as usize
    }

    /// Maximum number of items to return.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a later page has items.
    pub has_more: bool,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let per_page_total = u64::from(per_page.max(1));
        let total_pages = if total == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(per_page_total)).unwrap_or(u32::MAX)
        };

        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages,
                has_more: u64::from(page) * per_page_total < total,
            },
        }
    }

    /// Maps every item, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
