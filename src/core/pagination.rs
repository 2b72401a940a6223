//! In-memory pagination over a filtered catalog view

use serde::{Deserialize, Serialize};

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: usize = 100;

/// Page selection
///
/// # Example
/// ```
/// use giftshop::core::pagination::{PageRequest, paginate};
///
/// let page = paginate(&[1, 2, 3, 4, 5], PageRequest::new(2, 2));
/// assert_eq!(page.data, vec![3, 4]);
/// assert!(page.pagination.has_next);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, clamped to `1..=MAX_PAGE_LIMIT`
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    /// The items on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

/// Cut one page out of `items`; a page past the end is empty
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Paginated<T> {
    let page = request.page();
    let limit = request.limit();
    let start = (page - 1).saturating_mul(limit);

    let data = items.iter().skip(start).take(limit).cloned().collect();

    Paginated {
        data,
        pagination: PaginationMeta::new(page, limit, items.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 5000);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), MAX_PAGE_LIMIT);
        assert_eq!(PageRequest::new(1, 0).limit(), 1);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<u32> = (1..=7).collect();
        let page = paginate(&items, PageRequest::new(3, 3));
        assert_eq!(page.data, vec![7]);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate(&[1, 2, 3], PageRequest::new(9, 2));
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate::<u8>(&[], PageRequest::default());
        assert!(page.data.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next);
    }
}
