//! Pagination types for CareerGuide list endpoints.
//!
//! `PageRequest` normalizes raw client input, `PageMeta` carries the
//! derived navigation facts, and `Page<T>` bundles a slice of items with
//! its metadata.

use serde::{Deserialize, Serialize};

/// A normalized pagination request.
///
/// Construct via [`PageRequest::new`], which clamps the raw values:
/// `page` is at least 1, `limit` is within `1..=max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32, max_limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Navigation metadata for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Derive metadata from the requested page and the total row count.
    ///
    /// `total_pages` is the ceiling of `total_count / limit` (zero when
    /// there are no rows). A request past the end yields an empty page
    /// whose flags still describe the real boundaries.
    pub fn compute(request: PageRequest, total_count: u64) -> Self {
        let limit = u64::from(request.limit);
        let total_pages = u32::try_from(total_count.div_ceil(limit)).unwrap_or(u32::MAX);
        Self {
            current_page: request.page,
            total_pages,
            total_count,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

/// A page of items plus its navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_low_values() {
        let req = PageRequest::new(0, 0, 50);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
    }

    #[test]
    fn test_page_request_clamps_limit_to_max() {
        let req = PageRequest::new(2, 500, 50);
        assert_eq!(req.page, 2);
        assert_eq!(req.limit, 50);
    }

    #[test]
    fn test_page_request_offset() {
        let req = PageRequest::new(3, 7, 50);
        assert_eq!(req.offset(), 14);
    }

    #[test]
    fn test_page_meta_seven_sessions_limit_five() {
        // 7 rows at limit 5: two pages, the second holding the final 2 rows.
        let meta = PageMeta::compute(PageRequest::new(2, 5, 50), 7);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.total_count, 7);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_page_meta_first_of_many() {
        let meta = PageMeta::compute(PageRequest::new(1, 5, 50), 7);
        assert_eq!(meta.current_page, 1);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_page_meta_exact_multiple() {
        let meta = PageMeta::compute(PageRequest::new(2, 5, 50), 10);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_page_meta_empty() {
        let meta = PageMeta::compute(PageRequest::new(1, 7, 50), 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total_count, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_page_meta_past_the_end() {
        let meta = PageMeta::compute(PageRequest::new(5, 5, 50), 7);
        assert_eq!(meta.current_page, 5);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_page_serialize() {
        let page = Page {
            items: vec!["a".to_string()],
            meta: PageMeta::compute(PageRequest::new(1, 7, 50), 1),
        };
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("\"total_count\":1"));
        assert!(json.contains("\"has_next_page\":false"));
    }
}
