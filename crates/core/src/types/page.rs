//! Pagination request.

use serde::{Deserialize, Serialize};

/// A 1-based page request with a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page size used when the caller does not ask for one.
    pub const DEFAULT_LIMIT: u32 = 24;
    /// Largest page size a caller may request.
    pub const MAX_LIMIT: u32 = 60;

    /// Create a page request, clamping `page` to at least 1 and `limit` to
    /// `[1, MAX_LIMIT]`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Build a page request from raw parameter values.
    ///
    /// A missing, non-numeric, zero or negative page becomes 1. A missing,
    /// non-numeric or zero limit becomes [`Self::DEFAULT_LIMIT`]; anything
    /// else is clamped.
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map_or(1, |p| u32::try_from(p).unwrap_or(u32::MAX));

        let limit = match limit.and_then(|l| l.trim().parse::<i64>().ok()) {
            None | Some(0) => Self::DEFAULT_LIMIT,
            Some(l) if l < 0 => 1,
            Some(l) => u32::try_from(l).unwrap_or(Self::MAX_LIMIT),
        };

        Self::new(page, limit)
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Number of pages needed for `total` rows (at least 1).
    #[must_use]
    pub fn total_pages(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit);
        ((total.max(0) + limit - 1) / limit).max(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::from_params(None, None);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), PageRequest::DEFAULT_LIMIT);
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(PageRequest::from_params(Some("0"), None).page(), 1);
        assert_eq!(PageRequest::from_params(Some("-3"), None).page(), 1);
        assert_eq!(PageRequest::from_params(Some("two"), None).page(), 1);
        assert_eq!(PageRequest::from_params(Some("4"), None).page(), 4);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageRequest::from_params(None, Some("0")).limit(), 24);
        assert_eq!(PageRequest::from_params(None, Some("abc")).limit(), 24);
        assert_eq!(PageRequest::from_params(None, Some("-10")).limit(), 1);
        assert_eq!(PageRequest::from_params(None, Some("500")).limit(), 60);
        assert_eq!(PageRequest::from_params(None, Some("12")).limit(), 12);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 24).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        let page = PageRequest::new(1, 10);
        assert_eq!(page.total_pages(0), 1);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
        assert_eq!(page.total_pages(30), 3);
    }
}
