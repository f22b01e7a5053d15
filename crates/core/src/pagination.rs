//! Page arithmetic for every listing endpoint.
//!
//! Listings return `{ metadata, data }` where `metadata` reports the total
//! number of matching rows and how they split into pages. Callers build a
//! [`PageRequest`] from raw query-string values, run a count and a windowed
//! data query, then wrap the result in [`Page`].

use serde::Serialize;

/// Page used when the caller supplies none (or garbage).
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when the caller supplies none (or garbage).
pub const DEFAULT_LIMIT: i64 = 10;
/// Hard upper bound on the page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, substituting `default` for `None`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Floor a user-provided page number at 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// A validated `(page, limit)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Build from already-parsed values, applying defaults and bounds.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
        }
    }

    /// Build from raw query-string values.
    ///
    /// Values that do not parse as integers fall back to the defaults rather
    /// than failing the request.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(limit))
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Page metadata reported alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub total_results: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PageMetadata {
    pub fn new(total_results: i64, request: PageRequest) -> Self {
        Self {
            total_results,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total_results, request.limit),
        }
    }
}

/// `ceil(total_results / limit)`; zero when there are no results.
pub fn total_pages(total_results: i64, limit: i64) -> i64 {
    if total_results <= 0 || limit <= 0 {
        return 0;
    }
    (total_results + limit - 1) / limit
}

/// One page of results plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub metadata: PageMetadata,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total_results: i64, request: PageRequest, data: Vec<T>) -> Self {
        Self {
            metadata: PageMetadata::new(total_results, request),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn defaults_when_absent() {
        let req = PageRequest::from_raw(None, None);
        assert_eq!(req, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn limit_above_max_is_clamped() {
        let req = PageRequest::from_raw(Some("3"), Some("200"));
        assert_eq!(req.limit, 100);
        assert_eq!(req.page, 3);
    }

    #[test]
    fn page_zero_is_floored_to_one() {
        let req = PageRequest::from_raw(Some("0"), None);
        assert_eq!(req.page, 1);
        let req = PageRequest::from_raw(Some("-4"), None);
        assert_eq!(req.page, 1);
    }

    #[test]
    fn limit_zero_is_floored_to_one() {
        assert_eq!(PageRequest::from_raw(None, Some("0")).limit, 1);
        assert_eq!(PageRequest::from_raw(None, Some("-5")).limit, 1);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let req = PageRequest::from_raw(Some("abc"), Some("ten"));
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(Some(1), Some(10)).offset(), 0);
        assert_eq!(PageRequest::new(Some(3), Some(25)).offset(), 50);
    }

    // -- total_pages ---------------------------------------------------------

    #[test]
    fn total_pages_is_ceiling_division() {
        for (total, limit, expected) in [
            (0, 10, 0),
            (1, 10, 1),
            (10, 10, 1),
            (11, 10, 2),
            (99, 100, 1),
            (101, 100, 2),
            (7, 1, 7),
        ] {
            assert_eq!(total_pages(total, limit), expected, "total={total} limit={limit}");
        }
    }

    #[test]
    fn empty_metadata_reports_request_and_zero_pages() {
        let meta = PageMetadata::new(0, PageRequest::new(Some(2), Some(5)));
        assert_eq!(
            meta,
            PageMetadata {
                total_results: 0,
                page: 2,
                limit: 5,
                total_pages: 0
            }
        );
    }

    #[test]
    fn page_serializes_with_snake_case_metadata() {
        let page = Page::new(3, PageRequest::default(), vec![1, 2, 3]);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["metadata"]["total_results"], 3);
        assert_eq!(json["metadata"]["total_pages"], 1);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
