//! Shared query parameter types for listing handlers.
//!
//! Every listing accepts `page`, `limit` and `isDeleted`. Values stay raw
//! strings here; the lenient parsing rules live in `crowdwatch_core`.

use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination and soft-delete parameters (`?page=&limit=&isDeleted=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub is_deleted: Option<String>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn deleted(&self) -> DeletedFilter {
        DeletedFilter::from_param(self.is_deleted.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_falls_back_to_defaults() {
        let p = PageParams {
            page: Some("abc".into()),
            limit: Some("200".into()),
            is_deleted: Some("yes".into()),
        };
        let req = p.page_request();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 100);
        assert_eq!(p.deleted(), DeletedFilter::Active);
    }
}
