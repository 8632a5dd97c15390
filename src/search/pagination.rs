use serde::{Deserialize, Serialize};

/// A 1-based page of `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// First row of the page, zero-based.
    pub fn from(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Last row of the page, inclusive.
    pub fn to(&self) -> i64 {
        self.from().saturating_add(self.limit - 1)
    }

    /// `(from, to)` when the page's rows are addressable without overflow.
    pub fn checked_range(&self) -> Option<(i64, i64)> {
        let from = (self.page - 1).checked_mul(self.limit)?;
        let to = from.checked_add(self.limit - 1)?;
        Some((from, to))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let total = total.max(0);
        let total_pages = total / request.limit + i64::from(total % request.limit != 0);
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_range_for_second_page() {
        let req = PageRequest::new(2, 5);
        assert_eq!((req.from(), req.to()), (5, 9));
        assert_eq!(PageRequest::new(1, 10).from(), 0);
        assert_eq!(PageRequest::new(1, 10).to(), 9);
    }

    #[test]
    fn huge_pages_do_not_overflow() {
        let req = PageRequest::new(i64::MAX, 50);
        assert_eq!(req.checked_range(), None);
        assert_eq!(req.from(), i64::MAX);
        assert_eq!(req.to(), i64::MAX);
        assert_eq!(PageRequest::new(3, 5).checked_range(), Some((10, 14)));
    }

    #[test]
    fn twelve_rows_in_pages_of_five() {
        let p = Pagination::new(PageRequest::new(2, 5), 12);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);

        let last = Pagination::new(PageRequest::new(3, 5), 12);
        assert!(!last.has_next);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let p = Pagination::new(PageRequest::new(1, 10), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn page_beyond_the_end_still_reports_prev() {
        let p = Pagination::new(PageRequest::new(7, 10), 15);
        assert_eq!(p.total_pages, 2);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(Pagination::new(PageRequest::new(1, 10), 20).total_pages, 2);
        assert_eq!(Pagination::new(PageRequest::new(1, 10), 21).total_pages, 3);
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(Pagination::new(PageRequest::new(1, 10), 3)).unwrap();
        assert_eq!(v["totalPages"], 1);
        assert_eq!(v["hasNext"], false);
        assert_eq!(v["hasPrev"], false);
    }
}
