use serde::{Deserialize, Serialize};

use crate::api::middleware::error::{ApiError, ApiResult};

pub const MAX_PER_PAGE: i64 = 100;

pub fn default_page() -> i64 {
    1
}

pub fn default_per_page() -> i64 {
    20
}

/// One-indexed page request: page 1 is the first page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: i64,
    pub per_page: i64,
}

impl PageQuery {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.page < 1 {
            return Err(ApiError::BadRequest(
                "Page numbering starts at 1".to_string(),
            ));
        }
        if self.per_page < 1 || self.per_page > MAX_PER_PAGE {
            return Err(ApiError::BadRequest(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMetadata {
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl PaginationMetadata {
    pub fn new(query: PageQuery, total_count: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + query.per_page - 1) / query.per_page
        };

        Self {
            page: query.page,
            per_page: query.per_page,
            total_count,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_has_zero_offset() {
        let query = PageQuery::new(1, 20);
        assert!(query.validate().is_ok());
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_second_page_offset() {
        let query = PageQuery::new(2, 25);
        assert_eq!(query.offset(), 25);
    }

    #[test]
    fn test_zero_indexed_page_rejected() {
        assert!(PageQuery::new(0, 20).validate().is_err());
        assert!(PageQuery::new(-1, 20).validate().is_err());
    }

    #[test]
    fn test_per_page_bounds() {
        assert!(PageQuery::new(1, 0).validate().is_err());
        assert!(PageQuery::new(1, MAX_PER_PAGE + 1).validate().is_err());
        assert!(PageQuery::new(1, MAX_PER_PAGE).validate().is_ok());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = PaginationMetadata::new(PageQuery::new(1, 20), 41);
        assert_eq!(meta.total_pages, 3);

        let empty = PaginationMetadata::new(PageQuery::new(1, 20), 0);
        assert_eq!(empty.total_pages, 0);
    }
}
