use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagination block attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    #[schema(minimum = 1)]
    pub page: u32,
    #[schema(minimum = 1)]
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        Self {
            page: page.max(1),
            limit,
            total,
            pages: total.div_ceil(u64::from(limit)),
        }
    }

    /// Metadata for a single page that starts at the beginning of the result set
    pub fn first_page(limit: u32, total: u64) -> Self {
        Self::new(1, limit, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_round_up() {
        let meta = PaginationMeta::new(1, 10, 21);
        assert_eq!(meta.pages, 3);
        assert_eq!(meta.total, 21);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let meta = PaginationMeta::first_page(10, 0);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.pages, 0);
    }

    #[test]
    fn test_page_and_limit_never_below_one() {
        let meta = PaginationMeta::new(0, 0, 5);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.limit, 1);
        assert_eq!(meta.pages, 5);
    }
}
