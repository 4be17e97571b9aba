//! Shared request/response types

use serde::{Deserialize, Serialize};

/// Page/limit query parameters for paginated listings
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Normalized (page, limit) with the defaults every listing uses
    pub fn normalize(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20).clamp(1, 200);
        (page, limit)
    }
}

/// Pagination block attached to every paginated listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(rename = "currentPage")]
    pub current_page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalItems")]
    pub total_items: u64,
    #[serde(rename = "itemsPerPage")]
    pub items_per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            current_page: page,
            total_pages: total.div_ceil(limit as u64) as u32,
            total_items: total,
            items_per_page: limit,
        }
    }
}

/// Bulk soft-delete request body
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteManyRequest {
    pub ids: Vec<String>,
}

/// Bulk soft-delete result
#[derive(Debug, Clone, Serialize)]
pub struct DeleteManyResponse {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_pages_up() {
        let p = Pagination::new(1, 20, 41);
        assert_eq!(p.total_pages, 3);
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
    }

    #[test]
    fn page_query_defaults() {
        let q = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.normalize(), (1, 20));
        let q = PageQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.normalize(), (1, 200));
    }
}
