use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::PageRange;

pub const DEFAULT_PAGE: u32 = 1;
pub const MAX_LIMIT: u32 = 50;

/// A validated page request: `page >= 1`, `1 <= limit <= 50`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PageRequest {
    #[validate(range(min = 1))]
    page: u32,
    #[validate(range(min = 1, max = 50))]
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> CatalogResult<Self> {
        let request = Self { page, limit };
        request
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        Ok(request)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub fn range(&self) -> PageRange {
        PageRange {
            offset: self.offset(),
            limit: u64::from(self.limit),
        }
    }
}

/// One page of results plus the totals across all pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Zero matches for `request`
    pub fn empty(request: PageRequest) -> Self {
        paginate(request, 0, Vec::new())
    }
}

/// Package `items` into a page. `total == 0` always yields no items.
pub fn paginate<T>(request: PageRequest, total: u64, items: Vec<T>) -> Page<T> {
    let data = if total == 0 { Vec::new() } else { items };

    Page {
        data,
        total,
        page: request.page,
        limit: request.limit,
        total_pages: total.div_ceil(u64::from(request.limit)),
    }
}

/// `page` / `limit` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1
    #[validate(range(min = 1))]
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size, 1 to 50
    #[validate(range(min = 1, max = 50))]
    #[param(minimum = 1, maximum = 50)]
    pub limit: Option<u32>,
}

impl PageParams {
    /// Fill in missing values with the endpoint's default limit.
    pub fn resolve(&self, default_limit: u32) -> CatalogResult<PageRequest> {
        PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.limit.unwrap_or(default_limit),
        )
    }
}
