use crate::query::QueryError;
use serde::{Deserialize, Serialize};

///
/// ListPolicy
/// Bounds applied to every list request.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ListPolicy {
    /// Page size used when a request leaves `page_size` at zero.
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Longest accepted filter string, in bytes.
    pub max_filter_len: usize,
}

impl ListPolicy {
    pub const DEFAULT_PAGE_SIZE: u32 = 50;
    pub const MAX_PAGE_SIZE: u32 = 1000;
    pub const MAX_FILTER_LEN: usize = 4096;

    /// Resolve the page size a request actually gets.
    pub fn effective_page_size(&self, requested: u32) -> Result<u32, QueryError> {
        if requested == 0 {
            return Ok(self.default_page_size);
        }
        if requested > self.max_page_size {
            return Err(QueryError::PageSizeTooLarge {
                requested,
                max: self.max_page_size,
            });
        }

        Ok(requested)
    }
}

impl Default for ListPolicy {
    fn default() -> Self {
        Self {
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            max_page_size: Self::MAX_PAGE_SIZE,
            max_filter_len: Self::MAX_FILTER_LEN,
        }
    }
}

///
/// ListQuery
///
/// Raw list request parameters as received from the transport.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ListQuery {
    pub filter: String,
    pub order_by: String,
    pub offset: u64,
    /// Zero selects the policy default.
    pub page_size: u32,
    /// Empty on the first page.
    pub page_token: String,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn page_token(mut self, page_token: impl Into<String>) -> Self {
        self.page_token = page_token.into();
        self
    }
}
