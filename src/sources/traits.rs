use async_trait::async_trait;

use crate::domain::ProductEntry;
use crate::errors::MarketResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub offset: usize,
    pub limit: usize,
    pub query: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch up to `params.limit` products starting at `params.offset`.
    /// Returning fewer than the limit is legal even when more exist.
    async fn fetch(&self, params: &FetchParams) -> MarketResult<Vec<ProductEntry>>;
}
