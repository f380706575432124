use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::ProductEntry;
use crate::errors::{MarketError, MarketResult};
use crate::sources::normalize::normalize_products;
use crate::sources::traits::{FetchParams, ProductSource};

/// Columns a text query is matched against on the server
const SEARCH_COLUMNS: &[&str] = &["title", "description", "sub_category", "article_type"];

/// Reads products from a hosted database's REST endpoint (PostgREST dialect)
pub struct RestProductSource {
    client: Client,
    base_url: Url,
    table: String,
    api_key: Option<String>,
}

impl RestProductSource {
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> MarketResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| MarketError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            table: table.to_string(),
            api_key,
        })
    }

    /// Build the request URL for one page
    fn build_url(&self, params: &FetchParams) -> MarketResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", self.table.as_str()]);

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("select", "*")
                .append_pair("offset", &params.offset.to_string())
                .append_pair("limit", &params.limit.to_string());

            if let Some(filter) = Self::search_filter(params.query.as_deref()) {
                query.append_pair("or", &filter);
            }
        }

        Ok(url)
    }

    /// `(title.ilike.*q*,description.ilike.*q*,...)` for a non-blank query
    fn search_filter(query: Option<&str>) -> Option<String> {
        let term: String = query?
            .trim()
            .chars()
            // Characters with meaning inside a PostgREST logic tree, plus
            // the LIKE wildcards `ilike` passes through to the database
            .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '"' | '%' | '_'))
            .collect();

        if term.trim().is_empty() {
            return None;
        }

        let clauses: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{}.ilike.*{}*", column, term.trim()))
            .collect();

        Some(format!("({})", clauses.join(",")))
    }
}

#[async_trait]
impl ProductSource for RestProductSource {
    async fn fetch(&self, params: &FetchParams) -> MarketResult<Vec<ProductEntry>> {
        let url = self.build_url(params)?;
        debug!(%url, "fetching products");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        normalize_products(&body)
    }
}
