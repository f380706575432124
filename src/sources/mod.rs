pub mod traits;
pub mod normalize;
pub mod rest;
pub mod catalog;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::{MarketError, MarketResult};

pub use traits::{FetchParams, ProductSource};
#[cfg(test)]
pub use traits::MockProductSource;
pub use normalize::{normalize_product, normalize_products};
pub use rest::RestProductSource;
pub use catalog::CatalogProductSource;

/// Pick the product source the configuration asks for.
/// A local catalog file takes precedence over the hosted API.
pub fn source_from_config(config: &Config) -> MarketResult<Arc<dyn ProductSource>> {
    if let Some(path) = &config.catalog_path {
        let catalog = CatalogProductSource::from_path(path)?;
        info!(path = %path, products = catalog.len(), "using local product catalog");
        return Ok(Arc::new(catalog));
    }

    let api_url = config
        .api_url
        .as_deref()
        .ok_or_else(|| MarketError::MissingEnvVar("MARKETFEED_API_URL".to_string()))?;

    let source = RestProductSource::new(
        api_url,
        &config.table,
        config.api_key.clone(),
        config.request_timeout,
    )?;
    info!(url = %api_url, table = %config.table, "using hosted product API");

    Ok(Arc::new(source))
}
