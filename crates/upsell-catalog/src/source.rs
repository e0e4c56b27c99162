use std::future::Future;

use upsell_core::CatalogItem;

use crate::client::CatalogClient;
use crate::error::CatalogError;

/// Anything that can answer a product search. The store is generic over this
/// so it can run against a canned catalog in tests.
pub trait CatalogSource {
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send;
}

impl CatalogSource for CatalogClient {
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<CatalogItem>, CatalogError>> + Send {
        self.search_products(term)
    }
}
