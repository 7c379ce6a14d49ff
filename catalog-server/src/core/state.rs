use std::sync::Arc;

use catalog_client::RemoteCatalog;

use crate::services::ProductCatalogService;

/// Shared application state handed to every handler.
///
/// Holds the product coordinator behind an `Arc`, so cloning the state
/// for each request is a pointer copy. The remote adapter is injected
/// here, which is also how tests swap in an in-process catalog double.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductCatalogService>,
}

impl ServerState {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self {
            products: Arc::new(ProductCatalogService::new(remote)),
        }
    }
}
