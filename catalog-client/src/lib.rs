//! Catalog Client - adapter for the remote catalog service
//!
//! The remote service stores every logical product as two linked objects:
//! one item and one variation whose `item_id` points back at the item.
//! This crate owns the translation between the internal upsert/get/delete
//! shapes and that two-object wire model, plus the HTTP plumbing. It
//! performs no validation and no cache access; callers check responses.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

#[cfg(feature = "mock")]
pub mod mock;

pub use catalog::{CatalogUpsert, RemoteCatalog};
pub use config::RemoteConfig;
pub use error::{RemoteError, RemoteResult};
pub use http::HttpCatalog;
pub use types::{
    CatalogItem, CatalogObject, CatalogObjects, CatalogPair, CatalogVariation, DeletePairResponse,
    Money, OBJECT_TYPE_ITEM, OBJECT_TYPE_VARIATION, PRICING_TYPE_FIXED, RemoteApiError,
};

#[cfg(feature = "mock")]
pub use mock::MemoryCatalog;
