//! Shared types for the catalog edge service
//!
//! Common types used by both the server and the remote catalog client:
//! the product type domain, request/response bodies and paging types.

pub mod request;
pub mod response;
pub mod types;

// Re-exports
pub use request::{CreateProductRequest, ListParams, UpdateProductRequest};
pub use response::{Page, ProductResponse};
pub use serde::{Deserialize, Serialize};
pub use types::{
    InvalidProductType, InvalidSortField, InvalidSortOrder, ProductType, SortField, SortOrder,
    normalize,
};
