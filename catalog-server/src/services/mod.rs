//! Business services

pub mod assemble;
pub mod product_service;

pub use product_service::ProductCatalogService;
