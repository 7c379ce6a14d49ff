//! Catalog Edge Server - write-through cache over a remote catalog
//!
//! # Architecture
//!
//! Each product lives in two places: the remote catalog service (source
//! of truth, stores it as an item + variation pair) and a local cache
//! keyed by the client-chosen product id. Every operation runs the same
//! pipeline: validate the request, consult the cache, call the remote
//! catalog, validate the response against what was sent, then mutate the
//! cache and assemble the reply.
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # Config, state, HTTP startup
//! ├── api/           # Routes and handlers
//! ├── services/      # Coordinator and response assembly
//! ├── validation/    # Request and remote-response checks
//! ├── cache/         # Local lite-product cache
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod cache;
pub mod core;
pub mod services;
pub mod utils;
pub mod validation;

pub use core::{Config, ServerState};
pub use services::ProductCatalogService;
pub use utils::{AppError, AppResponse, AppResult};
pub use utils::logger::{init_logger, init_logger_with_file};
