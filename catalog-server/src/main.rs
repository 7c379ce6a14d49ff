use std::sync::Arc;

use catalog_server::core::server;
use catalog_server::{Config, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(
        environment = %config.environment,
        remote = %config.remote_catalog_url,
        "Catalog edge server starting"
    );

    let remote = catalog_client::HttpCatalog::new(&config.remote_config())?;
    let state = ServerState::new(Arc::new(remote));

    server::run(&config, state).await
}
