use std::sync::Arc;

use resource_store::{http, InMemoryResourceStore, ResourceService, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let service = Arc::new(ResourceService::new(InMemoryResourceStore::new()));

    http::serve(service, config.socket_addr()).await?;

    Ok(())
}
