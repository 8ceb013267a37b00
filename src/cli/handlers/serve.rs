use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::{DatabaseConfig, ServerConfig};
use crate::graphql::build_schema;
use crate::password::PasswordHasher;
use crate::server::run_server;
use crate::storage::{CatalogStore, MemoryStore, MongoStore};

pub fn handle_serve(config: ServerConfig) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<()> {
    let hasher = PasswordHasher::new(config.hash_cost)?;
    let store = open_store(&config.database()).await?;

    info!(mode = %config.mode, hash_cost = hasher.cost(), "starting event catalog");
    if let Some(client_dir) = config.client_bundle() {
        if !client_dir.join("index.html").exists() {
            warn!("no index.html in {}, front-end routes will 404", client_dir.display());
        }
    }

    let schema = build_schema(Catalog::new(store.clone(), hasher));
    let served = run_server(schema, &config.bind_address(), config.static_assets()).await;

    // Close the store even when the server failed.
    store.shutdown().await.context("Failed to close the database")?;
    served.context("Server error")
}

async fn open_store(database: &DatabaseConfig) -> Result<Arc<dyn CatalogStore>> {
    match database {
        DatabaseConfig::Mongo { url, name } => {
            let store = MongoStore::connect(url, name.as_deref())
                .await
                .context("Failed to connect to MongoDB")?;
            Ok(Arc::new(store))
        }
        DatabaseConfig::InMemory => {
            warn!("using the in-memory store, data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
