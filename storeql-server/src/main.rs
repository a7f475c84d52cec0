use std::sync::Arc;

use storeql_core::{CatalogConfig, DocumentCollection, SearchIndex};
use storeql_graph::build_schema;
use storeql_mongo::{MongoCollection, MongoSearchIndex};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = CatalogConfig::from_env();
    let port: u16 = std::env::var("STOREQL_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4000);
    let uri = std::env::var("STOREQL_MONGO_URI")
        .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());

    let store: Arc<dyn DocumentCollection> =
        Arc::new(MongoCollection::connect(&uri, &config).await?);
    let search: Arc<dyn SearchIndex> = Arc::new(MongoSearchIndex::connect(&uri, &config).await?);

    let schema = build_schema(store, search, config);
    storeql_server::run(port, schema).await
}
