use axum::Router;
use storeql_graph::{graphql_router, StoreqlSchema};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// The full axum application: the GraphQL route plus permissive CORS.
pub fn build_app(schema: StoreqlSchema) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    graphql_router("/graphql", schema).layer(cors)
}

/// Bind the port and serve until the process is stopped.
pub async fn run(port: u16, schema: StoreqlSchema) -> anyhow::Result<()> {
    let app = build_app(schema);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("storeql serving GraphQL on http://0.0.0.0:{port}/graphql");
    axum::serve(listener, app).await?;
    Ok(())
}
