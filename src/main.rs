use std::sync::Arc;

use movie_catalog_api::infra::config;
use movie_catalog_api::transport::http::{create_router, ApiDoc, AppState};
use movie_catalog_api::{CatalogService, CatalogStore, PgCatalogStore};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The store is constructed once here and passed down; it owns the only
    // database handle in the process and closes with it on shutdown.
    let store = PgCatalogStore::connect(&config::database_url()).await?;
    let store: Arc<dyn CatalogStore> = Arc::new(store);
    let catalog = Arc::new(CatalogService::new(store));

    let upload_dir = config::upload_dir();
    tokio::fs::create_dir_all(&upload_dir).await?;

    let state = AppState {
        catalog,
        upload_dir,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "catalog API listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, stopping");
        }
    }

    Ok(())
}
