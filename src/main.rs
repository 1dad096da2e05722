use file_index::api::{create_router, AppState};
use file_index::infrastructure::{Config, ElasticsearchDocumentStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,file_index=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let store = ElasticsearchDocumentStore::new(&config.elasticsearch)?;
    info!(url = %config.elasticsearch.url, index = %config.default_index, "Document store configured");

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(Arc::new(store), config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
