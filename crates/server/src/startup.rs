use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, StoreBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the configured store and build the application router around it.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    if cfg.store.backend == StoreBackend::File {
        common::env::ensure_data_dir(&cfg.store.data_dir).await?;
    }
    let store = service::storage::open_store(&cfg.store).await?;
    let state = AppState::new(store);
    Ok(routes::build_router(state, build_cors()))
}

/// Serve the app for `cfg` until `shutdown` resolves, then drain open connections.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, location = %cfg.store.location(), "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
