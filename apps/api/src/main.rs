mod config;
mod db;
mod errors;
mod models;
mod outreach;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, DirectoryBackend, ResolverMode};
use crate::db::create_pool;
use crate::outreach::directory::{
    ContactDirectory, InMemoryDirectory, PgContactDirectory, RestContactDirectory,
};
use crate::outreach::resolver::{ContactResolver, DirectoryResolver, SyntheticResolver};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    let resolver = build_resolver(&config).await?;
    info!("Contact resolver initialized (backend: {})", resolver.backend());

    let state = AppState { resolver };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the resolution strategy once at startup.
async fn build_resolver(config: &Config) -> Result<Arc<dyn ContactResolver>> {
    let backend = match &config.resolver_mode {
        ResolverMode::Synthetic => {
            info!("Synthetic mode: no contact directory, generating placeholder contacts");
            return Ok(Arc::new(SyntheticResolver));
        }
        ResolverMode::Directory(backend) => backend,
    };

    let directory: Arc<dyn ContactDirectory> = match backend {
        DirectoryBackend::Postgres { database_url } => {
            Arc::new(PgContactDirectory::new(create_pool(database_url).await?))
        }
        DirectoryBackend::Rest { base_url, api_key } => {
            info!("Using REST contact directory at {base_url}");
            Arc::new(RestContactDirectory::new(base_url.clone(), api_key.clone())?)
        }
        DirectoryBackend::File { path } => {
            let directory = InMemoryDirectory::from_json_file(path)?;
            if directory.is_empty() {
                tracing::warn!("Contacts file {} holds no records", path.display());
            }
            Arc::new(directory)
        }
    };

    Ok(Arc::new(DirectoryResolver::new(
        directory,
        config.lookup_timeout,
    )))
}
