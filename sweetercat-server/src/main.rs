//! SWEETer-Cat Dashboard Server
//!
//! Serves the SWEET-Cat catalog of planet-host stellar parameters with
//! interactive plotting over a JSON API.

mod api;
mod config;
mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use clap::Parser;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sweetercat::catalog::{CatalogProvider, FileCatalog};

use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub provider: Arc<dyn CatalogProvider>,
    pub config: Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sweetercat_server=debug,tower_http=debug".into()),
        )
        .init();

    // Parse CLI args
    let config = Config::parse();
    info!("Starting sweetercat-server on {}:{}", config.host, config.port);

    // File-backed catalog with a TTL cache; the first request loads it
    let provider: Arc<dyn CatalogProvider> = Arc::new(FileCatalog::new(
        &config.sweetcat_path,
        &config.exoplanet_path,
        config.cache_ttl(),
    ));

    // Build app state
    let state = Arc::new(AppState {
        provider,
        config: config.clone(),
    });

    // Build router
    let app = Router::new()
        // Portal routes
        .route("/", get(api::portal::index))
        .route("/plot", get(api::portal::plot))
        .route("/plot-exo", get(api::portal::plot_exo))
        .route("/star/{name}", get(api::portal::star))
        // API routes
        .nest("/api/v1", api::router())
        // Static files
        .nest_service("/static", ServeDir::new(&config.static_dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);

    if let (Some(cert_path), Some(key_path)) = (&config.tls_cert, &config.tls_key) {
        // TLS enabled
        info!("TLS enabled with cert: {}", cert_path);
        let tls_config = config::load_tls_config(cert_path, key_path)?;
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        // Plain HTTP
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Listening on http://{}", addr);
        axum::serve(listener, app).await?;
    }

    Ok(())
}
