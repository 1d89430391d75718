mod config;
mod models;
mod routes;
mod services;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tera::Tera;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::plex::PlexClient;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub plex: PlexClient,
    pub templates: Tera,
    pub start_time: Instant,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plex_shuffle=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting plex-shuffle v{}", env!("CARGO_PKG_VERSION"));

    let missing = config.missing_plex_settings();
    if !missing.is_empty() {
        tracing::warn!("Media server settings not set: {}", missing.join(", "));
    }

    // Templates are parsed once; a broken template aborts startup
    let templates = Tera::new(&format!("{}/*.html", config.template_dir))?;
    tracing::info!("Templates loaded from {}", config.template_dir);

    let plex = PlexClient::new(config.plex.clone(), &config.user_agent)?;
    tracing::info!(
        "Plex client initialized: {} (playlist {})",
        config.plex.origin,
        config.plex.playlist_id
    );

    // Build application state
    let state = Arc::new(AppState {
        config,
        plex,
        templates,
        start_time: Instant::now(),
    });

    // Build router
    let app = Router::new()
        // Pages
        .route("/", get(routes::pages::video_index))
        .route("/video/*video_id", get(routes::pages::view_video))
        // JSON API
        .route("/api/videos", get(routes::api::list_videos))
        .route("/api/videos/*video_id", get(routes::api::get_video))
        // Health endpoints
        .route("/health", get(routes::health::health_check))
        .route("/live", get(routes::health::live))
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
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
