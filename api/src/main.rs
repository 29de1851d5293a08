//! Newsletter Builder API Server
//!
//! Composes responsive, email-safe HTML newsletters with inlined images.
//! Serves a browser builder page, a JSON API, and preview/download of
//! generated newsletters.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;
mod render;

#[cfg(test)]
mod test_utils;


use adapters::{InMemoryDraftRepository, JpegDataUriEncoder};
use app::NewsletterService;
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub newsletter_service: Arc<NewsletterService<InMemoryDraftRepository, JpegDataUriEncoder>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let drafts = Arc::new(InMemoryDraftRepository::new(config.max_drafts));
        let images = Arc::new(JpegDataUriEncoder::new(
            config.jpeg_quality,
            config.max_image_bytes,
        ));

        Self {
            newsletter_service: Arc::new(NewsletterService::new(drafts, images)),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router for the given state
pub fn build_router(state: AppState) -> Router {
    // Routes that render (and maybe store) a newsletter
    let mut api_generate_routes = Router::new()
        .route("/api/preview", post(handlers::preview_newsletter))
        .route("/api/newsletters", post(handlers::create_newsletter));
    let mut form_routes = Router::new().route("/build", post(handlers::build_from_form));

    // Per-IP rate limiting on generation (image processing is CPU-heavy).
    // Uses PeerIpKeyExtractor, so the server must be run with connect info.
    if let Some(limit) = state.config.rate_limit {
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(limit.per_second)
                .burst_size(limit.burst)
                .finish()
                .expect("rate limit values are non-zero"),
        );
        let governor = GovernorLayer {
            config: governor_config,
        };
        api_generate_routes = api_generate_routes.layer(governor.clone());
        form_routes = form_routes.layer(governor);
    }

    // JSON API (bearer key when configured)
    let api_routes = Router::new()
        .route("/api/options", get(handlers::get_options))
        .route("/api/newsletters", get(handlers::list_newsletters))
        .route(
            "/api/newsletters/:id",
            get(handlers::get_newsletter).delete(handlers::delete_newsletter),
        )
        .merge(api_generate_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::api_key_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Builder UI
        .route("/", get(handlers::builder_page))
        .route("/newsletters/:id", get(handlers::view_newsletter))
        .route(
            "/newsletters/:id/download",
            get(handlers::download_newsletter),
        )
        .merge(form_routes)
        .merge(api_routes)
        // Middleware
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,newsletter_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Newsletter Builder...");

    // Load configuration
    let config = Config::from_env();
    let addr = config.socket_addr();
    tracing::info!(
        max_drafts = config.max_drafts,
        max_upload_bytes = config.max_upload_bytes,
        jpeg_quality = config.jpeg_quality,
        rate_limited = config.rate_limit.is_some(),
        api_key_required = config.api_key_required(),
        "Configuration loaded"
    );

    let app = build_router(AppState::new(config));

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    Ok(())
}
