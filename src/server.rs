//! # Server Module
//!
//! HTTP server setup and route configuration for the demo service.

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::auth::AuthManager;
use crate::config::{AuthConfig, SERVER_CONFIG};
use crate::routes::{auth::create_auth_routes, health::ping};

/// Build the application router around a shared `AuthManager`.
pub fn app(manager: Arc<AuthManager>) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .merge(create_auth_routes(manager.clone()))
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(HeaderValue::from_static("http://localhost:3001"))
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
                    // renewed tokens travel back in this header
                    .expose_headers([header::AUTHORIZATION]),
            ),
        )
        .with_state(manager)
}

/// Starts the HTTP server.
///
/// Loads the authenticator configuration from the environment, binds to
/// `SERVER_HOST:PORT` (default `127.0.0.1:3000`) and serves until the
/// process is terminated.
pub async fn start() -> Result<()> {
    let config = AuthConfig::from_env().context("Failed to load auth configuration")?;
    tracing::info!(
        "Auth config: {} user(s), ttl {}s, auto-renew {}",
        config.users.len(),
        config.ttl.as_secs(),
        config.auto_renew
    );

    let manager = Arc::new(AuthManager::new(config));
    let app = app(manager);

    let addr = format!("{}:{}", SERVER_CONFIG.host, SERVER_CONFIG.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);
    tracing::info!("Login at POST http://{}/api/auth/login", addr);

    axum::serve(listener, app).await.context("Server error")
}
