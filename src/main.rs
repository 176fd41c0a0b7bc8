//! # Bearer Keepalive Server
//!
//! Demo HTTP server putting `AuthManager` in front of a protected route.
//!
//! ## Environment Setup
//! ```bash
//! AUTH_SECRET=change-me AUTH_USERS=alice:secret1 cargo run
//! ```
//!
//! ## Trying it out
//! ```bash
//! curl -i -X POST localhost:3000/api/auth/login -d '{"user":"alice","pwd":"secret1"}'
//! curl -i localhost:3000/api/v1/whoami -H 'Authorization: Bearer <token>'
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("Build profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });

    bearer_keepalive::server::start().await
}
