//! # Bearer Keepalive
//!
//! Bearer-token authentication for axum services. A client posts
//! `{"user":"...","pwd":"..."}` to a login route and receives
//! `Authorization: Bearer <token>`; protected routes validate that header
//! and, with auto-renew on, answer with a freshly issued token so an active
//! session never lapses.
//!
//! ```no_run
//! use std::sync::Arc;
//! use axum::{Router, middleware, routing::{get, post}};
//! use bearer_keepalive::{auth, config::AuthConfig};
//!
//! let manager = Arc::new(auth::AuthManager::new(
//!     AuthConfig::new()
//!         .with_secret("change-me")
//!         .with_user("alice", "secret1"),
//! ));
//!
//! let app: Router = Router::new()
//!     .route("/api/v1/whoami", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(manager.clone(), auth::require_auth))
//!     .route("/api/auth/login", post(auth::login))
//!     .with_state(manager);
//! ```

pub mod auth;
pub mod config;
pub mod routes;
pub mod server;
