//! Auth routes for login and token-protected user info

use axum::{
    Extension, Router,
    middleware,
    response::Json,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::auth::{AuthManager, Principal, login, require_auth};

/// Returns the user the presented token belongs to
pub async fn whoami(Extension(principal): Extension<Principal>) -> Json<Value> {
    tracing::debug!("/api/v1/whoami called by {}", principal.user);
    Json(json!({ "user": principal.user }))
}

pub fn create_auth_routes(manager: Arc<AuthManager>) -> Router<Arc<AuthManager>> {
    let protected = Router::new()
        .route("/api/v1/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(manager, require_auth));

    Router::new()
        .route("/api/auth/login", post(login))
        .merge(protected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_login_then_whoami() {
        let manager = Arc::new(AuthManager::new(
            AuthConfig::new()
                .with_secret("routes-test")
                .with_user("alice", "secret1"),
        ));
        let app = create_auth_routes(manager.clone()).with_state(manager);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .body(Body::from(r#"{"user":"alice","pwd":"secret1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let authorization = response.headers()[header::AUTHORIZATION].clone();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/whoami")
                    .header(header::AUTHORIZATION, authorization)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["user"], "alice");
    }
}
