//! Authentication Middleware
//!
//! Axum adapters around `AuthManager`: a login handler that answers with the
//! token in the `Authorization` header, and a middleware that guards routes
//! and passes renewed tokens back to the client.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::auth::{
    error::{AuthError, Rejection},
    manager::AuthManager,
    models::Principal,
};

/// Login handler: expects `{"user":"...","pwd":"..."}` as the body
pub async fn login(State(manager): State<Arc<AuthManager>>, body: Bytes) -> Response {
    match manager.login_json(&body) {
        Ok(grant) => match HeaderValue::from_str(&grant.header_value) {
            Ok(value) => json_response(StatusCode::OK, grant.message, Some(value)),
            Err(e) => {
                tracing::error!("Cannot build Authorization header: {}", e);
                manager.rejection(AuthError::IssuanceFailure).into_response()
            }
        },
        Err(rejection) => rejection.into_response(),
    }
}

/// Middleware that halts the request unless it carries a valid token.
///
/// On success the `Principal` is inserted into request extensions and, with
/// auto-renew on, the response carries the renewed `Authorization` header.
pub async fn require_auth(
    State(manager): State<Arc<AuthManager>>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let authorized = match manager.authorize(auth_header) {
        Ok(authorized) => authorized,
        Err(rejection) => return rejection.into_response(),
    };

    let renewed = match authorized.renewed_header.as_deref().map(HeaderValue::from_str) {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            tracing::error!("Cannot build renewed Authorization header: {}", e);
            return manager.rejection(AuthError::IssuanceFailure).into_response();
        }
        None => None,
    };

    req.extensions_mut().insert(authorized.principal);
    let mut response = next.run(req).await;

    if let Some(value) = renewed {
        response.headers_mut().insert(header::AUTHORIZATION, value);
    }
    response
}

/// Extension trait for reading the authenticated principal from a request
pub trait RequestAuthExt {
    fn principal(&self) -> Option<&Principal>;
}

impl RequestAuthExt for Request {
    fn principal(&self) -> Option<&Principal> {
        self.extensions().get::<Principal>()
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::UNAUTHORIZED);
        json_response(status, self.message, None)
    }
}

fn json_response(status: StatusCode, body: String, authorization: Option<HeaderValue>) -> Response {
    let mut response = (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response();
    if let Some(value) = authorization {
        response.headers_mut().insert(header::AUTHORIZATION, value);
    }
    response
}
