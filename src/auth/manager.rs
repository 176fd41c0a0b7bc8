//! Auth Manager
//!
//! Login exchanges a username/password for a signed token. Authorize checks
//! an `Authorization` header value and, with auto-renew on, hands back a
//! freshly issued token so the session slides forward while it stays active.
//!
//! The manager keeps no per-request state; every call is verified from the
//! token and the user store alone.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::auth::{
    clock::{Clock, SystemClock},
    error::{AuthError, Rejection},
    jwt::JwtCodec,
    models::{Credential, Principal},
    response::Outcome,
    user_store::UserStore,
};
use crate::config::AuthConfig;

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub principal: Principal,
    pub token: String,
    /// Value for the `Authorization` response header, `"<scheme> <token>"`
    pub header_value: String,
    pub message: String,
}

/// Successful authorization
#[derive(Debug, Clone)]
pub struct Authorized {
    pub principal: Principal,
    /// Header value carrying the renewed token, present only with auto-renew
    pub renewed_header: Option<String>,
}

pub struct AuthManager {
    config: AuthConfig,
    codec: JwtCodec,
    users: UserStore,
    clock: Arc<dyn Clock>,
}

impl AuthManager {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        if config.uses_default_secret() {
            warn!("Auth manager is using the built-in default secret; set a real one in production");
        }

        let users = UserStore::new();
        users.add_all(Some(&config.users));

        Self {
            codec: JwtCodec::new(&config.secret),
            config,
            users,
            clock,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Parse a JSON body of the form `{"user":"...","pwd":"..."}` and log in.
    pub fn login_json(&self, body: &[u8]) -> Result<LoginGrant, Rejection> {
        let credential: Credential = serde_json::from_slice(body).map_err(|e| {
            debug!("Cannot parse login body: {}", e);
            self.rejection(AuthError::MalformedRequest)
        })?;
        self.login(&credential)
    }

    pub fn login(&self, credential: &Credential) -> Result<LoginGrant, Rejection> {
        if !self
            .users
            .verify_password(&credential.username, &credential.password)
        {
            warn!("Login rejected for user {}", credential.username);
            return Err(self.rejection(AuthError::InvalidCredential));
        }

        let principal = Principal::new(credential.username.as_str());
        let token = self.issue(&principal)?;
        let message = self
            .config
            .on_success
            .format(&Outcome::Success { token: &token });

        info!("User {} logged in", principal.user);

        Ok(LoginGrant {
            header_value: self.header_value(&token),
            principal,
            token,
            message,
        })
    }

    /// Validate an `Authorization` header value of the form `"<scheme> <token>"`.
    pub fn authorize(&self, header: &str) -> Result<Authorized, Rejection> {
        let token = header
            .strip_prefix(self.config.scheme.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
            .ok_or_else(|| {
                debug!("Authorization header does not start with {}", self.config.scheme);
                self.rejection(AuthError::MalformedAuthorizationHeader)
            })?;

        let claims = self
            .codec
            .decode(token, self.clock.now())
            .map_err(|e| self.rejection(e))?;

        let principal = claims.principal;
        if !self.users.contains(&principal.user) {
            warn!("Token presented for removed user {}", principal.user);
            return Err(self.rejection(AuthError::UnknownPrincipal));
        }

        let renewed_header = if self.config.auto_renew {
            let token = self.issue(&principal)?;
            Some(self.header_value(&token))
        } else {
            None
        };

        debug!("Authorized user {}", principal.user);

        Ok(Authorized {
            principal,
            renewed_header,
        })
    }

    fn issue(&self, principal: &Principal) -> Result<String, Rejection> {
        self.codec
            .issue(principal, self.config.ttl, self.clock.now())
            .map_err(|e| {
                error!("Token issuance failed for user {}: {}", principal.user, e);
                self.rejection(e)
            })
    }

    fn header_value(&self, token: &str) -> String {
        format!("{} {}", self.config.scheme, token)
    }

    /// Build the rejection for `error`, formatted by the configured failure formatter
    pub fn rejection(&self, error: AuthError) -> Rejection {
        Rejection {
            error,
            message: self.config.on_failure.format(&Outcome::Failure(error)),
        }
    }
}
