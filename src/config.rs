//! Configuration module for the authenticator and the demo server

use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::response::{DefaultFormatter, ResponseFormatter};

/// Signing secret used when none is configured. Override it in production.
pub const DEFAULT_SECRET: &[u8] = b"zauth-bearer_secret";
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);
pub const DEFAULT_SCHEME: &str = "Bearer";

/// Global server configuration loaded from environment variables
pub static SERVER_CONFIG: Lazy<ServerConfig> = Lazy::new(ServerConfig::from_env);

/// Authenticator settings. Fixed once handed to `AuthManager::new`.
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing and verifying tokens
    pub secret: Vec<u8>,
    /// Lifetime of every issued token
    pub ttl: Duration,
    /// Reissue a token with a fresh lifetime on every successful authorization
    pub auto_renew: bool,
    /// Initial username → password entries
    pub users: HashMap<String, String>,
    /// Authorization header scheme, e.g. `Bearer`
    pub scheme: String,
    pub on_success: Arc<dyn ResponseFormatter>,
    pub on_failure: Arc<dyn ResponseFormatter>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_vec(),
            ttl: DEFAULT_TTL,
            auto_renew: true,
            users: HashMap::new(),
            scheme: DEFAULT_SCHEME.to_string(),
            on_success: Arc::new(DefaultFormatter::Success),
            on_failure: Arc::new(DefaultFormatter::Failure),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("auto_renew", &self.auto_renew)
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = secret.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_auto_renew(mut self, on: bool) -> Self {
        self.auto_renew = on;
        self
    }

    /// Add one user; ignored if either field is empty
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let (username, password) = (username.into(), password.into());
        if !username.is_empty() && !password.is_empty() {
            self.users.insert(username, password);
        }
        self
    }

    /// Add a batch of users with the same filtering as `with_user`
    pub fn with_users(mut self, users: Option<HashMap<String, String>>) -> Self {
        for (username, password) in users.into_iter().flatten() {
            self = self.with_user(username, password);
        }
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_success_formatter(mut self, formatter: impl ResponseFormatter + 'static) -> Self {
        self.on_success = Arc::new(formatter);
        self
    }

    pub fn with_failure_formatter(mut self, formatter: impl ResponseFormatter + 'static) -> Self {
        self.on_failure = Arc::new(formatter);
        self
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key → value source.
    ///
    /// Recognised keys: `AUTH_SECRET`, `AUTH_TTL_SECS`, `AUTH_AUTO_RENEW`,
    /// `AUTH_SCHEME`, `AUTH_USERS` (`user:pass,user2:pass2`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(secret) = lookup("AUTH_SECRET") {
            config.secret = secret.into_bytes();
        }

        if let Some(ttl) = lookup("AUTH_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .with_context(|| format!("AUTH_TTL_SECS is not a number of seconds: {ttl}"))?;
            config.ttl = Duration::from_secs(secs);
        }

        if let Some(auto_renew) = lookup("AUTH_AUTO_RENEW") {
            config.auto_renew = parse_bool(&auto_renew)
                .ok_or_else(|| anyhow!("AUTH_AUTO_RENEW must be true or false, got {auto_renew}"))?;
        }

        if let Some(scheme) = lookup("AUTH_SCHEME") {
            config.scheme = scheme;
        }

        if let Some(users) = lookup("AUTH_USERS") {
            config = config.with_users(Some(parse_users(&users)?));
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_users(value: &str) -> Result<HashMap<String, String>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split_once(':')
                .map(|(user, pwd)| (user.trim().to_string(), pwd.to_string()))
                .ok_or_else(|| anyhow!("AUTH_USERS entry is not user:password: {entry}"))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
