//! Authentication Models
//!
//! Data structures carried through login and authorization.

use serde::{Deserialize, Serialize};

/// Login request payload, e.g. `{"user":"alice","pwd":"secret1"}`
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    #[serde(rename = "user")]
    pub username: String,
    #[serde(rename = "pwd")]
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Identity carried inside a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user: String,
}

impl Principal {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

/// JWT claims: the principal plus the validity window.
///
/// A fresh value is built on every issuance, renewals included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub principal: Principal,
    /// Token issued at timestamp (unix seconds)
    pub iat: i64,
    /// Token expiration timestamp (unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}
