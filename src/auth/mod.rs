//! # Authentication Module
//!
//! Stateless bearer-token authentication: credential check, HS512 token
//! issuance, token validation and sliding renewal, plus axum adapters that
//! put the manager in front of routes.

pub mod clock;
pub mod error;
pub mod jwt;
pub mod manager;
pub mod middleware;
pub mod models;
pub mod response;
pub mod user_store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AuthError, Rejection};
pub use jwt::JwtCodec;
pub use manager::{AuthManager, Authorized, LoginGrant};
pub use middleware::{RequestAuthExt, login, require_auth};
pub use models::{Claims, Credential, Principal};
pub use response::{DefaultFormatter, Outcome, ResponseFormatter};
pub use user_store::UserStore;
