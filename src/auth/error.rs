//! Auth errors

use thiserror::Error;

/// Reasons a login or authorization is rejected.
///
/// Bad signature, wrong algorithm, malformed text and expiry all collapse
/// into `InvalidToken`; unknown user and wrong password collapse into
/// `InvalidCredential`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("cannot parse credential")]
    MalformedRequest,

    #[error("invalid username or password")]
    InvalidCredential,

    #[error("bad token scheme")]
    MalformedAuthorizationHeader,

    #[error("authorization failed")]
    InvalidToken,

    #[error("user not found")]
    UnknownPrincipal,

    #[error("cannot create new token")]
    IssuanceFailure,
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequest => 400,
            Self::IssuanceFailure => 500,
            Self::InvalidCredential
            | Self::MalformedAuthorizationHeader
            | Self::InvalidToken
            | Self::UnknownPrincipal => 401,
        }
    }

    /// Get error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedRequest => "MALFORMED_REQUEST",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::MalformedAuthorizationHeader => "MALFORMED_AUTHORIZATION_HEADER",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::UnknownPrincipal => "UNKNOWN_PRINCIPAL",
            Self::IssuanceFailure => "ISSUANCE_FAILURE",
        }
    }
}

/// A rejected request: the error category plus the message for the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub error: AuthError,
    pub message: String,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Rejection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MalformedRequest.status_code(), 400);
        assert_eq!(AuthError::InvalidCredential.status_code(), 401);
        assert_eq!(AuthError::InvalidToken.status_code(), 401);
        assert_eq!(AuthError::UnknownPrincipal.status_code(), 401);
        assert_eq!(AuthError::IssuanceFailure.status_code(), 500);
    }

    #[test]
    fn test_display_reasons() {
        assert_eq!(AuthError::MalformedAuthorizationHeader.to_string(), "bad token scheme");
        assert_eq!(AuthError::InvalidToken.to_string(), "authorization failed");
    }
}
