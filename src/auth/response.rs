//! Messages returned to clients after a login or authorization attempt.

use crate::auth::error::AuthError;

pub const DEFAULT_SUCCESS_MESSAGE: &str = r#"{"code":200,"msg":"Authentication success"}"#;
pub const DEFAULT_FAILURE_MESSAGE: &str = r#"{"code":400,"msg":"Authentication failed"}"#;

/// What a formatter is asked to describe
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    Success { token: &'a str },
    Failure(AuthError),
}

/// Turns an outcome into the message body sent to the client.
///
/// Any `Fn(&Outcome) -> String` closure works as a formatter.
pub trait ResponseFormatter: Send + Sync {
    fn format(&self, outcome: &Outcome<'_>) -> String;
}

impl<F> ResponseFormatter for F
where
    F: Fn(&Outcome<'_>) -> String + Send + Sync,
{
    fn format(&self, outcome: &Outcome<'_>) -> String {
        self(outcome)
    }
}

/// Fixed payloads that never echo the token or the failure reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultFormatter {
    Success,
    Failure,
}

impl ResponseFormatter for DefaultFormatter {
    fn format(&self, _outcome: &Outcome<'_>) -> String {
        match self {
            Self::Success => DEFAULT_SUCCESS_MESSAGE.to_string(),
            Self::Failure => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}
