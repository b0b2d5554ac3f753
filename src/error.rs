//! Unified session-layer error model.
//! One crate-wide enum so callers cannot forget a failure path: decode,
//! remote rejection, network and storage failures are all explicit values.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The identity token is structurally malformed (wrong segment count,
    /// bad base64url, payload not valid claims JSON).
    #[error("malformed identity token: {0}")]
    Decode(String),

    /// The verification authority answered and said the token is invalid.
    #[error("token was rejected by the verification authority")]
    Rejected,

    /// The verification authority could not be reached, or answered with
    /// something that is not the expected wire shape.
    #[error("verification failed: {0}")]
    Network(String),

    /// Durable session storage could not be written.
    #[error("session storage failure: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn decode<S: Into<String>>(msg: S) -> Self { SessionError::Decode(msg.into()) }
    pub fn network<S: Into<String>>(msg: S) -> Self { SessionError::Network(msg.into()) }
    pub fn storage<S: Into<String>>(msg: S) -> Self { SessionError::Storage(msg.into()) }

    /// Transient failures are the only candidates for a caller-side retry;
    /// a rejection or a decode failure will not get better by retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, SessionError::Network(_))
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Network(err.to_string())
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}
