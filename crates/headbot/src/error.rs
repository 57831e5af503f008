//! Error types for the headbot client.
//!
//! A single [`Error`] type covers every failure the session can surface:
//! explicit authorization rejections, transport failures, unexpected HTTP
//! statuses and invalid caller input.

use std::fmt;
use thiserror::Error;

/// The unified error type for headbot operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Login or refresh was explicitly rejected by the server.
    ///
    /// Displayed verbatim, e.g. `Authorization (token/) failed`.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Network transport errors (DNS, TLS, connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Unexpected HTTP status from the API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (base URL, empty tokens).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the rejecting endpoint if this is an authorization failure.
    pub fn rejected_endpoint(&self) -> Option<&str> {
        match self {
            Error::Auth(AuthError::Rejected { endpoint }) => Some(endpoint.as_str()),
            _ => None,
        }
    }

    /// Check whether the server refused the credentials or token involved.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Auth(AuthError::Rejected { .. }) => true,
            Error::Protocol(err) => err.is_auth_error(),
            _ => false,
        }
    }
}

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login or refresh endpoint rejected the attempt.
    #[error("Authorization ({endpoint}) failed")]
    Rejected { endpoint: String },

    /// A login is required but the session no longer holds credentials.
    #[error("no credentials available to log in")]
    MissingCredentials,

    /// A refresh was requested before any token pair was issued.
    #[error("no refresh token available")]
    NoRefreshToken,
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Response body could not be decoded.
    #[error("malformed response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout { message }
        } else if err.is_connect() {
            TransportError::Connection { message }
        } else if err.is_decode() {
            TransportError::Decode { message }
        } else {
            TransportError::Http { message }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(TransportError::Decode {
            message: err.to_string(),
        })
    }
}

/// Error codes the API uses for an invalid or expired bearer token.
const AUTH_ERROR_CODES: &[&str] = &[
    "token_not_valid",
    "authentication_failed",
    "not_authenticated",
];

/// An unexpected HTTP response.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code, if the body carried one.
    pub code: Option<String>,
    /// Human-readable detail from the server.
    pub detail: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<String>, detail: Option<String>) -> Self {
        Self {
            status,
            code,
            detail,
        }
    }

    /// Check if the server rejected the bearer token.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self
                .code
                .as_deref()
                .is_some_and(|code| AUTH_ERROR_CODES.contains(&code))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A token was empty.
    #[error("{kind} token must not be empty")]
    EmptyToken { kind: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_names_endpoint() {
        let err = Error::from(AuthError::Rejected {
            endpoint: "token/refresh/".to_string(),
        });
        assert_eq!(err.to_string(), "Authorization (token/refresh/) failed");
        assert_eq!(err.rejected_endpoint(), Some("token/refresh/"));
    }

    #[test]
    fn status_401_is_auth_error() {
        assert!(ProtocolError::new(401, None, None).is_auth_error());
        assert!(!ProtocolError::new(500, None, None).is_auth_error());
    }

    #[test]
    fn token_code_is_auth_error_regardless_of_status() {
        let err = ProtocolError::new(403, Some("token_not_valid".into()), None);
        assert!(err.is_auth_error());

        let err = ProtocolError::new(403, Some("permission_denied".into()), None);
        assert!(!err.is_auth_error());
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(
            401,
            Some("token_not_valid".into()),
            Some("Given token not valid for any token type".into()),
        );
        assert_eq!(
            err.to_string(),
            "HTTP 401 [token_not_valid]: Given token not valid for any token type"
        );
    }
}
