//! Error types for the qvrpro library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, response, and input validation errors.

use thiserror::Error;

/// The unified error type for qvrpro operations.
///
/// Every failure surfaces immediately to the caller; nothing is retried
/// internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (bad credentials, missing permissions).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Response errors (non-success status, undecodable body).
    #[error("response error: {0}")]
    Response(#[from] ResponseError),

    /// Input validation errors (invalid host, scheme or port).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true for authentication failures, including missing permissions.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Returns true if the recorder denied access for lack of permissions.
    pub fn is_insufficient_permissions(&self) -> bool {
        matches!(self, Error::Auth(AuthError::InsufficientPermissions { .. }))
    }

    /// Returns the HTTP status code if this error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Response(ResponseError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
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

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs carry `sid` and the encoded password in the query.
        let err = err.without_url();
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The recorder rejected the username or password.
    #[error("authentication failed: invalid credentials")]
    InvalidCredentials,

    /// The account is authenticated but lacks the permission for this call.
    #[error("insufficient permissions: {message}")]
    InsufficientPermissions { message: String },

    /// A request needing a session was attempted before login succeeded.
    #[error("no session: login has not succeeded")]
    NotAuthenticated,
}

/// Errors raised while interpreting a recorder response.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// Non-success HTTP status. `body` holds the raw decoded body text, since
    /// the recorder's error bodies are not reliably well-formed JSON.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {reason}")]
    Malformed { reason: String },

    /// The body was decoded but is not the kind the operation returns.
    #[error("unexpected content type: expected {expected}, got {actual}")]
    UnexpectedContentType {
        expected: &'static str,
        actual: String,
    },
}

impl ResponseError {
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        ResponseError::Malformed {
            reason: reason.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// The scheme, host and port do not form a valid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Unknown transport scheme.
    #[error("invalid scheme '{value}': expected http or https")]
    Scheme { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_error_is_an_auth_error() {
        let err = Error::from(AuthError::InsufficientPermissions {
            message: "denied".to_string(),
        });
        assert!(err.is_auth_error());
        assert!(err.is_insufficient_permissions());
    }

    #[test]
    fn invalid_credentials_is_not_a_permissions_error() {
        let err = Error::from(AuthError::InvalidCredentials);
        assert!(err.is_auth_error());
        assert!(!err.is_insufficient_permissions());
    }

    #[test]
    fn transport_error_omits_request_url() {
        let err = reqwest::blocking::Client::new()
            .get("http://127.0.0.1:0/qvrpro/camera/list?sid=kx2a6ipx&ver=1.1.0")
            .send()
            .unwrap_err();
        assert!(err.to_string().contains("kx2a6ipx"));

        let err = Error::from(err);
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.to_string().contains("kx2a6ipx"));
        assert!(!format!("{:?}", err).contains("kx2a6ipx"));
    }

    #[test]
    fn status_error_carries_code_and_body() {
        let err = Error::from(ResponseError::Status {
            status: 500,
            body: "{broken".to_string(),
        });
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_auth_error());
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("{broken"));
    }
}
