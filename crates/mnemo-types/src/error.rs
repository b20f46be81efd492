//! Error taxonomies for the client's operations.
//!
//! Every operation returns its own thiserror enum rather than throwing past
//! its boundary. [`TransportError`] is the raw HTTP-layer failure; the
//! `From` impls below map it into the per-operation errors. An undecodable
//! 2xx body counts as `InvalidResponse` for login (the token *is* the
//! payload) and as a connectivity failure everywhere else.

use thiserror::Error;

/// Failures at the HTTP boundary, before any domain interpretation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),

    /// The request never completed (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),
}

/// Failures of the login operation.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("login response carried no token")]
    InvalidResponse,

    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("a login is already in flight")]
    AlreadyInProgress,
}

/// Failures of the memory refresh and single-memory fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("a memory fetch is already in flight")]
    AlreadyInProgress,

    #[error("memory fetch rejected: HTTP {status}")]
    Rejected { status: u16 },

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Failures of the save-memory operation.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cannot save an empty memory")]
    EmptyContent,

    #[error("not logged in")]
    NotAuthenticated,

    #[error("a save is already in flight")]
    AlreadyInProgress,

    #[error("save rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Failures of the ask operation.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("cannot ask an empty question")]
    EmptyQuestion,

    #[error("not logged in")]
    NotAuthenticated,

    #[error("a question is already in flight")]
    AlreadyInProgress,

    #[error("question rejected: HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("backend unreachable: {0}")]
    Unreachable(String),
}

/// Failures of the external credential store (OS keychain).
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential store error: {0}")]
    Backend(String),
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, body } => AuthError::Rejected { status, body },
            TransportError::Decode(_) => AuthError::InvalidResponse,
            TransportError::Network(cause) => AuthError::Unreachable(cause),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, .. } => FetchError::Rejected { status },
            TransportError::Decode(cause) | TransportError::Network(cause) => {
                FetchError::Unreachable(cause)
            }
        }
    }
}

impl From<TransportError> for SaveError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, body } => SaveError::Rejected { status, body },
            TransportError::Decode(cause) | TransportError::Network(cause) => {
                SaveError::Unreachable(cause)
            }
        }
    }
}

impl From<TransportError> for AskError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status { status, body } => AskError::Rejected {
                status,
                message: body,
            },
            TransportError::Decode(cause) | TransportError::Network(cause) => {
                AskError::Unreachable(cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Status {
            status: 401,
            body: "invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: invalid credentials");
    }

    #[test]
    fn test_login_rejection_keeps_status_and_body() {
        let err = AuthError::from(TransportError::Status {
            status: 403,
            body: "nope".to_string(),
        });
        match err {
            AuthError::Rejected { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "nope");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_login_decode_failure_is_invalid_response() {
        let err = AuthError::from(TransportError::Decode("bad json".to_string()));
        assert!(matches!(err, AuthError::InvalidResponse));
    }

    #[test]
    fn test_fetch_rejection_drops_body() {
        let err = FetchError::from(TransportError::Status {
            status: 500,
            body: "stacktrace".to_string(),
        });
        assert_eq!(err.to_string(), "memory fetch rejected: HTTP 500");
    }

    #[test]
    fn test_non_login_decode_failure_is_unreachable() {
        assert!(matches!(
            SaveError::from(TransportError::Decode("bad json".to_string())),
            SaveError::Unreachable(_)
        ));
        assert!(matches!(
            AskError::from(TransportError::Decode("bad json".to_string())),
            AskError::Unreachable(_)
        ));
    }

    #[test]
    fn test_network_failure_is_unreachable_everywhere() {
        let make = || TransportError::Network("connection refused".to_string());
        assert!(matches!(AuthError::from(make()), AuthError::Unreachable(_)));
        assert!(matches!(FetchError::from(make()), FetchError::Unreachable(_)));
        assert!(matches!(SaveError::from(make()), SaveError::Unreachable(_)));
        assert!(matches!(AskError::from(make()), AskError::Unreachable(_)));
    }
}
