//! Error types for server data fetches.
//!
//! Every external fetch resolves to either data or a [`FetchError`]. The
//! error carries a structured [`FetchErrorKind`] so callers classify
//! failures (retryable network trouble vs. terminal not-found) without
//! inspecting message text.

use std::fmt;

/// Structured classification of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport-level connection failure (refused, reset, DNS).
    Connection,
    /// The request timed out.
    Timeout,
    /// The resource does not exist or is not visible to the viewer.
    NotFound,
    /// The server answered with a non-success status.
    Server { status: u16 },
    /// The response body could not be decoded.
    InvalidResponse,
    /// Anything else.
    Other,
}

/// A failed fetch against the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Connection, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Timeout, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::NotFound, message)
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Server { status }, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::InvalidResponse, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Other, message)
    }

    /// Whether this failure happened below the application layer: the
    /// request never produced a server answer.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self.kind, FetchErrorKind::Connection | FetchErrorKind::Timeout)
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            FetchErrorKind::Connection => true,
            FetchErrorKind::Timeout => true,
            FetchErrorKind::NotFound => false,
            FetchErrorKind::Server { status } => {
                status >= 500 || status == 429 || status == 408
            }
            FetchErrorKind::InvalidResponse => false,
            FetchErrorKind::Other => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self.kind {
            FetchErrorKind::Connection => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            FetchErrorKind::Timeout => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            FetchErrorKind::NotFound => "The requested resource was not found.".to_string(),
            FetchErrorKind::Server { status } => match status {
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}). Please try again.", status),
            },
            FetchErrorKind::InvalidResponse => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            FetchErrorKind::Other => format!("Request failed: {}", self.message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Connection => "E_FETCH_CONN",
            FetchErrorKind::Timeout => "E_FETCH_TIMEOUT",
            FetchErrorKind::NotFound => "E_FETCH_NOT_FOUND",
            FetchErrorKind::Server { .. } => "E_FETCH_HTTP",
            FetchErrorKind::InvalidResponse => "E_FETCH_INVALID",
            FetchErrorKind::Other => "E_FETCH_OTHER",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Connection => write!(f, "connection"),
            FetchErrorKind::Timeout => write!(f, "timeout"),
            FetchErrorKind::NotFound => write!(f, "not found"),
            FetchErrorKind::Server { status } => write!(f, "http {}", status),
            FetchErrorKind::InvalidResponse => write!(f, "invalid response"),
            FetchErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Classify a reqwest error into a [`FetchError`].
pub fn classify_reqwest_error(err: &reqwest::Error) -> FetchError {
    if err.is_connect() {
        FetchError::connection(err.to_string())
    } else if err.is_timeout() {
        FetchError::timeout(err.to_string())
    } else if err.is_status() {
        match err.status() {
            Some(status) if status.as_u16() == 404 => FetchError::not_found(err.to_string()),
            Some(status) => FetchError::server(status.as_u16(), err.to_string()),
            None => FetchError::server(0, err.to_string()),
        }
    } else if err.is_decode() {
        FetchError::invalid_response(err.to_string())
    } else {
        FetchError::other(err.to_string())
    }
}
