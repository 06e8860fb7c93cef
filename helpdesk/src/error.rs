//! Error types shared by the API client, transports, and session stores.
//!
//! ERROR HANDLING
//! ==============
//! Views never branch on error structure beyond "did it fail"; they call
//! [`ApiError::user_message`] and show the result in the message overlay.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reported by a [`crate::Transport`] before any HTTP status exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, CORS, or body-read failure.
    #[error("network error: {0}")]
    Network(String),
    /// The transport has no network access in this build (e.g. SSR stubs).
    #[error("not available in this environment")]
    Unavailable,
}

/// Failure to persist or clear the session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session storage unavailable")]
    Unavailable,
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// A string did not name a known enum variant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Error returned by every [`crate::ApiClient`] operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    /// Non-2xx response; `message` is the server's `{message}` field if any.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("login response did not include a token")]
    MissingToken,
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Text for the message overlay: the server's message when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::NotLoggedIn => "Please log in first.".to_owned(),
            _ => fallback.to_owned(),
        }
    }

    /// HTTP status for server-side failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
