//! HTTP transport seam.
//!
//! The client builds an [`ApiRequest`]; a transport performs it and hands back
//! the raw status and body. Transports never interpret status codes.
//! Futures are `?Send` because browser fetch futures are not `Send`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::routes::{Endpoint, Method};

/// A fully resolved request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Logical resource; lets in-memory transports route without parsing URLs.
    pub endpoint: Endpoint,
    /// Absolute URL for network transports.
    pub url: String,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    /// JSON body, sent with `Content-Type: application/json`.
    pub body: Option<Value>,
}

/// Raw response. `body` may be empty (e.g. `204 No Content`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Perform `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
