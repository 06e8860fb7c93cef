//! `gloo-net` implementation of `helpdesk::Transport`.
//!
//! Client-side (csr): real `fetch` calls. Native builds: every request fails
//! with `TransportError::Unavailable` so the crate still compiles for tests.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
#[cfg(feature = "csr")]
use helpdesk::Method;
use helpdesk::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "csr")]
fn http_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[cfg(feature = "csr")]
fn network_error(err: &gloo_net::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::RequestBuilder::new(&request.url)
                .method(http_method(request.method));
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &bearer_header(token));
            }
            let outgoing = match &request.body {
                Some(body) => builder.json(body).map_err(|e| network_error(&e))?,
                None => builder.build().map_err(|e| network_error(&e))?,
            };
            let response = outgoing.send().await.map_err(|e| network_error(&e))?;
            let status = response.status();
            let body = response.text().await.map_err(|e| network_error(&e))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(TransportError::Unavailable)
        }
    }
}
