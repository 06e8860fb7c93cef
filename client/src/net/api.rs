//! Typed API client wiring for the browser.
//!
//! Client-side (csr): requests run on the browser task queue via
//! `spawn_local`. Native builds: `spawn_scoped` drops the work, since there is
//! no event loop to drive it.
//!
//! ERROR HANDLING
//! ==============
//! Failures never reach the caller's success path. They are logged at `warn`
//! and shown once in the message overlay, using the server's `{message}` when
//! it sent one and the view's fallback text otherwise. Cancelled requests are
//! dropped silently.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use helpdesk::{ApiClient, ApiError, ClientConfig, CommentRoutes, DEFAULT_BASE_URL, RequestScope};
use leptos::prelude::*;

use super::transport::GlooTransport;
use crate::state::ui::UiState;
use crate::util::session_store::BrowserSessionStore;

pub type Api = ApiClient<GlooTransport, BrowserSessionStore>;

/// API base chosen at build time through `HELPDESK_API_BASE`.
fn resolve_base_url(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_owned()
}

/// Comment route shape chosen at build time through `HELPDESK_COMMENT_ROUTES`.
/// Unset or unrecognised values keep the default.
fn resolve_comment_routes(configured: Option<&str>) -> CommentRoutes {
    configured
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

/// A client over the browser transport and `localStorage` session.
pub fn api_client() -> Api {
    let config = ClientConfig {
        base_url: resolve_base_url(option_env!("HELPDESK_API_BASE")),
        comment_routes: resolve_comment_routes(option_env!("HELPDESK_COMMENT_ROUTES")),
    };
    ApiClient::new(GlooTransport, BrowserSessionStore, config)
}

/// Run `request` inside `scope`; hand the value to `on_success`, or show the
/// failure in the overlay with `fallback` as the default text.
pub fn spawn_scoped<T, Fut, F>(
    scope: &RequestScope,
    ui: RwSignal<UiState>,
    fallback: &'static str,
    request: Fut,
    on_success: F,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    F: FnOnce(T) + 'static,
{
    #[cfg(feature = "csr")]
    {
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            match scope.run(request).await {
                Ok(value) => on_success(value),
                Err(err) if err.is_cancelled() => {}
                Err(err) => {
                    log::warn!("{fallback}: {err}");
                    ui.update(|state| state.show_message(err.user_message(fallback)));
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (scope, ui, fallback, request, on_success);
    }
}

/// A scope bound to the current view: cancelled when the view unmounts.
pub fn view_scope() -> RequestScope {
    let scope = RequestScope::new();
    let on_unmount = scope.clone();
    on_cleanup(move || on_unmount.cancel());
    scope
}
