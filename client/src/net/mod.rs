//! Networking: the browser transport and the shared API client wiring.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` performs HTTP with `gloo-net`; `api` builds the typed
//! `helpdesk::ApiClient` over it and runs requests inside a view's scope.

pub mod api;
pub mod transport;
