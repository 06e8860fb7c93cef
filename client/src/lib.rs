//! # client
//!
//! Leptos + WASM front-end for the school help desk.
//!
//! Pages, components, and browser state live here; every API call goes
//! through the typed `helpdesk::ApiClient`, wired to a `gloo-net` transport
//! and a `localStorage` session store. Build with the `csr` feature for the
//! browser; without it the crate compiles natively so pure helpers can be
//! unit-tested.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install the panic hook and logger, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
