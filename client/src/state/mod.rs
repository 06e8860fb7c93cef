//! Reactive state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` provides one `RwSignal` per state struct; pages and components read
//! them with `expect_context`. Nothing here holds server data beyond what a
//! single view needs.

pub mod auth;
pub mod forms;
pub mod ui;
