//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and shared list views while reading/writing
//! shared state from Leptos context providers.

pub mod message_modal;
pub mod site_header;
pub mod ticket_groups;
