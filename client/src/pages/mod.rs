//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns a request scope, fetches what it needs on mount, and
//! re-fetches after every successful write. Rendering of shared pieces is
//! delegated to `components`.

pub mod admin;
pub mod admin_users;
pub mod landing;
pub mod login;
pub mod register;
pub mod ticket_detail;
pub mod ticket_types;
pub mod tickets;
