//! Typed client for the school help-desk REST API.
//!
//! This crate owns everything the browser front-end and the CLI share: the
//! wire types, the route table, the session-store seam, the transport seam,
//! and [`ApiClient`], which exposes one method per API operation. It has no
//! UI or runtime dependencies so it compiles for both WASM and native hosts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` plugs in a `gloo-net` transport and a `localStorage` session
//! store; `cli` plugs in `reqwest` and a JSON session file. Tests plug in
//! [`fake::FakeApi`] and [`MemorySessionStore`].

pub mod claims;
pub mod client;
pub mod error;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod grouping;
pub mod routes;
pub mod scope;
pub mod session;
pub mod transport;
pub mod types;
pub mod validate;

pub use claims::UnverifiedClaims;
pub use client::{ApiClient, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ParseEnumError, SessionError, TransportError};
pub use grouping::TicketGroup;
pub use routes::{CommentRoutes, Endpoint, Method};
pub use scope::RequestScope;
pub use session::{MemorySessionStore, Session, SessionStore};
pub use transport::{ApiRequest, ApiResponse, Transport};
pub use types::{
    Comment, Id, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, Ticket,
    TicketInput, TicketStatus, TicketType, TicketTypeInput, User, UserUpdate,
};
