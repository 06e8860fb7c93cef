//! Session-store contract and an in-memory implementation.
//!
//! DESIGN
//! ======
//! The bearer token is never read from ambient globals. Each [`crate::ApiClient`]
//! owns a store; the browser injects a `localStorage` store, the CLI a file
//! store, and tests a [`MemorySessionStore`] they can inspect or pre-seed.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Persisted credentials. An empty token never constitutes a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Storage for the current session.
///
/// Methods take `&self`; implementations use interior mutability so one store
/// can back several client handles.
pub trait SessionStore {
    /// Load the stored session, if any.
    fn load(&self) -> Option<Session>;

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backing storage rejects the write.
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the backing storage rejects the removal.
    fn clear(&self) -> Result<(), SessionError>;

    /// Store a token pair. An empty `token` clears the session instead.
    ///
    /// # Errors
    ///
    /// Propagates storage failures from [`SessionStore::save`] or [`SessionStore::clear`].
    fn set_token(&self, token: &str, refresh_token: Option<&str>) -> Result<(), SessionError> {
        if token.trim().is_empty() {
            return self.clear();
        }
        self.save(&Session {
            token: token.to_owned(),
            refresh_token: refresh_token.filter(|t| !t.is_empty()).map(ToOwned::to_owned),
        })
    }

    /// The bearer token, if a non-empty one is stored.
    fn token(&self) -> Option<String> {
        self.load()
            .map(|session| session.token)
            .filter(|token| !token.trim().is_empty())
    }

    fn refresh_token(&self) -> Option<String> {
        self.load().and_then(|session| session.refresh_token)
    }

    /// Alias of [`SessionStore::clear`].
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    fn clear_token(&self) -> Result<(), SessionError> {
        self.clear()
    }

    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-local session store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts with `token` already set.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(Session {
            token: token.to_owned(),
            refresh_token: None,
        });
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
