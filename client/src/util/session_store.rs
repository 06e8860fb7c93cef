//! `localStorage`-backed `helpdesk::SessionStore`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tokens live under the `token` and `refreshToken` keys so they survive page
//! reloads. Native builds have no storage: loads see no session and writes
//! fail with `SessionError::Unavailable`.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use helpdesk::{Session, SessionError, SessionStore};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStore;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, SessionError> {
    crate::util::browser::local_storage().ok_or(SessionError::Unavailable)
}

#[cfg(feature = "csr")]
fn storage_error(action: &str) -> SessionError {
    SessionError::Storage(format!("localStorage rejected {action}"))
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok()?;
            let token = storage.get_item(TOKEN_KEY).ok().flatten()?;
            let refresh_token = storage.get_item(REFRESH_TOKEN_KEY).ok().flatten();
            Some(Session {
                token,
                refresh_token,
            })
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            storage
                .set_item(TOKEN_KEY, &session.token)
                .map_err(|_| storage_error("the token"))?;
            match &session.refresh_token {
                Some(refresh) => storage
                    .set_item(REFRESH_TOKEN_KEY, refresh)
                    .map_err(|_| storage_error("the refresh token")),
                None => storage
                    .remove_item(REFRESH_TOKEN_KEY)
                    .map_err(|_| storage_error("the refresh token removal")),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = session;
            Err(SessionError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            storage
                .remove_item(TOKEN_KEY)
                .and_then(|()| storage.remove_item(REFRESH_TOKEN_KEY))
                .map_err(|_| storage_error("the session removal"))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(SessionError::Unavailable)
        }
    }
}
