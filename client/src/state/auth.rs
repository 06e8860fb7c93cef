//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives navigation visibility and the post-login redirect. Claims are read
//! from the stored token without verification; the API still authorizes
//! every request on its own.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use helpdesk::{
    ApiClient, ApiError, LoginRequest, LoginResponse, SessionStore, Transport, UnverifiedClaims,
};

/// Whether a session exists, plus the navigation hints decoded from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    pub claims: Option<UnverifiedClaims>,
}

impl AuthState {
    /// Build from a raw token, or the logged-out state for `None`/empty.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.filter(|token| !token.trim().is_empty()) {
            Some(token) => Self {
                logged_in: true,
                claims: UnverifiedClaims::decode(token).ok(),
            },
            None => Self::default(),
        }
    }

    /// Snapshot whatever `store` currently holds.
    pub fn from_store(store: &impl SessionStore) -> Self {
        Self::from_token(store.token().as_deref())
    }

    /// Attempt a login and snapshot the store afterwards. A rejected attempt
    /// clears the stored session, so the returned state is logged out then.
    pub async fn login<T, S>(
        api: &ApiClient<T, S>,
        request: &LoginRequest,
    ) -> (Self, Result<LoginResponse, ApiError>)
    where
        T: Transport,
        S: SessionStore,
    {
        let result = api.login(request).await;
        (Self::from_store(api.session()), result)
    }

    pub fn is_admin(&self) -> bool {
        self.claims.as_ref().is_some_and(UnverifiedClaims::is_admin)
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.as_ref().and_then(|claims| claims.email.as_deref())
    }
}
