//! Unverified JWT payload decoding for navigation hints.
//!
//! The signature is not checked. These claims decide which navigation links
//! to show and where to land after login. Identity for data access comes
//! from `GET /User/me`; the id claim is only consulted on servers without it.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde_json::{Map, Value};

use crate::types::Role;

const ID_CLAIMS: &[&str] = &[
    "id",
    "sub",
    "nameid",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier",
];
const ROLE_CLAIMS: &[&str] = &[
    "role",
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
];
const EMAIL_CLAIMS: &[&str] = &[
    "email",
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress",
];

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a JSON object")]
    NotAnObject,
    #[error("token payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims read from a token payload without verifying it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnverifiedClaims {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    /// `exp` in seconds since the Unix epoch.
    pub expires_at: Option<i64>,
}

impl UnverifiedClaims {
    /// Decode the payload segment of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError`] if the token is not shaped like a JWT or its
    /// payload is not a base64-encoded JSON object.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (segments.next(), segments.next(), segments.next(), segments.next())
        else {
            return Err(ClaimsError::Malformed);
        };

        let payload = payload.trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))?;
        let Value::Object(map) = serde_json::from_slice::<Value>(&bytes)? else {
            return Err(ClaimsError::NotAnObject);
        };

        Ok(Self {
            user_id: first_claim(&map, ID_CLAIMS).and_then(scalar_to_string),
            email: first_claim(&map, EMAIL_CLAIMS).and_then(scalar_to_string),
            role: first_claim(&map, ROLE_CLAIMS).and_then(role_from_claim),
            expires_at: map.get("exp").and_then(Value::as_i64),
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// Whether `exp` lies at or before `now_secs`. Tokens without `exp` never expire here.
    #[must_use]
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now_secs)
    }
}

fn first_claim<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// A role claim may be a single string or an array; any admin entry wins.
fn role_from_claim(value: &Value) -> Option<Role> {
    match value {
        Value::String(text) => text.parse().ok(),
        Value::Array(items) => {
            let roles: Vec<Role> = items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|text| text.parse().ok())
                .collect();
            if roles.contains(&Role::Admin) {
                Some(Role::Admin)
            } else {
                roles.first().copied()
            }
        }
        _ => None,
    }
}
