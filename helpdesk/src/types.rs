//! Wire DTOs for the help-desk REST API.
//!
//! DESIGN
//! ======
//! Field names follow the server's camelCase JSON. Deserialization is lenient
//! where the server (or older client revisions) is inconsistent: a ticket's
//! `typeId` may arrive as `null`, `0`, `""`, a number, or a numeric string, and
//! a comment's text may arrive as `body` or `content`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseEnumError;

/// Server-assigned entity identifier.
pub type Id = i64;

/// Account role. Admins see the user and ticket-type administration views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(alias = "student", alias = "STUDENT")]
    Student,
    #[serde(alias = "admin", alias = "ADMIN")]
    Admin,
}

impl Role {
    pub const ALL: [Self; 2] = [Self::Student, Self::Admin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseEnumError {
                kind: "role",
                value: s.to_owned(),
            }),
        }
    }
}

/// Ticket lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    #[serde(alias = "open", alias = "OPEN")]
    Open,
    #[serde(alias = "closed", alias = "CLOSED")]
    Closed,
}

impl TicketStatus {
    pub const ALL: [Self; 2] = [Self::Open, Self::Closed];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                kind: "ticket status",
                value: s.to_owned(),
            }),
        }
    }
}

/// A registered account. The password is write-only and never returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Admin-managed ticket category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: Id,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A support request. This is also the full shape sent on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Id,
    /// Owner; the server fills it in from the bearer token on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
    /// `None` means uncategorized.
    #[serde(default, deserialize_with = "deserialize_type_id")]
    pub type_id: Option<Id>,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
}

impl Ticket {
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.type_id.is_none()
    }
}

/// A comment on a ticket, read from either `body` or `content`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CommentWire")]
pub struct Comment {
    pub id: Id,
    pub ticket_id: Id,
    pub user_id: Option<Id>,
    pub body: String,
    /// Server timestamp, kept verbatim; see [`crate::grouping::sort_comments`].
    pub created_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentWire {
    id: Id,
    #[serde(default)]
    ticket_id: Option<Id>,
    #[serde(default)]
    user_id: Option<Id>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<CommentWire> for Comment {
    fn from(wire: CommentWire) -> Self {
        Self {
            id: wire.id,
            ticket_id: wire.ticket_id.unwrap_or_default(),
            user_id: wire.user_id,
            body: wire.body.or(wire.content).unwrap_or_default(),
            created_at: wire.created_at.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "deserialize_string_or_null")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Partial user update; only `Some` fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for `POST /Ticket`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default, deserialize_with = "deserialize_type_id")]
    pub type_id: Option<Id>,
}

impl TicketInput {
    /// The update payload for an existing ticket with these field values.
    #[must_use]
    pub fn into_ticket(self, id: Id, user_id: Option<Id>) -> Ticket {
        Ticket {
            id,
            user_id,
            type_id: self.type_id,
            title: self.title,
            description: self.description,
            status: self.status,
        }
    }
}

/// Body for `POST /tickets/{ticketId}/Comment` and comment updates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    pub ticket_id: Id,
    #[serde(alias = "body")]
    pub content: String,
}

/// Failure body returned by the server on non-2xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `null`, `0`, `""`, integers, and numeric strings. Zero and
/// negative ids mean uncategorized.
pub(crate) fn deserialize_type_id<'de, D>(deserializer: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let id = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom("expected integer type id"))?,
        serde_json::Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<Id>()
                .map_err(|_| D::Error::custom(format!("invalid type id: {text}")))?
        }
        _ => return Err(D::Error::custom("expected type id")),
    };
    Ok((id > 0).then_some(id))
}
