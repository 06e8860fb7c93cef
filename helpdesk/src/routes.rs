//! Route table for the help-desk REST API.
//!
//! Paths are relative to the API base (which already ends in `/api`). Comment
//! mutations have two shapes in the wild; [`CommentRoutes`] picks one.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;
use std::str::FromStr;

use crate::error::ParseEnumError;
use crate::types::Id;

/// HTTP method subset used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the comment update/delete routes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommentRoutes {
    /// `/tickets/{ticketId}/Comment/{id}`
    Nested,
    /// `/Comment/{id}`
    #[default]
    Flat,
}

impl FromStr for CommentRoutes {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested" => Ok(Self::Nested),
            "flat" => Ok(Self::Flat),
            _ => Err(ParseEnumError {
                kind: "comment route shape",
                value: s.to_owned(),
            }),
        }
    }
}

/// One addressable API resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Me,
    Users,
    User(Id),
    TicketTypes,
    TicketType(Id),
    Tickets { type_id: Option<Id> },
    Ticket(Id),
    Comments { ticket_id: Id },
    Comment { ticket_id: Id, comment_id: Id },
}

impl Endpoint {
    /// Path below the API base, including any query string.
    #[must_use]
    pub fn path(self, comment_routes: CommentRoutes) -> String {
        match self {
            Self::Register => "/User/register".to_owned(),
            Self::Login => "/User/login".to_owned(),
            Self::Me => "/User/me".to_owned(),
            Self::Users => "/User".to_owned(),
            Self::User(id) => format!("/User/{id}"),
            Self::TicketTypes => "/TicketType".to_owned(),
            Self::TicketType(id) => format!("/TicketType/{id}"),
            Self::Tickets { type_id: None } => "/Ticket".to_owned(),
            Self::Tickets {
                type_id: Some(type_id),
            } => format!("/Ticket?typeId={type_id}"),
            Self::Ticket(id) => format!("/Ticket/{id}"),
            Self::Comments { ticket_id } => format!("/tickets/{ticket_id}/Comment"),
            Self::Comment {
                ticket_id,
                comment_id,
            } => match comment_routes {
                CommentRoutes::Nested => format!("/tickets/{ticket_id}/Comment/{comment_id}"),
                CommentRoutes::Flat => format!("/Comment/{comment_id}"),
            },
        }
    }

    /// Whether the request must carry a bearer token.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        !matches!(self, Self::Register | Self::Login)
    }
}

/// Join the API base and an endpoint path.
#[must_use]
pub fn endpoint_url(base_url: &str, endpoint: Endpoint, comment_routes: CommentRoutes) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), endpoint.path(comment_routes))
}
